use super::{exploration::ExplorationStrategy, trace::EligibilityTrace, LambdaParams};
use crate::algos::greedy_action;
use crate::error::Result;
use crate::mdps::{check_action, check_state, outcomes::Outcome, ActionId, Mdp, StateId, TabularPolicy};
use rand::prelude::*;
use std::rc::Rc;
use tracing::debug;

/// Episode bookkeeping, Q-table and trace shared by Q(λ) and Sarsa(λ).
pub(super) struct LambdaCore {
    pub mdp: Rc<dyn Mdp>,
    pub params: LambdaParams,
    strategy: Box<dyn ExplorationStrategy>,
    rng: StdRng,
    q: Vec<f64>,
    trace: EligibilityTrace,
    alpha: f64,
    current: Option<(StateId, ActionId)>,
    steps: usize,
    episodes: usize,
    total_reward: f64,
}

impl LambdaCore {
    pub fn new(
        mdp: Rc<dyn Mdp>,
        params: LambdaParams,
        strategy: Box<dyn ExplorationStrategy>,
    ) -> Self {
        Self {
            q: vec![0.; mdp.n_s() * mdp.n_a()],
            mdp,
            rng: StdRng::seed_from_u64(params.seed),
            alpha: params.alpha,
            params,
            strategy,
            trace: EligibilityTrace::new(),
            current: None,
            steps: 0,
            episodes: 0,
            total_reward: 0.,
        }
    }

    fn index(&self, s: StateId, a: ActionId) -> usize {
        s * self.mdp.n_a() + a
    }

    pub fn q_row(&self, s: StateId) -> &[f64] {
        let n_a = self.mdp.n_a();
        &self.q[s * n_a..(s + 1) * n_a]
    }

    pub fn q(&self, s: StateId, a: ActionId) -> f64 {
        self.q[self.index(s, a)]
    }

    pub fn max_q(&self, s: StateId) -> f64 {
        self.q_row(s).iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn choose(&mut self, s: StateId) -> ActionId {
        let n_a = self.mdp.n_a();
        self.strategy
            .action(&self.q[s * n_a..(s + 1) * n_a], &mut self.rng)
    }

    /// The pair to act on, starting a fresh episode when none is running.
    /// `None` when the episode starts in a terminal state; it is closed
    /// with zero steps.
    pub fn begin(&mut self) -> Result<Option<(StateId, ActionId)>> {
        if let Some(current) = self.current {
            return Ok(Some(current));
        }

        self.trace.reset();
        self.steps = 0;
        let s = self.mdp.sample_initial_state(&mut self.rng);
        check_state(&*self.mdp, s)?;
        if self.mdp.is_terminal(s)? {
            self.episodes += 1;
            debug!(episode = self.episodes, "Episode started in a terminal state");
            return Ok(None);
        }

        let a = self.choose(s);
        self.current = Some((s, a));

        Ok(Some((s, a)))
    }

    /// One realised transition; the flag tells whether it ended in a
    /// terminal state.
    pub fn sample(&mut self, s: StateId, a: ActionId) -> Result<(Outcome, bool)> {
        let o = self.mdp.sample_transition(s, a, &mut self.rng)?;
        self.total_reward += o.reward;
        let done = self.mdp.is_terminal(o.next_state)?;

        Ok((o, done))
    }

    /// Credits `td_error` to every traced pair, then decays the trace.
    pub fn update(&mut self, s: StateId, a: ActionId, td_error: f64) {
        let k = self.index(s, a);
        self.trace.increment(k);
        for (k, e) in self.trace.iter() {
            self.q[k] += self.alpha * e * td_error;
        }
        self.trace.decay(self.params.gamma * self.params.lambda);
        self.alpha *= self.params.decay;
    }

    /// Moves to `next`, or closes the episode on a terminal state or the
    /// step cap.
    pub fn advance(&mut self, next: Option<(StateId, ActionId)>) {
        self.steps += 1;
        match next {
            Some(next) if self.steps < self.params.max_steps_per_episode => {
                self.current = Some(next);
            }
            _ => {
                self.episodes += 1;
                debug!(
                    episode = self.episodes,
                    steps = self.steps,
                    terminated = next.is_none(),
                    "Episode finished"
                );
                self.current = None;
            }
        }
    }

    pub fn pi_star(&self, s: StateId) -> Result<ActionId> {
        check_state(&*self.mdp, s)?;
        Ok(greedy_action(self.q_row(s)))
    }

    pub fn v_star(&self, s: StateId) -> Result<f64> {
        check_state(&*self.mdp, s)?;
        Ok(self.max_q(s))
    }

    pub fn q_star(&self, s: StateId, a: ActionId) -> Result<f64> {
        check_state(&*self.mdp, s)?;
        check_action(&*self.mdp, a)?;
        Ok(self.q(s, a))
    }

    pub fn policy(&self) -> TabularPolicy {
        let actions = (0..self.mdp.n_s())
            .map(|s| greedy_action(self.q_row(s)))
            .collect();
        TabularPolicy::new(actions)
    }

    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    pub fn episodes(&self) -> usize {
        self.episodes
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}
