use super::{exploration::ExplorationStrategy, td_lambda::LambdaCore, LambdaParams};
use crate::algos::MdpSolver;
use crate::error::Result;
use crate::mdps::{ActionId, Mdp, StateId, TabularPolicy};
use crate::trainer::Trainer;
use std::rc::Rc;

/// Off-policy Q(λ): bootstraps from the greedy value of the next state,
/// whatever the strategy ends up doing there.
pub struct QLambda {
    core: LambdaCore,
}

impl QLambda {
    pub fn new(
        mdp: Rc<dyn Mdp>,
        params: LambdaParams,
        strategy: Box<dyn ExplorationStrategy>,
    ) -> Self {
        Self {
            core: LambdaCore::new(mdp, params, strategy),
        }
    }

    /// Sum of realised rewards over every step taken so far.
    pub fn total_reward(&self) -> f64 {
        self.core.total_reward()
    }

    pub fn episodes(&self) -> usize {
        self.core.episodes()
    }

    pub fn learning_rate(&self) -> f64 {
        self.core.alpha()
    }
}

impl Trainer for QLambda {
    /// One environment step; returns |TD error|.
    fn train(&mut self) -> Result<f64> {
        let Some((s, a)) = self.core.begin()? else {
            return Ok(0.);
        };
        let (o, done) = self.core.sample(s, a)?;

        let future = if done { 0. } else { self.core.max_q(o.next_state) };
        let td_error = o.reward + self.core.params.gamma * future - self.core.q(s, a);
        self.core.update(s, a, td_error);

        let next = (!done).then(|| (o.next_state, self.core.choose(o.next_state)));
        self.core.advance(next);

        Ok(td_error.abs())
    }
}

impl MdpSolver for QLambda {
    fn mdp(&self) -> &Rc<dyn Mdp> {
        &self.core.mdp
    }

    fn v_star(&self, s: StateId) -> Result<f64> {
        self.core.v_star(s)
    }

    fn q_star(&self, s: StateId, a: ActionId) -> Result<f64> {
        self.core.q_star(s, a)
    }

    fn pi_star(&self, s: StateId) -> Result<ActionId> {
        self.core.pi_star(s)
    }

    fn policy(&self) -> Result<TabularPolicy> {
        Ok(self.core.policy())
    }
}
