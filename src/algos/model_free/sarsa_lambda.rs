use super::{exploration::ExplorationStrategy, td_lambda::LambdaCore, LambdaParams};
use crate::algos::MdpSolver;
use crate::error::Result;
use crate::mdps::{ActionId, Mdp, StateId, TabularPolicy};
use crate::trainer::Trainer;
use std::rc::Rc;

/// On-policy Sarsa(λ) - Sutton & Barto 2018, 12.7.
pub struct SarsaLambda {
    core: LambdaCore,
}

impl SarsaLambda {
    pub fn new(
        mdp: Rc<dyn Mdp>,
        params: LambdaParams,
        strategy: Box<dyn ExplorationStrategy>,
    ) -> Self {
        Self {
            core: LambdaCore::new(mdp, params, strategy),
        }
    }

    pub fn total_reward(&self) -> f64 {
        self.core.total_reward()
    }

    pub fn episodes(&self) -> usize {
        self.core.episodes()
    }
}

impl Trainer for SarsaLambda {
    /// One environment step; returns |TD error|.
    fn train(&mut self) -> Result<f64> {
        let Some((s, a)) = self.core.begin()? else {
            return Ok(0.);
        };
        let (o, done) = self.core.sample(s, a)?;

        // The action bootstrapped from is the one taken next.
        let next = (!done).then(|| (o.next_state, self.core.choose(o.next_state)));
        let future = next.map_or(0., |(s_next, a_next)| self.core.q(s_next, a_next));
        let td_error = o.reward + self.core.params.gamma * future - self.core.q(s, a);
        self.core.update(s, a, td_error);
        self.core.advance(next);

        Ok(td_error.abs())
    }
}

impl MdpSolver for SarsaLambda {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algos::model_free::exploration::EpsilonGreedy;
    use crate::envs::grid::WumpusMdp;
    use crate::envs::simple_golf::SimpleGolf;
    use crate::mdps::call_stats::CountingMdp;
    use crate::trainer::FixedIterationTrainer;

    #[test]
    fn learns_simple_golf() {
        let mdp = Rc::new(SimpleGolf::new()) as Rc<dyn Mdp>;
        let params = LambdaParams {
            gamma: 0.9,
            max_steps_per_episode: 50,
            ..Default::default()
        };
        let sl = &mut SarsaLambda::new(mdp, params, Box::new(EpsilonGreedy::new(0.1)));

        FixedIterationTrainer::new(sl, 20_000).train().unwrap();

        assert_eq!(sl.policy().unwrap().actions(), &[0, 2, 0]);
        assert!(sl.total_reward() > 0.);
    }

    #[test]
    fn samples_once_per_step() {
        let counting = Rc::new(CountingMdp::new(SimpleGolf::new()));
        let mdp = Rc::clone(&counting) as Rc<dyn Mdp>;
        let sl = &mut SarsaLambda::new(mdp, LambdaParams::default(), Box::new(EpsilonGreedy::new(0.3)));

        FixedIterationTrainer::new(sl, 250).train().unwrap();

        assert_eq!(counting.stats().sample_calls(), 250);
        assert_eq!(counting.stats().reward_calls(), 0);
    }

    #[test]
    fn same_seed_same_run() {
        let run = || {
            let mdp = Rc::new(SimpleGolf::new()) as Rc<dyn Mdp>;
            let sl = &mut SarsaLambda::new(mdp, LambdaParams::default(), Box::new(EpsilonGreedy::new(0.3)));
            FixedIterationTrainer::new(sl, 500).train().unwrap();
            (sl.episodes(), sl.total_reward(), sl.q_star(1, 2).unwrap())
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn terminal_start_never_acts() {
        let grid = WumpusMdp::parse("@  x").unwrap();
        let s0 = grid.initial_state();
        assert!(grid.is_terminal(s0).unwrap());

        let mdp = Rc::new(grid) as Rc<dyn Mdp>;
        let sl = &mut SarsaLambda::new(mdp, LambdaParams::default(), Box::new(EpsilonGreedy::new(0.3)));

        assert_eq!(FixedIterationTrainer::new(sl, 500).train().unwrap(), 0.);
        for a in 0..5 {
            assert_eq!(sl.q_star(s0, a).unwrap(), 0.);
        }
        assert_eq!(sl.total_reward(), 0.);
        assert_eq!(sl.episodes(), 500);
    }
}
