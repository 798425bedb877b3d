use crate::algos::greedy_action;
use crate::mdps::ActionId;
use rand::prelude::*;

/// Picks the next action from one state's row of Q-values.
pub trait ExplorationStrategy {
    fn action(&self, q: &[f64], rng: &mut StdRng) -> ActionId;
}

/// Uniformly random with probability `epsilon`, greedy otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonGreedy {
    epsilon: f64,
}

impl EpsilonGreedy {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl ExplorationStrategy for EpsilonGreedy {
    fn action(&self, q: &[f64], rng: &mut StdRng) -> ActionId {
        if rng.gen::<f64>() < self.epsilon {
            rng.gen_range(0..q.len())
        } else {
            greedy_action(q)
        }
    }
}
