pub mod exploration;
pub mod q_lambda;
pub mod sarsa_lambda;
pub mod trace;

mod td_lambda;

use serde::{Deserialize, Serialize};

/// Hyper-parameters shared by the eligibility-trace learners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LambdaParams {
    pub lambda: f64,
    pub gamma: f64,
    /// Learning rate.
    pub alpha: f64,
    /// Learning-rate multiplier applied after every step.
    pub decay: f64,
    pub max_steps_per_episode: usize,
    pub seed: u64,
}

impl Default for LambdaParams {
    fn default() -> Self {
        Self {
            lambda: 0.5,
            gamma: 0.95,
            alpha: 0.2,
            decay: 1.,
            max_steps_per_episode: 1000,
            seed: 2718,
        }
    }
}
