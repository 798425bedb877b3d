use crate::algos::model_free::LambdaParams;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Solver settings. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gamma: f64,
    /// Convergence threshold for the exact solvers.
    pub theta: f64,
    /// Cap on value-iteration sweeps / policy-iteration passes.
    pub max_iterations: Option<usize>,
    pub learner: LearnerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerConfig {
    pub lambda: f64,
    pub alpha: f64,
    pub decay: f64,
    pub epsilon: f64,
    /// Environment steps per learner run.
    pub iterations: usize,
    pub max_steps_per_episode: usize,
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gamma: 0.95,
            theta: 1e-8,
            max_iterations: Some(100_000),
            learner: LearnerConfig::default(),
        }
    }
}

impl Default for LearnerConfig {
    fn default() -> Self {
        let p = LambdaParams::default();
        Self {
            lambda: p.lambda,
            alpha: p.alpha,
            decay: p.decay,
            epsilon: 0.3,
            iterations: 50_000,
            max_steps_per_episode: p.max_steps_per_episode,
            seed: p.seed,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn lambda_params(&self) -> LambdaParams {
        LambdaParams {
            lambda: self.learner.lambda,
            gamma: self.gamma,
            alpha: self.learner.alpha,
            decay: self.learner.decay,
            max_steps_per_episode: self.learner.max_steps_per_episode,
            seed: self.learner.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MdpError;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn overrides_are_partial() {
        let c = Config::from_json(r#"{ "gamma": 0.9, "learner": { "epsilon": 0.1, "seed": 7 } }"#)
            .unwrap();

        assert_eq!(c.gamma, 0.9);
        assert_eq!(c.learner.epsilon, 0.1);
        assert_eq!(c.learner.lambda, 0.5);

        let p = c.lambda_params();
        assert_eq!((p.gamma, p.seed, p.alpha), (0.9, 7, 0.2));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            Config::from_json("{ gamma: }"),
            Err(MdpError::Config(_))
        ));
    }

    #[test]
    fn written_config_reads_back() {
        let c = Config {
            max_iterations: None,
            ..Default::default()
        };
        let json = serde_json::to_string(&c).unwrap();

        assert!(json.contains(r#""max_iterations":null"#));
        assert_eq!(Config::from_json(&json).unwrap(), c);
    }
}
