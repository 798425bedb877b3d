use super::{common::*, ExactSolver};
use crate::algos::{greedy_action, MdpSolver};
use crate::error::Result;
use crate::mdps::{check_state, ActionId, Mdp, StateId};
use crate::trainer::{ThresholdTrainer, Trainer};
use std::rc::Rc;
use tracing::{debug, info};

pub const DEFAULT_THETA: f64 = 1e-8;
pub const DEFAULT_EVALUATION_SWEEPS: usize = 10_000;

/// Policy iteration - Sutton & Barto 2018, 4.3.
///
/// Evaluation is iterative and in place. Improvement only replaces an action
/// that another beats by more than `theta`, which keeps the pass count finite
/// when evaluation is approximate.
#[derive(Clone)]
pub struct PolicyIteration {
    mdp: Rc<dyn Mdp>,
    gamma: f64,
    theta: f64,
    max_evaluation_sweeps: usize,
    v: Vec<f64>,
    pi: Vec<ActionId>,
    terminal: Vec<bool>,
}

impl PolicyIteration {
    /// Starts from value 0 and action 0 everywhere.
    pub fn new(mdp: Rc<dyn Mdp>, gamma: f64) -> Result<Self> {
        let terminal = terminal_flags(&*mdp)?;

        Ok(Self {
            v: vec![0.; mdp.n_s()],
            pi: vec![0; mdp.n_s()],
            mdp,
            gamma,
            theta: DEFAULT_THETA,
            max_evaluation_sweeps: DEFAULT_EVALUATION_SWEEPS,
            terminal,
        })
    }

    pub fn with_max_evaluation_sweeps(mut self, sweeps: usize) -> Self {
        self.max_evaluation_sweeps = sweeps;
        self
    }

    pub fn values(&self) -> &[f64] {
        &self.v
    }

    /// Sweeps V ← R(s,π(s)) + γ Σ P V until it moves less than `theta`.
    fn evaluate(&mut self) -> Result<usize> {
        let mdp = &*self.mdp;
        for sweep in 1..=self.max_evaluation_sweeps {
            let mut delta: f64 = 0.;
            for s in 0..self.v.len() {
                if self.terminal[s] {
                    continue;
                }
                let nv = lookahead(mdp, &self.v, self.gamma, s, self.pi[s])?;
                delta = delta.max((nv - self.v[s]).abs());
                self.v[s] = nv;
            }

            if delta < self.theta {
                return Ok(sweep);
            }
        }

        Ok(self.max_evaluation_sweeps)
    }

    fn improve(&mut self) -> Result<usize> {
        let mdp = &*self.mdp;
        let mut changes = 0;
        for s in 0..self.pi.len() {
            if self.terminal[s] {
                continue;
            }
            let qs = lookahead_all(mdp, &self.v, self.gamma, s)?;
            let best = greedy_action(&qs);
            if qs[best] > qs[self.pi[s]] + self.theta {
                self.pi[s] = best;
                changes += 1;
            }
        }

        Ok(changes)
    }
}

impl Trainer for PolicyIteration {
    /// One evaluation + improvement pass; returns how many states changed
    /// their action.
    fn train(&mut self) -> Result<f64> {
        let sweeps = self.evaluate()?;
        let changes = self.improve()?;
        debug!(sweeps, changes, "Policy iteration pass");

        Ok(changes as f64)
    }
}

impl ExactSolver for PolicyIteration {
    /// `theta` is the evaluation tolerance; converged means a pass left the
    /// policy unchanged.
    fn exec(&mut self, theta: f64, num_iterations: Option<usize>) -> Result<(bool, usize)> {
        self.theta = theta;
        // Any pass with at least one change reports a delta >= 1.
        let ret = ThresholdTrainer::new(self, 0.5, num_iterations).train()?;
        info!(stable = ret.0, passes = ret.1, "Policy iteration finished");

        Ok(ret)
    }
}

impl MdpSolver for PolicyIteration {
    fn mdp(&self) -> &Rc<dyn Mdp> {
        &self.mdp
    }

    fn v_star(&self, s: StateId) -> Result<f64> {
        check_state(&*self.mdp, s)?;
        Ok(self.v[s])
    }

    fn q_star(&self, s: StateId, a: ActionId) -> Result<f64> {
        lookahead(&*self.mdp, &self.v, self.gamma, s, a)
    }

    fn pi_star(&self, s: StateId) -> Result<ActionId> {
        check_state(&*self.mdp, s)?;
        Ok(self.pi[s])
    }
}
