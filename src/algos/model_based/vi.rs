use super::{common::*, ExactSolver};
use crate::algos::{greedy_action, MdpSolver};
use crate::error::Result;
use crate::mdps::{check_state, ActionId, Mdp, StateId};
use crate::trainer::{ThresholdTrainer, Trainer};
use std::rc::Rc;
use tracing::info;

/// Synchronous value iteration. Terminal states keep a value of 0.
#[derive(Clone)]
pub struct ValueIteration {
    mdp: Rc<dyn Mdp>,
    gamma: f64,
    v: Vec<f64>,
    terminal: Vec<bool>,
}

impl ValueIteration {
    pub fn new(mdp: Rc<dyn Mdp>, gamma: f64) -> Result<Self> {
        let terminal = terminal_flags(&*mdp)?;

        Ok(Self {
            v: vec![0.; mdp.n_s()],
            mdp,
            gamma,
            terminal,
        })
    }

    pub fn values(&self) -> &[f64] {
        &self.v
    }
}

impl Trainer for ValueIteration {
    /// One full Bellman sweep; returns the largest change.
    fn train(&mut self) -> Result<f64> {
        let mdp = &*self.mdp;
        let mut next = vec![0.; self.v.len()];
        for (s, nv) in next.iter_mut().enumerate() {
            if self.terminal[s] {
                continue;
            }

            *nv = lookahead_all(mdp, &self.v, self.gamma, s)?
                .into_iter()
                .fold(f64::NEG_INFINITY, f64::max);
        }

        let delta = next
            .iter()
            .zip(&self.v)
            .map(|(a, b)| (a - b).abs())
            .fold(0., f64::max);
        self.v = next;

        Ok(delta)
    }
}

impl ExactSolver for ValueIteration {
    fn exec(&mut self, theta: f64, num_iterations: Option<usize>) -> Result<(bool, usize)> {
        let ret = ThresholdTrainer::new(self, theta, num_iterations).train()?;
        info!(converged = ret.0, iterations = ret.1, "Value iteration finished");

        Ok(ret)
    }
}

impl MdpSolver for ValueIteration {
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
        Ok(greedy_action(&lookahead_all(
            &*self.mdp,
            &self.v,
            self.gamma,
            s,
        )?))
    }
}
