pub mod model_based;
pub mod model_free;

use crate::error::Result;
use crate::mdps::{ActionId, Mdp, StateId, TabularPolicy};
use std::rc::Rc;

/// What every solver exposes once trained.
pub trait MdpSolver {
    fn mdp(&self) -> &Rc<dyn Mdp>;

    fn v_star(&self, s: StateId) -> Result<f64>;

    fn q_star(&self, s: StateId, a: ActionId) -> Result<f64>;

    fn pi_star(&self, s: StateId) -> Result<ActionId>;

    fn policy(&self) -> Result<TabularPolicy> {
        let actions = (0..self.mdp().n_s())
            .map(|s| self.pi_star(s))
            .collect::<Result<Vec<_>>>()?;

        Ok(TabularPolicy::new(actions))
    }
}

/// Index of the largest value; ties go to the lowest index.
pub fn greedy_action(values: &[f64]) -> ActionId {
    values
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(bi, bv), (i, &v)| {
            if v > bv {
                (i, v)
            } else {
                (bi, bv)
            }
        })
        .0
}
