pub mod call_stats;
pub mod outcomes;

use crate::error::{MdpError, Result};
use outcomes::{Outcome, Outcomes};
use rand::prelude::*;

pub type StateId = usize;
pub type ActionId = usize;

/// Markov Decision Process - Sutton & Barto 2018.
///
/// `transitions` is the only required model query; the rest are derived from
/// it unless an implementation has a cheaper way.
pub trait Mdp {
    fn n_s(&self) -> usize;

    fn n_a(&self) -> usize;

    fn transitions(&self, s: StateId, a: ActionId) -> Result<Outcomes>;

    fn sample_initial_state(&self, rng: &mut StdRng) -> StateId;

    fn is_terminal(&self, s: StateId) -> Result<bool>;

    /// Expected immediate reward over all branches.
    fn reward(&self, s: StateId, a: ActionId) -> Result<f64> {
        Ok(self.transitions(s, a)?.expected_reward())
    }

    fn transition_probability(&self, s: StateId, s_next: StateId, a: ActionId) -> Result<f64> {
        Ok(self.transitions(s, a)?.probability_of(s_next))
    }

    /// One draw: realised next state together with the reward of that branch.
    fn sample_transition(&self, s: StateId, a: ActionId, rng: &mut StdRng) -> Result<Outcome> {
        self.transitions(s, a)?
            .sample(rng)
            .ok_or(MdpError::InvalidAction {
                action: a,
                n_a: self.n_a(),
            })
    }

    fn sample_state(&self, s: StateId, a: ActionId, rng: &mut StdRng) -> Result<StateId> {
        Ok(self.sample_transition(s, a, rng)?.next_state)
    }
}

pub trait Policy {
    fn action(&self, s: StateId) -> Result<ActionId>;
}

/// A total state -> action table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularPolicy {
    actions: Vec<ActionId>,
}

impl TabularPolicy {
    pub fn new(actions: Vec<ActionId>) -> Self {
        Self { actions }
    }

    pub fn actions(&self) -> &[ActionId] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Policy for TabularPolicy {
    fn action(&self, s: StateId) -> Result<ActionId> {
        self.actions
            .get(s)
            .copied()
            .ok_or(MdpError::InvalidState {
                state: s,
                n_s: self.actions.len(),
            })
    }
}

pub(crate) fn check_state(mdp: &dyn Mdp, s: StateId) -> Result<()> {
    if s < mdp.n_s() {
        Ok(())
    } else {
        Err(MdpError::InvalidState {
            state: s,
            n_s: mdp.n_s(),
        })
    }
}

pub(crate) fn check_action(mdp: &dyn Mdp, a: ActionId) -> Result<()> {
    if a < mdp.n_a() {
        Ok(())
    } else {
        Err(MdpError::InvalidAction {
            action: a,
            n_a: mdp.n_a(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabular_policy_rejects_unknown_states() {
        let pi = TabularPolicy::new(vec![4, 0, 2]);

        assert_eq!(pi.action(2).unwrap(), 2);
        assert!(matches!(
            pi.action(3),
            Err(MdpError::InvalidState { state: 3, n_s: 3 })
        ));
    }
}
