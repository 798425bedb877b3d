use super::{outcomes::*, ActionId, Mdp, StateId};
use crate::error::Result;
use rand::prelude::*;
use std::cell::Cell;
use std::fmt;

/// Model query counters, owned by whoever wraps the MDP.
#[derive(Debug, Default)]
pub struct CallStats {
    transition: Cell<u64>,
    reward: Cell<u64>,
    sample: Cell<u64>,
}

impl CallStats {
    pub fn transition_calls(&self) -> u64 {
        self.transition.get()
    }

    pub fn reward_calls(&self) -> u64 {
        self.reward.get()
    }

    pub fn sample_calls(&self) -> u64 {
        self.sample.get()
    }

    pub fn reset(&self) {
        self.transition.set(0);
        self.reward.set(0);
        self.sample.set(0);
    }

    fn bump(c: &Cell<u64>) {
        c.set(c.get() + 1);
    }
}

impl fmt::Display for CallStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Called: transition => {}, reward => {}, sample => {}",
            self.transition_calls(),
            self.reward_calls(),
            self.sample_calls()
        )
    }
}

/// Forwards every query to `inner` and counts it.
///
/// Full enumerations (`transitions`) and point lookups
/// (`transition_probability`) both count as transition calls.
pub struct CountingMdp<M> {
    inner: M,
    stats: CallStats,
}

impl<M: Mdp> CountingMdp<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            stats: CallStats::default(),
        }
    }

    pub fn stats(&self) -> &CallStats {
        &self.stats
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }
}

impl<M: Mdp> Mdp for CountingMdp<M> {
    fn n_s(&self) -> usize {
        self.inner.n_s()
    }

    fn n_a(&self) -> usize {
        self.inner.n_a()
    }

    fn transitions(&self, s: StateId, a: ActionId) -> Result<Outcomes> {
        CallStats::bump(&self.stats.transition);
        self.inner.transitions(s, a)
    }

    fn sample_initial_state(&self, rng: &mut StdRng) -> StateId {
        self.inner.sample_initial_state(rng)
    }

    fn is_terminal(&self, s: StateId) -> Result<bool> {
        self.inner.is_terminal(s)
    }

    fn reward(&self, s: StateId, a: ActionId) -> Result<f64> {
        CallStats::bump(&self.stats.reward);
        self.inner.reward(s, a)
    }

    fn transition_probability(&self, s: StateId, s_next: StateId, a: ActionId) -> Result<f64> {
        CallStats::bump(&self.stats.transition);
        self.inner.transition_probability(s, s_next, a)
    }

    fn sample_transition(&self, s: StateId, a: ActionId, rng: &mut StdRng) -> Result<Outcome> {
        CallStats::bump(&self.stats.sample);
        self.inner.sample_transition(s, a, rng)
    }

    fn sample_state(&self, s: StateId, a: ActionId, rng: &mut StdRng) -> Result<StateId> {
        Ok(self.sample_transition(s, a, rng)?.next_state)
    }
}
