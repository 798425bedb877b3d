use super::StateId;
use rand::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub next_state: StateId,
    pub probability: f64,
    pub reward: f64,
}

/// Weighted outcome list for one (state, action) query.
///
/// Entries keep their insertion order. The cumulative probability of every
/// entry is recorded as it is pushed, so sampling is a binary search.
#[derive(Debug, Clone, Default)]
pub struct Outcomes {
    entries: Vec<Outcome>,
    cumulative: Vec<f64>,
}

impl Outcomes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, next_state: StateId, probability: f64, reward: f64) -> &mut Self {
        let cump = self.total_probability() + probability;
        self.entries.push(Outcome {
            next_state,
            probability,
            reward,
        });
        self.cumulative.push(cump);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Outcome> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_probability(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.)
    }

    pub fn expected_reward(&self) -> f64 {
        self.entries.iter().map(|o| o.probability * o.reward).sum()
    }

    /// Branches landing on the same state add up.
    pub fn probability_of(&self, next_state: StateId) -> f64 {
        self.entries
            .iter()
            .filter(|o| o.next_state == next_state)
            .map(|o| o.probability)
            .sum()
    }

    /// Σ p(s') · v(s') over all branches.
    pub fn expectation(&self, v: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|o| o.probability * v[o.next_state])
            .sum()
    }

    /// Draws one branch. Returns `None` only for an empty list.
    pub fn sample(&self, rng: &mut StdRng) -> Option<Outcome> {
        let last = self.entries.len().checked_sub(1)?;
        let u = rng.gen::<f64>() * self.total_probability();
        let i = self.cumulative.partition_point(|&c| c < u).min(last);
        Some(self.entries[i])
    }
}
