use std::collections::HashMap;

/// Traces below this are dropped after a decay.
const PRUNE_BELOW: f64 = 1e-12;

/// Sparse accumulating eligibility trace over flat (state, action) indices.
#[derive(Debug, Clone, Default)]
pub struct EligibilityTrace {
    traces: HashMap<usize, f64>,
}

impl EligibilityTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: usize) {
        *self.traces.entry(key).or_insert(0.) += 1.;
    }

    pub fn get(&self, key: usize) -> f64 {
        self.traces.get(&key).copied().unwrap_or(0.)
    }

    pub fn decay(&mut self, factor: f64) {
        self.traces.retain(|_, e| {
            *e *= factor;
            e.abs() >= PRUNE_BELOW
        });
    }

    pub fn reset(&mut self) {
        self.traces.clear();
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.traces.iter().map(|(&k, &e)| (k, e))
    }
}
