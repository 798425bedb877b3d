use crate::error::Result;
use crate::mdps::{check_state, outcomes::Outcomes, ActionId, Mdp, StateId};
use rand::prelude::*;

/// https://towardsdatascience.com/reinforcement-learning-an-easy-introduction-to-value-iteration-e4cfe0731fd5
///
/// States: 0 = fairway, 1 = green, 2 = in the hole.
/// Actions: 0 = hit to green, 1 = hit to fairway, 2 = hit in hole.
/// Pairs the article leaves undefined stay put with no reward.
pub struct SimpleGolf;

impl SimpleGolf {
    pub fn new() -> Self {
        Self
    }
}

impl Mdp for SimpleGolf {
    fn n_s(&self) -> usize {
        3
    }

    fn n_a(&self) -> usize {
        3
    }

    fn transitions(&self, s: StateId, a: ActionId) -> Result<Outcomes> {
        check_state(self, s)?;
        let mut os = Outcomes::new();
        match (s, a) {
            (0, 0) => os.push(1, 0.9, 0.).push(0, 0.1, 0.),
            (1, 1) => os.push(0, 0.9, 0.).push(1, 0.1, 0.),
            (1, 2) => os.push(2, 0.9, 10.).push(1, 0.1, 0.),
            (s, _) => os.push(s, 1., 0.),
        };

        Ok(os)
    }

    fn sample_initial_state(&self, _rng: &mut StdRng) -> StateId {
        0
    }

    fn is_terminal(&self, s: StateId) -> Result<bool> {
        check_state(self, s)?;
        Ok(s == 2)
    }
}
