use crate::error::Result;
use crate::mdps::{Mdp, Policy, StateId};
use rand::prelude::*;

/// A single policy rollout.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    /// Undiscounted sum of realised rewards.
    pub reward: f64,
    pub steps: usize,
    /// False when the step cap cut the episode short.
    pub terminated: bool,
    /// Visited states, initial state first.
    pub trajectory: Vec<StateId>,
}

/// Follows `policy` from a sampled initial state until a terminal state or
/// `max_steps` transitions.
pub fn rollout(
    mdp: &dyn Mdp,
    policy: &dyn Policy,
    rng: &mut StdRng,
    max_steps: usize,
) -> Result<Episode> {
    let mut s = mdp.sample_initial_state(rng);
    let mut episode = Episode {
        reward: 0.,
        steps: 0,
        terminated: mdp.is_terminal(s)?,
        trajectory: vec![s],
    };

    while !episode.terminated && episode.steps < max_steps {
        let o = mdp.sample_transition(s, policy.action(s)?, rng)?;
        s = o.next_state;

        episode.reward += o.reward;
        episode.steps += 1;
        episode.trajectory.push(s);
        episode.terminated = mdp.is_terminal(s)?;
    }

    Ok(episode)
}

/// Mean undiscounted reward over `n` rollouts.
pub fn average_reward(
    mdp: &dyn Mdp,
    policy: &dyn Policy,
    rng: &mut StdRng,
    n: usize,
    max_steps: usize,
) -> Result<f64> {
    if n == 0 {
        return Ok(0.);
    }

    let mut total = 0.;
    for _ in 0..n {
        total += rollout(mdp, policy, rng, max_steps)?.reward;
    }

    Ok(total / n as f64)
}
