use crate::error::Result;
use crate::mdps::{ActionId, Mdp, StateId};

/// R(s,a) + γ Σ P(s'|s,a) V(s')
pub fn lookahead(mdp: &dyn Mdp, v: &[f64], gamma: f64, s: StateId, a: ActionId) -> Result<f64> {
    let os = mdp.transitions(s, a)?;
    Ok(os.expected_reward() + gamma * os.expectation(v))
}

pub fn lookahead_all(mdp: &dyn Mdp, v: &[f64], gamma: f64, s: StateId) -> Result<Vec<f64>> {
    (0..mdp.n_a())
        .map(|a| lookahead(mdp, v, gamma, s, a))
        .collect()
}

pub fn terminal_flags(mdp: &dyn Mdp) -> Result<Vec<bool>> {
    (0..mdp.n_s()).map(|s| mdp.is_terminal(s)).collect()
}
