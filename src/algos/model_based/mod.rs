pub mod common;
pub mod pi;
pub mod vi;

use super::MdpSolver;
use crate::error::Result;
use crate::trainer::Trainer;

/// Dynamic-programming solvers that need the full transition model.
pub trait ExactSolver: MdpSolver + Trainer {
    /// Iterates until converged under `theta` or `num_iterations` run out.
    /// Returns (converged, iterations); not converging is not an error.
    fn exec(&mut self, theta: f64, num_iterations: Option<usize>) -> Result<(bool, usize)>;
}
