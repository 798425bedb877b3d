//! Tabular planning and learning on grid-world MDPs: a treasure hunt with
//! pits and a monster, plus the solvers that play it.

pub mod algos;
pub mod config;
pub mod envs;
pub mod error;
pub mod evaluation;
pub mod mdps;
pub mod trainer;

pub use algos::{
    model_based::{pi::PolicyIteration, vi::ValueIteration, ExactSolver},
    model_free::{
        exploration::{EpsilonGreedy, ExplorationStrategy},
        q_lambda::QLambda,
        sarsa_lambda::SarsaLambda,
        LambdaParams,
    },
    MdpSolver,
};
pub use envs::grid::{GridMdp, MazeMdp, WumpusMdp};
pub use error::{MdpError, Result};
pub use mdps::{ActionId, Mdp, Policy, StateId, TabularPolicy};
