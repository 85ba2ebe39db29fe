//! Direction provider implementations.

pub mod mdp;
mod rng;

pub use mdp::{Decision, MdpAgent, SolverState};
pub use rng::RandOracle;
