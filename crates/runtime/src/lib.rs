//! Decision runtime for an agent navigating a stochastic grid world.
//!
//! This crate wires the pure grid model of `mdp-core` into a stateful
//! controller. Hosts implement [`mdp_core::WorldOracle`], start an episode
//! with [`MdpAgent::start_episode`] and ask for one [`mdp_core::Direction`]
//! per move.
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the provider seam and error types
//! - [`providers`] hosts the MDP solver and its randomness adapter
pub mod api;
pub mod providers;

pub use api::{DirectionProvider, Result, RuntimeError, StopProvider};
pub use providers::mdp::{
    Convergence, Decision, IterationError, PolicyExtractor, RewardMapBuilder, ScoredMove,
    SolverState, ThreatTracker, TransitionError, TransitionModel, ValueIteration,
};
pub use providers::{MdpAgent, RandOracle};
