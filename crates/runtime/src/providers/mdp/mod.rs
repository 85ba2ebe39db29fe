//! Markov decision process solver for grid navigation.
//!
//! One decision runs the whole pipeline against a fresh world snapshot:
//!
//! 1. [`RewardMapBuilder`] scores every open cell from consumables, threats
//!    and the grid's danger zone.
//! 2. [`ValueIteration`] solves the Bellman equations, warm-started from the
//!    previous decision's utilities.
//! 3. [`PolicyExtractor`] picks the move with the best expected utility.
//!
//! [`MdpAgent`] owns the per-episode [`SolverState`] and drives the steps.

mod agent;
mod iteration;
mod policy;
mod reward;
mod threat;
mod transition;

pub use agent::{Decision, MdpAgent, SolverState};
pub use iteration::{Convergence, IterationError, ValueIteration};
pub use policy::{BestMoves, PolicyExtractor, ScoredMove};
pub use reward::{RewardMap, RewardMapBuilder};
pub use threat::ThreatTracker;
pub use transition::{Outcome, Outcomes, TransitionError, TransitionModel};
