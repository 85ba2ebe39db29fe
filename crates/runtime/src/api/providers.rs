//! Abstraction for sourcing the agent's next move.
//!
//! Hosts plug in [`DirectionProvider`] implementations so a game loop can run
//! with the MDP solver, scripted fixtures, or a fixed fallback.
use mdp_core::{Direction, WorldOracle};

use super::errors::Result;

/// Trait for choosing a direction from the current world view.
pub trait DirectionProvider {
    /// Returns the move to attempt. Implementations must only return a
    /// direction contained in `world.legal_directions(world.agent())`.
    fn provide_direction(&mut self, world: &dyn WorldOracle) -> Result<Direction>;
}

/// Provider that always stays put. Useful as a fallback or in tests.
pub struct StopProvider;

impl DirectionProvider for StopProvider {
    fn provide_direction(&mut self, _world: &dyn WorldOracle) -> Result<Direction> {
        Ok(Direction::Stop)
    }
}
