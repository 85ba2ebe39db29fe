//! Public runtime API surface.

pub mod errors;
pub mod providers;

pub use errors::{Result, RuntimeError};
pub use providers::{DirectionProvider, StopProvider};
