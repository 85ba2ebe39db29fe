//! Host-facing world queries.
//!
//! [`WorldOracle`] is the query surface the host exposes once per decision;
//! [`WorldSnapshot`] is an owned implementation for replay and tests. The
//! random source used for tie-breaks lives here too, since it is injected by
//! the host alongside the world.
mod error;
mod rng;
mod world;

pub use error::SnapshotError;
pub use rng::{PcgRng, RngOracle};
pub use world::{DEFAULT_DIRECTION_PROB, ThreatSighting, WorldOracle, WorldSnapshot, validate};
