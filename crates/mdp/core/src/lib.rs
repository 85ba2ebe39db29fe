//! Grid primitives for the maze MDP solver.
//!
//! `mdp-core` defines the value types and pure algorithms shared by the
//! solver runtime and the content loaders: positions and directions, the
//! episode's wall layout, reward/utility grids, bounded reachability search,
//! reward profiles, solver configuration, and the world query trait the host
//! implements. Nothing here logs, allocates global state, or performs I/O.
pub mod config;
pub mod env;
pub mod error;
pub mod grid;
pub mod profile;
pub mod state;

pub use config::{ConfigError, SolverConfig};
pub use env::{
    DEFAULT_DIRECTION_PROB, PcgRng, RngOracle, SnapshotError, ThreatSighting, WorldOracle,
    WorldSnapshot,
};
pub use error::{CoreError, ErrorSeverity};
pub use grid::{Cell, MapDimensions, Reach, ReachabilitySearch, ValueGrid, WallLayout};
pub use profile::{CellRect, GridKind, ProfileTable, RewardProfile};
pub use state::{Direction, DirectionSet, Position};
