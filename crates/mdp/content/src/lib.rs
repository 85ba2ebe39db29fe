//! Data-driven content for the maze solver.
//!
//! This crate houses the built-in maze layouts and provides loaders for the
//! files a host or replay tool keeps on disk:
//! - Maze layouts (ASCII, one character per cell)
//! - Solver configuration (TOML)
//! - Reward profiles per grid kind (RON)
//! - World snapshots for replay (JSON)
//!
//! All loaders produce `mdp-core` types directly via serde.

pub mod layouts;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use layouts::{BuiltinLayout, LayoutSymbol};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LayoutLoader, LoadResult, ProfileLoader, SnapshotLoader};
