//! Grid coordinates and movement directions.
//!
//! These are the value types every other module speaks in: positions on the
//! maze, the five movement directions with their rotations, and compact sets
//! of legal directions.
mod types;

pub use types::{Direction, DirectionSet, Position};
