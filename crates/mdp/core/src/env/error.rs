use crate::error::{CoreError, ErrorSeverity};
use crate::grid::MapDimensions;
use crate::state::{Direction, Position};

/// Reasons a world snapshot cannot be turned into a consistent grid.
///
/// None of these are recovered from: an inconsistent grid makes every
/// downstream value meaningless.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot reports no usable corner coordinates")]
    MissingCorners,

    #[error("wall at {position} lies outside the {}x{} grid", dimensions.width, dimensions.height)]
    WallOutOfBounds {
        position: Position,
        dimensions: MapDimensions,
    },

    #[error("the {}x{} grid has no open cell", dimensions.width, dimensions.height)]
    NoOpenCells { dimensions: MapDimensions },

    #[error(
        "{kind} at {position} lies outside the {}x{} grid",
        dimensions.width, dimensions.height
    )]
    OutOfBounds {
        kind: &'static str,
        position: Position,
        dimensions: MapDimensions,
    },

    #[error("{kind} at {position} sits on a wall")]
    OnWall {
        kind: &'static str,
        position: Position,
    },

    #[error("threat #{index} reported at a non-finite coordinate")]
    NonFiniteThreat { index: usize },

    #[error(
        "grid changed from {}x{} to {}x{} mid-episode",
        expected.width, expected.height, found.width, found.height
    )]
    DimensionsChanged {
        expected: MapDimensions,
        found: MapDimensions,
    },

    #[error("wall layout changed at {position} mid-episode")]
    WallsChanged { position: Position },

    #[error("no legal direction reported at {position}")]
    NoLegalDirections { position: Position },

    #[error("direction {direction} reported legal at {position} but leads into a wall")]
    LegalDirectionBlocked {
        position: Position,
        direction: Direction,
    },
}

impl CoreError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingCorners => "SNAPSHOT_MISSING_CORNERS",
            Self::WallOutOfBounds { .. } => "SNAPSHOT_WALL_OUT_OF_BOUNDS",
            Self::NoOpenCells { .. } => "SNAPSHOT_NO_OPEN_CELLS",
            Self::OutOfBounds { .. } => "SNAPSHOT_OUT_OF_BOUNDS",
            Self::OnWall { .. } => "SNAPSHOT_ON_WALL",
            Self::NonFiniteThreat { .. } => "SNAPSHOT_NON_FINITE_THREAT",
            Self::DimensionsChanged { .. } => "SNAPSHOT_DIMENSIONS_CHANGED",
            Self::WallsChanged { .. } => "SNAPSHOT_WALLS_CHANGED",
            Self::NoLegalDirections { .. } => "SNAPSHOT_NO_LEGAL_DIRECTIONS",
            Self::LegalDirectionBlocked { .. } => "SNAPSHOT_LEGAL_DIRECTION_BLOCKED",
        }
    }
}
