//! Static maze geometry and per-cell value grids.
//!
//! The wall layout is fixed for an episode; value grids (rewards, utilities)
//! are rebuilt or refined every decision but always share the layout's shape
//! and wall cells.
mod search;
mod values;

pub use search::{Reach, ReachabilitySearch};
pub use values::{Cell, ValueGrid};

use crate::env::SnapshotError;
use crate::state::{Direction, DirectionSet, Position};

/// Width and height of the maze, in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Derives dimensions from the maze corner coordinates.
    ///
    /// The largest `x` and `y` seen among the corners are the last valid
    /// column and row. Returns `None` when no corner is given or a corner has
    /// a negative coordinate.
    pub fn from_corners<I>(corners: I) -> Option<Self>
    where
        I: IntoIterator<Item = Position>,
    {
        let mut max: Option<(i32, i32)> = None;
        for corner in corners {
            if corner.x < 0 || corner.y < 0 {
                return None;
            }
            max = Some(match max {
                Some((x, y)) => (x.max(corner.x), y.max(corner.y)),
                None => (corner.x, corner.y),
            });
        }
        max.map(|(x, y)| Self::new(x as u32 + 1, y as u32 + 1))
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    pub const fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major index of `position`, or `None` when it is out of bounds.
    pub fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }

    pub fn position(&self, index: usize) -> Position {
        let width = self.width as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cell_count()).map(|index| self.position(index))
    }
}

/// Immutable wall layout of one episode.
///
/// Out-of-bounds cells are treated exactly like walls: nothing may enter them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WallLayout {
    dimensions: MapDimensions,
    walls: Vec<bool>,
}

impl WallLayout {
    pub fn new<I>(dimensions: MapDimensions, walls: I) -> Result<Self, SnapshotError>
    where
        I: IntoIterator<Item = Position>,
    {
        let mut cells = vec![false; dimensions.cell_count()];
        for position in walls {
            let index = dimensions
                .index(position)
                .ok_or(SnapshotError::WallOutOfBounds {
                    position,
                    dimensions,
                })?;
            cells[index] = true;
        }
        if cells.iter().all(|&wall| wall) {
            return Err(SnapshotError::NoOpenCells { dimensions });
        }

        Ok(Self {
            dimensions,
            walls: cells,
        })
    }

    /// Layout without any interior walls, mostly for tests and corridors.
    pub fn open(dimensions: MapDimensions) -> Self {
        Self {
            dimensions,
            walls: vec![false; dimensions.cell_count()],
        }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn is_wall(&self, position: Position) -> bool {
        self.dimensions
            .index(position)
            .is_none_or(|index| self.walls[index])
    }

    pub fn is_open(&self, position: Position) -> bool {
        !self.is_wall(position)
    }

    /// Directions that can be taken from `position`; `Stop` is always legal.
    pub fn legal_directions(&self, position: Position) -> DirectionSet {
        Direction::CARDINAL
            .into_iter()
            .filter(|&direction| self.is_open(position.step(direction)))
            .fold(DirectionSet::STOP, |set, direction| set.with(direction))
    }

    pub fn walls(&self) -> impl Iterator<Item = Position> + '_ {
        self.walls
            .iter()
            .enumerate()
            .filter(|(_, wall)| **wall)
            .map(|(index, _)| self.dimensions.position(index))
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.walls
            .iter()
            .enumerate()
            .filter(|(_, wall)| !**wall)
            .map(|(index, _)| self.dimensions.position(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_from_corners() {
        let corners = [
            Position::new(0, 0),
            Position::new(19, 0),
            Position::new(0, 10),
            Position::new(19, 10),
        ];
        assert_eq!(
            MapDimensions::from_corners(corners),
            Some(MapDimensions::new(20, 11))
        );
        assert_eq!(MapDimensions::from_corners([]), None);
        assert_eq!(MapDimensions::from_corners([Position::new(-1, 3)]), None);
    }

    #[test]
    fn index_round_trips_through_position() {
        let dimensions = MapDimensions::new(4, 3);
        for position in dimensions.positions() {
            let index = dimensions.index(position).unwrap();
            assert_eq!(dimensions.position(index), position);
        }
        assert_eq!(dimensions.index(Position::new(4, 0)), None);
    }

    #[test]
    fn legal_directions_respect_walls_and_bounds() {
        let dimensions = MapDimensions::new(3, 3);
        let layout = WallLayout::new(dimensions, [Position::new(1, 2)]).unwrap();

        let centre = layout.legal_directions(Position::new(1, 1));
        assert!(centre.has(Direction::Stop));
        assert!(!centre.has(Direction::North));
        assert_eq!(centre.exits(), 3);

        let corner = layout.legal_directions(Position::new(0, 0));
        assert!(corner.has(Direction::North));
        assert!(corner.has(Direction::East));
        assert!(!corner.has(Direction::South));
        assert!(!corner.has(Direction::West));
    }

    #[test]
    fn wall_outside_dimensions_is_rejected() {
        let dimensions = MapDimensions::new(2, 2);
        let err = WallLayout::new(dimensions, [Position::new(2, 0)]).unwrap_err();
        assert!(matches!(err, SnapshotError::WallOutOfBounds { .. }));
    }

    #[test]
    fn fully_walled_layout_is_rejected() {
        let dimensions = MapDimensions::new(1, 2);
        let err = WallLayout::new(dimensions, dimensions.positions().collect::<Vec<_>>())
            .unwrap_err();
        assert!(matches!(err, SnapshotError::NoOpenCells { .. }));
    }
}
