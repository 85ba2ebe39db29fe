use std::fmt;

use bitflags::bitflags;

/// Discrete grid position expressed in cell coordinates.
///
/// `x` grows eastward and `y` grows northward, matching the host game's
/// coordinate system (row `0` is the bottom of the maze).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell one step in `direction`.
    ///
    /// `Direction::Stop` returns the position unchanged.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Snaps a (possibly fractional) reported coordinate to the nearest cell.
    ///
    /// Rounds half up, so an adversary reported at `(2.5, 3.0)` lands on
    /// `(3, 3)` even if it is still mostly inside `(2, 3)`. This misplacement
    /// is accepted: the host only reports half-steps while an adversary is
    /// between two cells, and either neighbour is a reasonable guess.
    pub fn snap(x: f64, y: f64) -> Self {
        Self::new((x + 0.5).floor() as i32, (y + 0.5).floor() as i32)
    }

    /// Returns the cardinal direction leading from `self` to an adjacent `to`.
    ///
    /// Returns `None` when the cells are identical or not orthogonal neighbours.
    pub fn direction_to(self, to: Position) -> Option<Direction> {
        Direction::CARDINAL
            .into_iter()
            .find(|&direction| self.step(direction) == to)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Movement direction, including the in-place `Stop` action.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    North,
    East,
    South,
    West,
    Stop,
}

impl Direction {
    /// Every direction, in the order candidate moves are evaluated.
    pub const ALL: [Direction; 5] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::Stop,
    ];

    /// The four directions that actually move.
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit offset applied to a position when moving in this direction.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
            Direction::Stop => (0, 0),
        }
    }

    /// 90° counter-clockwise rotation.
    pub const fn left(self) -> Self {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
            Direction::Stop => Direction::Stop,
        }
    }

    /// 90° clockwise rotation.
    pub const fn right(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
            Direction::Stop => Direction::Stop,
        }
    }

    pub const fn reverse(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Stop => Direction::Stop,
        }
    }

    pub const fn is_stop(self) -> bool {
        matches!(self, Direction::Stop)
    }

    const fn flag(self) -> DirectionSet {
        match self {
            Direction::North => DirectionSet::NORTH,
            Direction::East => DirectionSet::EAST,
            Direction::South => DirectionSet::SOUTH,
            Direction::West => DirectionSet::WEST,
            Direction::Stop => DirectionSet::STOP,
        }
    }
}

bitflags! {
    /// Set of directions, typically the legal moves from one cell.
    ///
    /// Iteration through [`DirectionSet::directions`] follows [`Direction::ALL`]
    /// so candidate evaluation order is stable across calls.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct DirectionSet: u8 {
        const NORTH = 1 << 0;
        const EAST  = 1 << 1;
        const SOUTH = 1 << 2;
        const WEST  = 1 << 3;
        const STOP  = 1 << 4;
    }
}

impl DirectionSet {
    pub fn has(self, direction: Direction) -> bool {
        self.contains(direction.flag())
    }

    pub fn with(self, direction: Direction) -> Self {
        self | direction.flag()
    }

    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |&direction| self.has(direction))
    }

    /// Number of open cardinal exits (ignores `Stop`).
    pub fn exits(self) -> u32 {
        (self - DirectionSet::STOP).bits().count_ones()
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<T: IntoIterator<Item = Direction>>(iter: T) -> Self {
        iter.into_iter()
            .fold(DirectionSet::empty(), |set, direction| set.with(direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotations_are_consistent() {
        for direction in Direction::CARDINAL {
            assert_eq!(direction.left().right(), direction);
            assert_eq!(direction.left().left(), direction.reverse());
            assert_eq!(direction.reverse().reverse(), direction);
        }
        assert_eq!(Direction::North.left(), Direction::West);
        assert_eq!(Direction::North.right(), Direction::East);
        assert_eq!(Direction::Stop.left(), Direction::Stop);
    }

    #[test]
    fn snap_rounds_half_up() {
        assert_eq!(Position::snap(2.5, 3.0), Position::new(3, 3));
        assert_eq!(Position::snap(2.4, 3.49), Position::new(2, 3));
        assert_eq!(Position::snap(0.0, 0.5), Position::new(0, 1));
    }

    #[test]
    fn direction_to_neighbour() {
        let origin = Position::new(2, 2);
        assert_eq!(origin.direction_to(Position::new(2, 3)), Some(Direction::North));
        assert_eq!(origin.direction_to(Position::new(1, 2)), Some(Direction::West));
        assert_eq!(origin.direction_to(origin), None);
        assert_eq!(origin.direction_to(Position::new(4, 2)), None);
    }

    #[test]
    fn direction_set_iterates_in_canonical_order() {
        let set: DirectionSet = [Direction::Stop, Direction::West, Direction::North]
            .into_iter()
            .collect();
        let order: Vec<_> = set.directions().collect();
        assert_eq!(order, vec![Direction::North, Direction::West, Direction::Stop]);
        assert_eq!(set.exits(), 2);
    }

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("North".parse::<Direction>().unwrap(), Direction::North);
        assert_eq!("stop".parse::<Direction>().unwrap(), Direction::Stop);
        assert_eq!(Direction::East.to_string(), "east");
    }
}
