use std::collections::BTreeSet;

use crate::env::SnapshotError;
use crate::grid::{MapDimensions, WallLayout};
use crate::state::{Direction, DirectionSet, Position};

/// Transition-success probability used by the host game.
pub const DEFAULT_DIRECTION_PROB: f64 = 0.8;

/// A mobile adversary as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThreatSighting {
    /// Reported coordinate; may be fractional while moving between cells.
    pub x: f64,
    pub y: f64,
    /// Remaining ticks during which the adversary is harmless. `0` means
    /// it is an active threat.
    #[cfg_attr(feature = "serde", serde(default))]
    pub neutralized_for: u32,
}

impl ThreatSighting {
    pub const fn new(x: f64, y: f64, neutralized_for: u32) -> Self {
        Self {
            x,
            y,
            neutralized_for,
        }
    }

    pub fn at(position: Position) -> Self {
        Self::new(position.x as f64, position.y as f64, 0)
    }

    /// Nearest grid cell, see [`Position::snap`].
    pub fn cell(&self) -> Position {
        Position::snap(self.x, self.y)
    }

    pub fn is_neutralized(&self) -> bool {
        self.neutralized_for > 0
    }
}

/// Read-only view of the host world at one decision point.
pub trait WorldOracle {
    fn agent(&self) -> Position;

    fn walls(&self) -> Vec<Position>;

    /// Corner coordinates of the maze; the grid spans up to the largest.
    fn corners(&self) -> Vec<Position>;

    /// Minor consumables.
    fn food(&self) -> Vec<Position>;

    /// Major consumables.
    fn capsules(&self) -> Vec<Position>;

    fn threats(&self) -> Vec<ThreatSighting>;

    /// Moves the host accepts from `position`.
    fn legal_directions(&self, position: Position) -> DirectionSet;

    /// Probability that an attempted move is executed as intended.
    fn direction_prob(&self) -> f64 {
        DEFAULT_DIRECTION_PROB
    }

    fn dimensions(&self) -> Result<MapDimensions, SnapshotError> {
        MapDimensions::from_corners(self.corners()).ok_or(SnapshotError::MissingCorners)
    }
}

/// Checks that every position reported by `world` fits `layout`.
///
/// The reported walls must be exactly the layout's walls. Also verifies that
/// the host's legal moves at the agent's cell agree with the layout, since the
/// solver reasons about moves purely from walls.
pub fn validate<W>(world: &W, layout: &WallLayout) -> Result<(), SnapshotError>
where
    W: WorldOracle + ?Sized,
{
    let expected = layout.dimensions();
    let found = world.dimensions()?;
    if found != expected {
        return Err(SnapshotError::DimensionsChanged { expected, found });
    }

    let in_bounds = |kind: &'static str, position: Position| {
        if expected.contains(position) {
            Ok(())
        } else {
            Err(SnapshotError::OutOfBounds {
                kind,
                position,
                dimensions: expected,
            })
        }
    };

    let walls: BTreeSet<Position> = world.walls().into_iter().collect();
    for &position in &walls {
        in_bounds("wall", position)?;
        if !layout.is_wall(position) {
            return Err(SnapshotError::WallsChanged { position });
        }
    }
    if let Some(position) = layout.walls().find(|position| !walls.contains(position)) {
        return Err(SnapshotError::WallsChanged { position });
    }

    let agent = world.agent();
    in_bounds("agent", agent)?;
    if layout.is_wall(agent) {
        return Err(SnapshotError::OnWall {
            kind: "agent",
            position: agent,
        });
    }
    for position in world.food() {
        in_bounds("food", position)?;
    }
    for position in world.capsules() {
        in_bounds("capsule", position)?;
    }
    for (index, threat) in world.threats().iter().enumerate() {
        if !threat.x.is_finite() || !threat.y.is_finite() {
            return Err(SnapshotError::NonFiniteThreat { index });
        }
        in_bounds("threat", threat.cell())?;
    }

    let legal = world.legal_directions(agent);
    if legal.is_empty() {
        return Err(SnapshotError::NoLegalDirections { position: agent });
    }
    if let Some(direction) = legal
        .directions()
        .find(|&direction| layout.is_wall(agent.step(direction)))
    {
        return Err(SnapshotError::LegalDirectionBlocked {
            position: agent,
            direction,
        });
    }

    Ok(())
}

/// Owned world snapshot, used for replay, tests and hosts without a live API.
///
/// Legal directions are derived from the wall list and corner bounds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldSnapshot {
    pub agent: Position,
    pub corners: Vec<Position>,
    pub walls: Vec<Position>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub food: Vec<Position>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub capsules: Vec<Position>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub threats: Vec<ThreatSighting>,
    #[cfg_attr(feature = "serde", serde(default = "default_direction_prob"))]
    pub direction_prob: f64,
}

#[cfg(feature = "serde")]
fn default_direction_prob() -> f64 {
    DEFAULT_DIRECTION_PROB
}

impl WorldSnapshot {
    /// Snapshot of an empty maze of the given size with the agent at `agent`.
    pub fn new(dimensions: MapDimensions, agent: Position) -> Self {
        let max_x = dimensions.width.saturating_sub(1) as i32;
        let max_y = dimensions.height.saturating_sub(1) as i32;
        Self {
            agent,
            corners: vec![
                Position::new(0, 0),
                Position::new(max_x, 0),
                Position::new(0, max_y),
                Position::new(max_x, max_y),
            ],
            walls: Vec::new(),
            food: Vec::new(),
            capsules: Vec::new(),
            threats: Vec::new(),
            direction_prob: DEFAULT_DIRECTION_PROB,
        }
    }

    pub fn with_walls<I: IntoIterator<Item = Position>>(mut self, walls: I) -> Self {
        self.walls.extend(walls);
        self
    }

    pub fn with_food<I: IntoIterator<Item = Position>>(mut self, food: I) -> Self {
        self.food.extend(food);
        self
    }

    pub fn with_capsules<I: IntoIterator<Item = Position>>(mut self, capsules: I) -> Self {
        self.capsules.extend(capsules);
        self
    }

    pub fn with_threat(mut self, threat: ThreatSighting) -> Self {
        self.threats.push(threat);
        self
    }

    pub fn with_direction_prob(mut self, direction_prob: f64) -> Self {
        self.direction_prob = direction_prob;
        self
    }

    fn is_open(&self, position: Position) -> bool {
        self.dimensions()
            .is_ok_and(|dimensions| dimensions.contains(position))
            && !self.walls.contains(&position)
    }
}

impl WorldOracle for WorldSnapshot {
    fn agent(&self) -> Position {
        self.agent
    }

    fn walls(&self) -> Vec<Position> {
        self.walls.clone()
    }

    fn corners(&self) -> Vec<Position> {
        self.corners.clone()
    }

    fn food(&self) -> Vec<Position> {
        self.food.clone()
    }

    fn capsules(&self) -> Vec<Position> {
        self.capsules.clone()
    }

    fn threats(&self) -> Vec<ThreatSighting> {
        self.threats.clone()
    }

    fn legal_directions(&self, position: Position) -> DirectionSet {
        Direction::CARDINAL
            .into_iter()
            .filter(|&direction| self.is_open(position.step(direction)))
            .fold(DirectionSet::STOP, |set, direction| set.with(direction))
    }

    fn direction_prob(&self) -> f64 {
        self.direction_prob
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CoreError, ErrorSeverity};

    fn corridor() -> WorldSnapshot {
        WorldSnapshot::new(MapDimensions::new(5, 1), Position::new(0, 0))
    }

    fn layout_of(world: &WorldSnapshot) -> WallLayout {
        WallLayout::new(world.dimensions().unwrap(), world.walls()).unwrap()
    }

    #[test]
    fn snapshot_derives_legal_directions_from_walls() {
        let world = corridor().with_walls([Position::new(2, 0)]);
        let legal = world.legal_directions(Position::new(1, 0));
        assert!(legal.has(Direction::West));
        assert!(legal.has(Direction::Stop));
        assert!(!legal.has(Direction::East));
        assert!(!legal.has(Direction::North));
    }

    #[test]
    fn valid_snapshot_passes() {
        let world = corridor()
            .with_food([Position::new(4, 0)])
            .with_threat(ThreatSighting::new(2.5, 0.0, 0));
        assert_eq!(validate(&world, &layout_of(&world)), Ok(()));
    }

    #[test]
    fn out_of_bounds_food_is_rejected() {
        let world = corridor().with_food([Position::new(5, 0)]);
        let err = validate(&world, &layout_of(&world)).unwrap_err();
        assert!(matches!(err, SnapshotError::OutOfBounds { kind: "food", .. }));
    }

    #[test]
    fn agent_on_wall_is_rejected() {
        let world = corridor().with_walls([Position::new(0, 0)]);
        let err = validate(&world, &layout_of(&world)).unwrap_err();
        assert!(matches!(err, SnapshotError::OnWall { kind: "agent", .. }));
    }

    #[test]
    fn resized_grid_is_rejected() {
        let world = corridor();
        let layout = WallLayout::open(MapDimensions::new(6, 1));
        let err = validate(&world, &layout).unwrap_err();
        assert!(matches!(err, SnapshotError::DimensionsChanged { .. }));
    }

    #[test]
    fn walls_outside_the_corners_are_rejected() {
        let layout = layout_of(&corridor());
        let world = corridor().with_walls([Position::new(99, 99)]);
        let err = validate(&world, &layout).unwrap_err();
        assert!(matches!(err, SnapshotError::OutOfBounds { kind: "wall", .. }));
    }

    #[test]
    fn wall_set_must_match_layout() {
        let walled = corridor().with_walls([Position::new(2, 0)]);

        let err = validate(&walled, &layout_of(&corridor())).unwrap_err();
        assert_eq!(err, SnapshotError::WallsChanged { position: Position::new(2, 0) });
        assert_eq!(err.severity(), ErrorSeverity::Validation);

        let err = validate(&corridor(), &layout_of(&walled)).unwrap_err();
        assert_eq!(err, SnapshotError::WallsChanged { position: Position::new(2, 0) });

        let repeated = walled.clone().with_walls([Position::new(2, 0)]);
        assert_eq!(validate(&repeated, &layout_of(&walled)), Ok(()));
    }

    #[test]
    fn non_finite_threat_is_rejected() {
        let world = corridor().with_threat(ThreatSighting::new(f64::NAN, 0.0, 0));
        let err = validate(&world, &layout_of(&world)).unwrap_err();
        assert_eq!(err, SnapshotError::NonFiniteThreat { index: 0 });
    }

    #[test]
    fn host_legal_moves_must_match_layout() {
        struct Lying(WorldSnapshot);

        impl WorldOracle for Lying {
            fn agent(&self) -> Position {
                self.0.agent()
            }
            fn walls(&self) -> Vec<Position> {
                self.0.walls()
            }
            fn corners(&self) -> Vec<Position> {
                self.0.corners()
            }
            fn food(&self) -> Vec<Position> {
                Vec::new()
            }
            fn capsules(&self) -> Vec<Position> {
                Vec::new()
            }
            fn threats(&self) -> Vec<ThreatSighting> {
                Vec::new()
            }
            fn legal_directions(&self, _position: Position) -> DirectionSet {
                DirectionSet::STOP | DirectionSet::WEST
            }
        }

        let world = Lying(corridor());
        let err = validate(&world, &layout_of(&world.0)).unwrap_err();
        assert_eq!(
            err,
            SnapshotError::LegalDirectionBlocked {
                position: Position::new(0, 0),
                direction: Direction::West,
            }
        );
    }
}
