//! Reward profiles and the grid kinds that select them.
//!
//! A profile is chosen once per episode from the measured grid size and stays
//! fixed until the episode ends.

use crate::grid::MapDimensions;
use crate::state::Position;

/// Immediate reward constants used to build a reward map.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardProfile {
    pub empty: f64,
    pub threat: f64,
    /// Full-duration value of a neutralized adversary, scaled down as the
    /// neutralization wears off.
    pub threat_neutralized: f64,
    pub consumable_minor: f64,
    pub consumable_major: f64,
    /// Added at the agent's own cell to discourage standing still.
    pub agent: f64,
    pub danger_zone: f64,
}

impl RewardProfile {
    /// Sparse small grid: mild penalties, so a few consumables dominate.
    pub const SMALL: Self = Self {
        empty: 0.0,
        threat: -3.0,
        threat_neutralized: 30.0,
        consumable_minor: 2.0,
        consumable_major: 11.0,
        agent: -5.0,
        danger_zone: 0.0,
    };

    /// Larger classic maze: every step costs, threats are severe.
    pub const CLASSIC: Self = Self {
        empty: -1.0,
        threat: -300.0,
        threat_neutralized: 100.0,
        consumable_minor: 10.0,
        consumable_major: 15.0,
        agent: -5.0,
        danger_zone: -20.0,
    };
}

/// Axis-aligned inclusive rectangle of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub min: Position,
    pub max: Position,
}

impl CellRect {
    pub const fn new(min: Position, max: Position) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, position: Position) -> bool {
        (self.min.x..=self.max.x).contains(&position.x)
            && (self.min.y..=self.max.y).contains(&position.y)
    }

    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (self.min.y..=self.max.y)
            .flat_map(move |y| (self.min.x..=self.max.x).map(move |x| Position::new(x, y)))
    }
}

/// Grid families with their own reward tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum GridKind {
    /// 7×7 small grid.
    Small,
    /// 20×11 classic maze with a known spawn chokepoint.
    Classic,
    /// Any other size: classic rewards, no chokepoint.
    Custom,
}

impl GridKind {
    pub const SMALL_DIMENSIONS: MapDimensions = MapDimensions::new(7, 7);
    pub const CLASSIC_DIMENSIONS: MapDimensions = MapDimensions::new(20, 11);

    /// Cells in front of the adversary spawn area of the classic maze.
    pub const CLASSIC_CHOKEPOINT: CellRect =
        CellRect::new(Position::new(8, 5), Position::new(11, 5));

    pub fn resolve(dimensions: MapDimensions) -> Self {
        if dimensions == Self::SMALL_DIMENSIONS {
            GridKind::Small
        } else if dimensions == Self::CLASSIC_DIMENSIONS {
            GridKind::Classic
        } else {
            GridKind::Custom
        }
    }

    pub const fn default_profile(self) -> RewardProfile {
        match self {
            GridKind::Small => RewardProfile::SMALL,
            GridKind::Classic | GridKind::Custom => RewardProfile::CLASSIC,
        }
    }

    pub const fn danger_zone(self) -> Option<CellRect> {
        match self {
            GridKind::Classic => Some(Self::CLASSIC_CHOKEPOINT),
            GridKind::Small | GridKind::Custom => None,
        }
    }
}

/// Reward profile per grid kind, defaulting to the built-in tunings.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProfileTable {
    pub small: RewardProfile,
    pub classic: RewardProfile,
    pub custom: RewardProfile,
}

impl ProfileTable {
    pub fn get(&self, kind: GridKind) -> RewardProfile {
        match kind {
            GridKind::Small => self.small,
            GridKind::Classic => self.classic,
            GridKind::Custom => self.custom,
        }
    }
}

impl Default for ProfileTable {
    fn default() -> Self {
        Self {
            small: GridKind::Small.default_profile(),
            classic: GridKind::Classic.default_profile(),
            custom: GridKind::Custom.default_profile(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_kind_from_dimensions() {
        assert_eq!(GridKind::resolve(MapDimensions::new(7, 7)), GridKind::Small);
        assert_eq!(GridKind::resolve(MapDimensions::new(20, 11)), GridKind::Classic);
        assert_eq!(GridKind::resolve(MapDimensions::new(5, 1)), GridKind::Custom);
    }

    #[test]
    fn only_classic_has_a_chokepoint() {
        let zone = GridKind::Classic.danger_zone().unwrap();
        let cells: Vec<_> = zone.cells().collect();
        assert_eq!(cells.len(), 4);
        assert!(cells.iter().all(|cell| cell.y == 5));
        assert!(zone.contains(Position::new(8, 5)));
        assert!(!zone.contains(Position::new(12, 5)));
        assert_eq!(GridKind::Small.danger_zone(), None);
        assert_eq!(GridKind::Custom.danger_zone(), None);
    }

    #[test]
    fn default_table_matches_built_ins() {
        let table = ProfileTable::default();
        assert_eq!(table.get(GridKind::Small), RewardProfile::SMALL);
        assert_eq!(table.get(GridKind::Custom), RewardProfile::CLASSIC);
    }
}
