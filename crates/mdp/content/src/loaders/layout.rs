//! ASCII maze layout loader.
//!
//! Turns a layout file into a [`WorldSnapshot`] at its starting position, so
//! the same maze can drive tests, replays and offline tuning.

use std::path::Path;

use mdp_core::{MapDimensions, Position, ThreatSighting, WorldSnapshot};

use crate::layouts::{BuiltinLayout, LayoutSymbol};
use crate::loaders::{LoadResult, read_file};

/// Loader for ASCII layouts (see [`LayoutSymbol`]).
pub struct LayoutLoader;

impl LayoutLoader {
    pub fn load(path: &Path) -> LoadResult<WorldSnapshot> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load layout {}: {}", path.display(), e))
    }

    pub fn builtin(layout: BuiltinLayout) -> LoadResult<WorldSnapshot> {
        Self::parse(layout.source())
    }

    /// Parses layout text. Trailing blank lines are ignored; every other line
    /// must have the same width. Exactly one agent is required.
    pub fn parse(content: &str) -> LoadResult<WorldSnapshot> {
        let rows: Vec<&str> = content
            .trim_end_matches(['\n', '\r'])
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect();
        if rows.is_empty() || rows[0].is_empty() {
            anyhow::bail!("Layout is empty");
        }

        let width = rows[0].chars().count();
        let height = rows.len();
        let mut walls = Vec::new();
        let mut food = Vec::new();
        let mut capsules = Vec::new();
        let mut threats = Vec::new();
        let mut agent = None;

        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != width {
                anyhow::bail!(
                    "Layout line {} has width {}, expected {}",
                    row + 1,
                    line.chars().count(),
                    width
                );
            }
            let y = (height - 1 - row) as i32;
            for (x, symbol) in line.chars().enumerate() {
                let position = Position::new(x as i32, y);
                match LayoutSymbol::from_char(symbol) {
                    Some(LayoutSymbol::Wall) => walls.push(position),
                    Some(LayoutSymbol::Empty) => {}
                    Some(LayoutSymbol::Food) => food.push(position),
                    Some(LayoutSymbol::Capsule) => capsules.push(position),
                    Some(LayoutSymbol::Threat) => threats.push(ThreatSighting::at(position)),
                    Some(LayoutSymbol::Agent) => {
                        if let Some(first) = agent.replace(position) {
                            anyhow::bail!(
                                "Layout has a second agent at {} (first at {})",
                                position,
                                first
                            );
                        }
                    }
                    None => anyhow::bail!(
                        "Unknown layout symbol {:?} at line {}, column {}",
                        symbol,
                        row + 1,
                        x + 1
                    ),
                }
            }
        }

        let agent = agent.ok_or_else(|| anyhow::anyhow!("Layout has no agent"))?;
        let dimensions = MapDimensions::new(width as u32, height as u32);
        let snapshot = threats.into_iter().fold(
            WorldSnapshot::new(dimensions, agent)
                .with_walls(walls)
                .with_food(food)
                .with_capsules(capsules),
            WorldSnapshot::with_threat,
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use mdp_core::{Direction, GridKind, WorldOracle};

    use super::*;

    #[test]
    fn first_line_is_the_top_row() {
        let snapshot = LayoutLoader::parse("%%%\n%.%\n%P%\n%%%\n").unwrap();
        assert_eq!(snapshot.agent, Position::new(1, 1));
        assert_eq!(snapshot.food, vec![Position::new(1, 2)]);
        assert_eq!(snapshot.dimensions().unwrap(), MapDimensions::new(3, 4));

        let legal = snapshot.legal_directions(snapshot.agent);
        assert!(legal.has(Direction::North));
        assert!(!legal.has(Direction::South));
    }

    #[test]
    fn builtin_layouts_resolve_to_standard_kinds() {
        let small = LayoutLoader::builtin(BuiltinLayout::SmallGrid).unwrap();
        assert_eq!(GridKind::resolve(small.dimensions().unwrap()), GridKind::Small);

        let classic = LayoutLoader::builtin(BuiltinLayout::MediumClassic).unwrap();
        assert_eq!(GridKind::resolve(classic.dimensions().unwrap()), GridKind::Classic);
        assert_eq!(classic.threats.len(), 2);
        assert_eq!(classic.threats[0].cell(), Position::new(8, 5));
        assert_eq!(classic.capsules.len(), 2);
    }

    #[test]
    fn ragged_lines_are_rejected() {
        let err = LayoutLoader::parse("%%%\n%P\n%%%").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn agent_is_required_and_unique() {
        assert!(LayoutLoader::parse("%%%\n% %\n%%%").is_err());
        assert!(LayoutLoader::parse("%%%%\n%PP%\n%%%%").is_err());
    }

    #[test]
    fn unknown_symbols_are_rejected() {
        let err = LayoutLoader::parse("%%%\n%P#\n%%%").unwrap_err();
        assert!(err.to_string().contains("column 3"));
    }
}
