//! Bounded directional reachability over a wall layout.
//!
//! Two flavours share the same stepping rule (advance while budget remains and
//! no wall blocks):
//!
//! - **Branching**: from every cell stepped onto, also explore the left and
//!   right rotations of the current heading with the remaining budget. This
//!   approximates where a mobile adversary can be within `N` moves if it
//!   mostly keeps going and never doubles back.
//! - **Straight**: only the straight run, i.e. what is visible along a line.
//!
//! Results are owned lists of `(cell, distance)` pairs. A cell reached along
//! several paths is reported once, with its shortest distance.
//!
//! Within one walk a `(cell, heading)` state is expanded again only when it is
//! reached at a strictly shorter distance, so the cost grows with the number
//! of such states rather than with the number of paths.

use std::collections::BTreeMap;

use super::WallLayout;
use crate::state::{Direction, Position};

/// A cell reached by a search, with the number of steps taken to reach it.
///
/// `distance` is always in `1..=budget`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Reach {
    pub position: Position,
    pub distance: u32,
}

/// Pure searches over an immutable [`WallLayout`].
#[derive(Clone, Copy, Debug)]
pub struct ReachabilitySearch<'a> {
    layout: &'a WallLayout,
}

impl<'a> ReachabilitySearch<'a> {
    pub fn new(layout: &'a WallLayout) -> Self {
        Self { layout }
    }

    /// Branching search from `source` starting along `heading`.
    pub fn branching(&self, source: Position, heading: Direction, budget: u32) -> Vec<Reach> {
        let mut found = BTreeMap::new();
        Walk::new(self.layout, budget, true, &mut found).run(source, heading, 0);
        Self::collect(source, found)
    }

    /// Straight run from `source` along `heading`, stopping at the first wall.
    pub fn straight(&self, source: Position, heading: Direction, budget: u32) -> Vec<Reach> {
        let mut found = BTreeMap::new();
        Walk::new(self.layout, budget, false, &mut found).run(source, heading, 0);
        Self::collect(source, found)
    }

    /// Straight runs in all four cardinal directions.
    pub fn sightlines(&self, source: Position, budget: u32) -> Vec<Reach> {
        let mut found = BTreeMap::new();
        for heading in Direction::CARDINAL {
            Walk::new(self.layout, budget, false, &mut found).run(source, heading, 0);
        }
        Self::collect(source, found)
    }

    /// Cells an adversary at `source` may plausibly occupy within `budget` moves.
    ///
    /// With a known `heading` the search explores all four headings, but the
    /// one straight behind the adversary gets half the budget. Without a
    /// heading, or when the adversary stands on a junction with at least
    /// `junction_exits` open exits, all four headings get the full budget.
    pub fn threat_projection(
        &self,
        source: Position,
        heading: Option<Direction>,
        budget: u32,
        junction_exits: u32,
    ) -> Vec<Reach> {
        let at_junction = self.layout.legal_directions(source).exits() >= junction_exits;
        let behind = match heading {
            Some(heading) if !heading.is_stop() && !at_junction => Some(heading.reverse()),
            _ => None,
        };

        let mut found = BTreeMap::new();
        for direction in Direction::CARDINAL {
            let budget = if Some(direction) == behind {
                budget / 2
            } else {
                budget
            };
            Walk::new(self.layout, budget, true, &mut found).run(source, direction, 0);
        }
        Self::collect(source, found)
    }

    fn collect(source: Position, found: BTreeMap<Position, u32>) -> Vec<Reach> {
        found
            .into_iter()
            .filter(|(position, _)| *position != source)
            .map(|(position, distance)| Reach { position, distance })
            .collect()
    }
}

/// One walk from a fixed root with a fixed budget.
struct Walk<'a, 'f> {
    layout: &'a WallLayout,
    budget: u32,
    branch: bool,
    found: &'f mut BTreeMap<Position, u32>,
    /// Shortest distance at which each `(cell, heading)` was expanded.
    expanded: BTreeMap<(Position, Direction), u32>,
}

impl<'a, 'f> Walk<'a, 'f> {
    fn new(
        layout: &'a WallLayout,
        budget: u32,
        branch: bool,
        found: &'f mut BTreeMap<Position, u32>,
    ) -> Self {
        Self {
            layout,
            budget,
            branch,
            found,
            expanded: BTreeMap::new(),
        }
    }

    fn run(&mut self, from: Position, heading: Direction, travelled: u32) {
        if heading.is_stop() {
            return;
        }

        let mut position = from;
        let mut distance = travelled;
        while distance < self.budget {
            let next = position.step(heading);
            if self.layout.is_wall(next) {
                break;
            }
            position = next;
            distance += 1;
            self.found
                .entry(position)
                .and_modify(|best| *best = (*best).min(distance))
                .or_insert(distance);

            // same budget for the whole walk, so an earlier visit at no greater
            // distance already covered everything reachable from here
            match self.expanded.get(&(position, heading)) {
                Some(&seen) if seen <= distance => return,
                _ => {
                    self.expanded.insert((position, heading), distance);
                }
            }

            if self.branch {
                self.run(position, heading.left(), distance);
                self.run(position, heading.right(), distance);
            }
        }
    }
}
