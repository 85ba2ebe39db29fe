use std::fmt;

use super::{MapDimensions, WallLayout};
use crate::state::Position;

/// One cell of a reward or utility grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cell {
    /// Blocking cell; never carries a numeric value.
    Wall,
    Value(f64),
}

impl Cell {
    pub fn value(self) -> Option<f64> {
        match self {
            Cell::Wall => None,
            Cell::Value(value) => Some(value),
        }
    }

    pub fn is_wall(self) -> bool {
        matches!(self, Cell::Wall)
    }
}

/// Dense grid of [`Cell`]s sharing the shape and walls of a [`WallLayout`].
///
/// Wall cells are fixed at construction; every mutator leaves them untouched,
/// so a grid built from a layout keeps that layout's walls for its lifetime.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueGrid {
    dimensions: MapDimensions,
    cells: Vec<Cell>,
}

impl ValueGrid {
    /// Creates a grid with walls from `layout` and `fill` everywhere else.
    pub fn from_layout(layout: &WallLayout, fill: f64) -> Self {
        let dimensions = layout.dimensions();
        let cells = dimensions
            .positions()
            .map(|position| {
                if layout.is_wall(position) {
                    Cell::Wall
                } else {
                    Cell::Value(fill)
                }
            })
            .collect();

        Self { dimensions, cells }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn get(&self, position: Position) -> Option<Cell> {
        self.dimensions
            .index(position)
            .map(|index| self.cells[index])
    }

    /// Numeric value at `position`; `None` for walls and out-of-bounds cells.
    pub fn value(&self, position: Position) -> Option<f64> {
        self.get(position).and_then(Cell::value)
    }

    /// Adds `amount` to a non-wall cell. Returns `false` if nothing changed.
    pub fn add(&mut self, position: Position, amount: f64) -> bool {
        match self.cell_mut(position) {
            Some(Cell::Value(value)) => {
                *value += amount;
                true
            }
            _ => false,
        }
    }

    /// Overwrites a non-wall cell. Returns `false` for walls and out of bounds.
    pub fn set(&mut self, position: Position, value: f64) -> bool {
        match self.cell_mut(position) {
            Some(Cell::Value(current)) => {
                *current = value;
                true
            }
            _ => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (self.dimensions.position(index), *cell))
    }

    /// Returns true when this grid has exactly the shape and walls of `layout`.
    pub fn matches_layout(&self, layout: &WallLayout) -> bool {
        self.dimensions == layout.dimensions()
            && self
                .iter()
                .all(|(position, cell)| cell.is_wall() == layout.is_wall(position))
    }

    fn cell_mut(&mut self, position: Position) -> Option<&mut Cell> {
        self.dimensions
            .index(position)
            .map(|index| &mut self.cells[index])
    }
}

/// Renders the grid top row first, walls as `W`, values rounded to integers.
impl fmt::Display for ValueGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.dimensions.height as i32).rev() {
            for x in 0..self.dimensions.width as i32 {
                match self.get(Position::new(x, y)) {
                    Some(Cell::Value(value)) => write!(f, "{:>6.0}", value)?,
                    _ => write!(f, "{:>6}", "W")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
