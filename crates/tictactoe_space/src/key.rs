//! Canonical state keys.
//!
//! A key is the full 9-cell grid plus the mark to play. No symmetry
//! reduction is applied: reflections and rotations are distinct states.

use crate::types::{Cell, Mark, Square};
use serde::{Deserialize, Serialize};

/// Identity of a board position for enumeration and policy lookup.
///
/// Two boards with equal keys are interchangeable regardless of the move
/// order that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StateKey {
    squares: [Square; 9],
    turn: Mark,
}

impl StateKey {
    /// Creates a key from squares in row-major order and the mark to play.
    pub fn new(squares: [Square; 9], turn: Mark) -> Self {
        Self { squares, turn }
    }

    /// Squares in row-major order.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Mark to play (the last mover on terminal states).
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Square at a cell.
    pub fn square(&self, cell: Cell) -> Square {
        self.squares[cell.index()]
    }

    /// Number of occupied squares.
    pub fn occupied(&self) -> usize {
        self.squares.iter().filter(|s| !s.is_empty()).count()
    }

    /// Cells whose contents differ between two keys, in row-major order.
    pub fn changed_cells(&self, other: &StateKey) -> Vec<Cell> {
        Cell::ALL
            .iter()
            .copied()
            .filter(|cell| self.square(*cell) != other.square(*cell))
            .collect()
    }
}

impl std::fmt::Display for StateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for square in &self.squares {
            write!(f, "{}", square.symbol())?;
        }
        write!(f, ":{}", self.turn)
    }
}
