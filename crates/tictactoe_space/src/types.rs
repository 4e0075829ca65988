//! Core domain types for tic-tac-toe.

use crate::error::MoveError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Player mark.
///
/// Numeric ids follow the grid convention: `O = 0`, `X = 1`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Mark {
    /// Player O (id 0).
    O,
    /// Player X (id 1).
    X,
}

impl Mark {
    /// Returns the opponent mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Numeric player id (`O = 0`, `X = 1`).
    pub fn id(self) -> u8 {
        match self {
            Mark::O => 0,
            Mark::X => 1,
        }
    }

    /// Mark for a numeric player id.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Mark::O),
            1 => Some(Mark::X),
            _ => None,
        }
    }

    /// Maps a "plays X" flag to a mark.
    pub fn from_plays_x(plays_x: bool) -> Self {
        if plays_x { Mark::X } else { Mark::O }
    }
}

/// A square on the board: empty or holding a mark.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square holding an O.
    O,
    /// Square holding an X.
    X,
}

impl Square {
    /// Mark held by this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::O => Some(Mark::O),
            Square::X => Some(Mark::X),
        }
    }

    /// True when no mark is present.
    pub fn is_empty(self) -> bool {
        self == Square::Empty
    }

    /// Single-character rendering.
    pub fn symbol(self) -> char {
        match self {
            Square::Empty => '.',
            Square::O => 'O',
            Square::X => 'X',
        }
    }
}

impl From<Mark> for Square {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::O => Square::O,
            Mark::X => Square::X,
        }
    }
}

/// A `(row, col)` coordinate on the 3x3 grid.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("({}, {})", row, col)]
pub struct Cell {
    row: u8,
    col: u8,
}

impl Cell {
    /// Side length of the grid.
    pub const SIDE: usize = 3;

    /// All nine cells in row-major order.
    pub const ALL: [Cell; 9] = [
        Cell { row: 0, col: 0 },
        Cell { row: 0, col: 1 },
        Cell { row: 0, col: 2 },
        Cell { row: 1, col: 0 },
        Cell { row: 1, col: 1 },
        Cell { row: 1, col: 2 },
        Cell { row: 2, col: 0 },
        Cell { row: 2, col: 1 },
        Cell { row: 2, col: 2 },
    ];

    /// Creates a cell, rejecting coordinates outside the grid.
    #[instrument]
    pub fn try_new(row: usize, col: usize) -> Result<Self, MoveError> {
        if row >= Self::SIDE || col >= Self::SIDE {
            return Err(MoveError::OutOfRange { row, col });
        }
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    /// Cell for a row-major index (0-8).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Row-major index (0-8).
    pub fn index(self) -> usize {
        self.row() * Self::SIDE + self.col()
    }

    /// Row (0-2).
    pub fn row(self) -> usize {
        usize::from(self.row)
    }

    /// Column (0-2).
    pub fn col(self) -> usize {
        usize::from(self.col)
    }
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player completed a line.
    Winner(Mark),
    /// Board filled with no line.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Winner(mark) => Some(*mark),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(mark) => write!(f, "Player {} wins", mark),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
