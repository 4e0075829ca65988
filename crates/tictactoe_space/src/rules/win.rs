//! Win detection logic for tic-tac-toe.

use crate::types::{Mark, Square};
use strum::IntoEnumIterator;

/// One of the eight winning lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
pub enum Line {
    /// Row 0.
    TopRow,
    /// Row 1.
    MiddleRow,
    /// Row 2.
    BottomRow,
    /// Column 0.
    LeftColumn,
    /// Column 1.
    CenterColumn,
    /// Column 2.
    RightColumn,
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl Line {
    /// Row-major indices covered by this line.
    pub fn indices(self) -> [usize; 3] {
        match self {
            Line::TopRow => [0, 1, 2],
            Line::MiddleRow => [3, 4, 5],
            Line::BottomRow => [6, 7, 8],
            Line::LeftColumn => [0, 3, 6],
            Line::CenterColumn => [1, 4, 7],
            Line::RightColumn => [2, 5, 8],
            Line::Diagonal => [0, 4, 8],
            Line::AntiDiagonal => [2, 4, 6],
        }
    }

    /// True if every square on the line holds `mark`.
    pub fn held_by(self, squares: &[Square; 9], mark: Mark) -> bool {
        let square = Square::from(mark);
        self.indices().iter().all(|&i| squares[i] == square)
    }
}

/// First line completed by `mark`, if any.
pub fn winning_line(squares: &[Square; 9], mark: Mark) -> Option<Line> {
    Line::iter().find(|line| line.held_by(squares, mark))
}

/// True if `mark` holds any row, column or diagonal.
pub fn has_line(squares: &[Square; 9], mark: Mark) -> bool {
    winning_line(squares, mark).is_some()
}
