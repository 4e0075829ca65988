//! Mutable 3x3 board with turn tracking and terminal detection.

use crate::error::{InvariantViolation, MoveError, Result};
use crate::key::StateKey;
use crate::rules;
use crate::types::{Cell, Mark, Outcome, Square};
use tracing::{debug, instrument, warn};

/// 3x3 tic-tac-toe board and game state.
///
/// Invariants:
/// - `move_count` equals the number of occupied squares
/// - `terminal` never reverts once set
/// - `winner` is set iff exactly one mark holds a line
///
/// After the final move the turn is not flipped, so a terminal board's
/// `turn` is the last mover.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Square; 9],
    start_x: bool,
    turn: Mark,
    move_count: u8,
    terminal: bool,
    winner: Option<Mark>,
}

impl Board {
    /// Creates an empty board. `start_x` selects X as the first mover.
    #[instrument]
    pub fn new(start_x: bool) -> Self {
        Self {
            squares: [Square::Empty; 9],
            start_x,
            turn: Mark::from_plays_x(start_x),
            move_count: 0,
            terminal: false,
            winner: None,
        }
    }

    /// Rebuilds a board from a state key.
    ///
    /// `move_count`, `terminal` and `winner` are recomputed from the squares.
    /// The key must be reachable from an empty board where `start_x` picks
    /// the first mover: the first mover holds as many marks as the second or
    /// one more, and the turn owner is the next mover (the last mover once
    /// terminal).
    ///
    /// # Errors
    ///
    /// - `InvariantViolation::BothPlayersWin` if both marks hold a line
    /// - `InvariantViolation::UnreachableKey` if counts, turn or winner do
    ///   not fit the first mover
    #[instrument(skip(key), fields(key = %key))]
    pub fn from_key(key: &StateKey, start_x: bool) -> Result<Self> {
        let squares = *key.squares();
        let outcome = rules::outcome(&squares, key.turn())?;

        let first = Mark::from_plays_x(start_x);
        let count = |mark: Mark| squares.iter().filter(|sq| sq.mark() == Some(mark)).count();
        let (leading, trailing) = (count(first), count(first.opponent()));
        let first_moved_last = leading == trailing + 1;
        let expected_turn = match (outcome.is_some(), first_moved_last) {
            (false, false) | (true, true) => first,
            (false, true) | (true, false) => first.opponent(),
        };
        let winner_moved_last = outcome
            .and_then(|o| o.winner())
            .is_none_or(|winner| winner == key.turn());
        if !(leading == trailing || first_moved_last)
            || key.turn() != expected_turn
            || !winner_moved_last
        {
            warn!(%first, leading, trailing, "Key not reachable from this start");
            return Err(InvariantViolation::UnreachableKey { key: *key, first }.into());
        }

        Ok(Self {
            squares,
            start_x,
            turn: key.turn(),
            move_count: key.occupied() as u8,
            terminal: outcome.is_some(),
            winner: outcome.and_then(|o| o.winner()),
        })
    }

    /// Places the current mover's mark at `(row, col)`.
    ///
    /// # Errors
    ///
    /// - `MoveError::GameOver` once the board is terminal
    /// - `MoveError::OutOfRange` for coordinates outside `0..3`
    /// - `MoveError::SquareOccupied` for a non-empty target
    /// - `InvariantViolation::BothPlayersWin` if the result is inconsistent
    ///
    /// The board is unchanged on every error.
    #[instrument(skip(self), fields(turn = %self.turn, move_count = self.move_count))]
    pub fn apply_move(&mut self, row: usize, col: usize) -> Result<()> {
        if self.terminal {
            warn!(row, col, "Move rejected: game is over");
            return Err(MoveError::GameOver.into());
        }
        let cell = Cell::try_new(row, col).inspect_err(|_| {
            warn!(row, col, "Move rejected: out of range");
        })?;
        self.place(cell)
    }

    /// Places the current mover's mark at `cell`.
    ///
    /// Same contract as [`Board::apply_move`] for an in-range cell.
    pub fn place(&mut self, cell: Cell) -> Result<()> {
        if self.terminal {
            warn!(%cell, "Move rejected: game is over");
            return Err(MoveError::GameOver.into());
        }
        if !self.squares[cell.index()].is_empty() {
            warn!(%cell, "Move rejected: square occupied");
            return Err(MoveError::SquareOccupied(cell).into());
        }

        let mover = self.turn;
        let mut squares = self.squares;
        squares[cell.index()] = Square::from(mover);
        let outcome = rules::outcome(&squares, mover)?;

        self.squares = squares;
        self.move_count += 1;
        match outcome {
            Some(outcome) => {
                self.terminal = true;
                self.winner = outcome.winner();
                debug!(%cell, %mover, %outcome, "Game finished");
            }
            None => {
                self.turn = mover.opponent();
                debug!(%cell, %mover, "Mark placed");
            }
        }
        Ok(())
    }

    /// Empty cells in row-major order; empty once terminal.
    pub fn legal_moves(&self) -> Vec<Cell> {
        if self.terminal {
            return Vec::new();
        }
        Cell::ALL
            .iter()
            .copied()
            .filter(|cell| self.squares[cell.index()].is_empty())
            .collect()
    }

    /// True if `mark` holds any row, column or diagonal.
    pub fn victory(&self, mark: Mark) -> bool {
        rules::has_line(&self.squares, mark)
    }

    /// Canonical key: all nine squares and the mark to play.
    pub fn canonical_key(&self) -> StateKey {
        StateKey::new(self.squares, self.turn)
    }

    /// Checks if every square is occupied.
    pub fn is_full(&self) -> bool {
        rules::is_full(&self.squares)
    }

    /// Square at a cell.
    pub fn square(&self, cell: Cell) -> Square {
        self.squares[cell.index()]
    }

    /// Squares in row-major order.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// True when X moved first.
    pub fn start_x(&self) -> bool {
        self.start_x
    }

    /// Mark to play (the last mover once terminal).
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Number of marks placed.
    pub fn move_count(&self) -> usize {
        usize::from(self.move_count)
    }

    /// True after a win or a full board.
    pub fn terminal(&self) -> bool {
        self.terminal
    }

    /// Winning mark, if any.
    pub fn winner(&self) -> Option<Mark> {
        self.winner
    }

    /// Outcome once terminal.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.terminal {
            return None;
        }
        Some(self.winner.map_or(Outcome::Draw, Outcome::Winner))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(true)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..Cell::SIDE {
            for col in 0..Cell::SIDE {
                write!(f, "{}", self.squares[row * Cell::SIDE + col].symbol())?;
                if col < Cell::SIDE - 1 {
                    write!(f, "|")?;
                }
            }
            if row < Cell::SIDE - 1 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}
