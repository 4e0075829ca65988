//! Game rules for tic-tac-toe.
//!
//! Pure functions over a row-major square array. Rules are separated from
//! board storage so enumeration and key validation share them.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{Line, has_line, winning_line};

use crate::error::{InvariantViolation, Result};
use crate::key::StateKey;
use crate::types::{Mark, Outcome, Square};
use tracing::{instrument, warn};

/// Evaluates a grid after `mover` has placed a mark.
///
/// The mover's lines are checked first, then the opponent's. Returns `None`
/// while play continues.
///
/// # Errors
///
/// Returns `InvariantViolation::BothPlayersWin` if both marks hold a line.
#[instrument(skip(squares))]
pub fn outcome(squares: &[Square; 9], mover: Mark) -> Result<Option<Outcome>> {
    let mover_wins = has_line(squares, mover);
    let opponent_wins = has_line(squares, mover.opponent());

    match (mover_wins, opponent_wins) {
        (true, true) => {
            let key = StateKey::new(*squares, mover);
            warn!(%key, "Both players hold a line");
            Err(InvariantViolation::BothPlayersWin(key).into())
        }
        (true, false) => Ok(Some(Outcome::Winner(mover))),
        (false, true) => Ok(Some(Outcome::Winner(mover.opponent()))),
        (false, false) if is_full(squares) => Ok(Some(Outcome::Draw)),
        (false, false) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn grid(rows: [&str; 3]) -> [Square; 9] {
        let mut squares = [Square::Empty; 9];
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                squares[r * 3 + c] = match ch {
                    'X' => Square::X,
                    'O' => Square::O,
                    _ => Square::Empty,
                };
            }
        }
        squares
    }

    #[test]
    fn test_outcome_in_progress() {
        let squares = grid(["X..", ".O.", "..."]);
        assert_eq!(outcome(&squares, Mark::O).unwrap(), None);
    }

    #[test]
    fn test_outcome_mover_wins() {
        let squares = grid(["XXX", "OO.", "..."]);
        assert_eq!(
            outcome(&squares, Mark::X).unwrap(),
            Some(Outcome::Winner(Mark::X))
        );
    }

    #[test]
    fn test_outcome_draw() {
        let squares = grid(["XOX", "XOO", "OXX"]);
        assert_eq!(outcome(&squares, Mark::X).unwrap(), Some(Outcome::Draw));
    }

    #[test]
    fn test_outcome_rejects_double_win() {
        let squares = grid(["XXX", "OOO", "..."]);
        let err = outcome(&squares, Mark::X).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::Invariant(InvariantViolation::BothPlayersWin(_))
        ));
    }
}
