//! Draw detection logic for tic-tac-toe.

use crate::types::Square;

/// Checks if every square is occupied.
///
/// A full board with no winner is a draw.
pub fn is_full(squares: &[Square; 9]) -> bool {
    squares.iter().all(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&[Square::Empty; 9]));
    }

    #[test]
    fn test_partial_board_not_full() {
        let mut squares = [Square::X; 9];
        squares[4] = Square::Empty;
        assert!(!is_full(&squares));
    }

    #[test]
    fn test_full_board() {
        let mut squares = [Square::X; 9];
        squares[1] = Square::O;
        assert!(is_full(&squares));
    }
}
