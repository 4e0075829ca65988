//! Game orchestration between two players.

use crate::action::Move;
use crate::board::Board;
use crate::error::Result;
use crate::player::{Player, Strategy};
use crate::types::Outcome;
use derive_getters::Getters;
use tracing::{debug, info, instrument};

/// Final state of a completed game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_new::new)]
pub struct GameReport {
    /// Terminal board.
    board: Board,
    /// Moves in play order.
    moves: Vec<Move>,
    /// How the game ended.
    outcome: Outcome,
}

/// Alternates two players over a shared board until it is terminal.
#[derive(Debug)]
pub struct GameRunner<A, B> {
    board: Board,
    first: Player<A>,
    second: Player<B>,
}

impl<A: Strategy, B: Strategy> GameRunner<A, B> {
    /// Creates a runner. The player whose mark matches the board's turn is
    /// asked to move each ply.
    pub fn new(board: Board, first: Player<A>, second: Player<B>) -> Self {
        Self {
            board,
            first,
            second,
        }
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Plays to completion.
    ///
    /// # Errors
    ///
    /// Stops at the first failed selection or move and returns it; the game
    /// is not continued.
    #[instrument(skip(self), fields(start_x = self.board.start_x()))]
    pub fn run(mut self) -> Result<GameReport> {
        info!(
            first = self.first.strategy().name(),
            second = self.second.strategy().name(),
            "Starting game"
        );
        let mut moves = Vec::new();

        let outcome = loop {
            if let Some(outcome) = self.board.outcome() {
                break outcome;
            }

            let mark = self.board.turn();
            let cell = if self.first.mark() == mark {
                self.first.select_move(&self.board)?
            } else {
                self.second.select_move(&self.board)?
            };

            self.board.apply_move(cell.row(), cell.col())?;
            let played = Move::new(mark, cell);
            debug!(%played, "Move made");
            moves.push(played);
        };

        info!(%outcome, moves = moves.len(), "Game over");
        Ok(GameReport::new(self.board, moves, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, PolicyError};
    use crate::player::FirstOpen;
    use crate::types::{Cell, Mark};

    #[test]
    fn test_first_open_players_finish() {
        // Row-major filling: X takes 0, 2, 4, 6 and completes the anti-diagonal.
        let board = Board::new(true);
        let x = Player::new(&board, true, FirstOpen);
        let o = Player::new(&board, false, FirstOpen);
        let report = GameRunner::new(board, x, o).run().unwrap();
        assert_eq!(report.outcome(), &Outcome::Winner(Mark::X));
        assert_eq!(report.moves().len(), 7);
        assert_eq!(report.moves()[6], Move::new(Mark::X, Cell::try_new(2, 0).unwrap()));
        assert!(report.board().terminal());
    }

    #[test]
    fn test_player_order_does_not_matter() {
        let board = Board::new(false);
        let x = Player::new(&board, true, FirstOpen);
        let o = Player::new(&board, false, FirstOpen);
        let report = GameRunner::new(board, x, o).run().unwrap();
        assert_eq!(report.moves()[0].mark, Mark::O);
        assert_eq!(report.outcome(), &Outcome::Winner(Mark::O));
    }

    #[test]
    fn test_mismatched_players_stop_immediately() {
        let board = Board::new(true);
        let o1 = Player::new(&board, false, FirstOpen);
        let o2 = Player::new(&board, false, FirstOpen);
        let err = GameRunner::new(board, o1, o2).run().unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::PolicyLookup(PolicyError::NotYourTurn { .. })
        ));
    }
}
