//! Players and the strategies that drive them.

use crate::board::Board;
use crate::error::{InvariantViolation, MoveError, PolicyError, Result};
use crate::policy::Policy;
use crate::space::Explorer;
use crate::types::{Cell, Mark, Square};
use rand::Rng;
use tracing::{debug, instrument, warn};

/// Capability to choose a move for the board's current mover.
pub trait Strategy {
    /// Returns the cell to play on `board`.
    fn select_move(&self, board: &Board) -> Result<Cell>;

    /// Returns the strategy's display name.
    fn name(&self) -> &str;
}

/// Plays the single destination a [`Policy`] recorded for each state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedPolicy {
    policy: Policy,
}

impl FixedPolicy {
    /// Wraps a policy.
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    /// Underlying policy.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }
}

impl Strategy for FixedPolicy {
    /// Resolves the one cell that turns the board's state into the policy's
    /// destination.
    ///
    /// # Errors
    ///
    /// - `PolicyError::MissingState` when the state has no entry
    /// - `InvariantViolation::TransitionWidth` unless exactly one cell differs
    /// - `InvariantViolation::TransitionMark` unless that cell goes from empty
    ///   to the mover's mark
    #[instrument(skip_all, fields(key = %board.canonical_key()))]
    fn select_move(&self, board: &Board) -> Result<Cell> {
        let from = board.canonical_key();
        let to = *self.policy.get(&from).ok_or_else(|| {
            warn!("State missing from policy");
            PolicyError::MissingState(from)
        })?;

        let changed = from.changed_cells(&to);
        let [cell] = changed.as_slice() else {
            warn!(%to, changed = changed.len(), "Policy transition is not a single move");
            return Err(InvariantViolation::TransitionWidth {
                from,
                to,
                changed: changed.len(),
            }
            .into());
        };

        if from.square(*cell) != Square::Empty || to.square(*cell) != Square::from(from.turn()) {
            warn!(%to, %cell, "Policy transition places the wrong mark");
            return Err(InvariantViolation::TransitionMark { from, to }.into());
        }

        debug!(%cell, "Policy move resolved");
        Ok(*cell)
    }

    fn name(&self) -> &str {
        "fixed-random-policy"
    }
}

/// Plays the first empty cell in row-major order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FirstOpen;

impl Strategy for FirstOpen {
    fn select_move(&self, board: &Board) -> Result<Cell> {
        let cell = board
            .legal_moves()
            .first()
            .copied()
            .ok_or(MoveError::NoLegalMoves)?;
        debug!(%cell, "First open cell chosen");
        Ok(cell)
    }

    fn name(&self) -> &str {
        "first-open"
    }
}

/// A mark, its fixed turn parity, and the strategy that picks its moves.
#[derive(Debug, Clone)]
pub struct Player<S = FixedPolicy> {
    mark: Mark,
    plays_even_turns: bool,
    strategy: S,
}

impl<S: Strategy> Player<S> {
    /// Creates a player for games rooted like `board`.
    ///
    /// Turn parity is derived once from `board.start_x()` and `plays_x`.
    #[instrument(
        skip(board, strategy),
        fields(start_x = board.start_x(), strategy = strategy.name())
    )]
    pub fn new(board: &Board, plays_x: bool, strategy: S) -> Self {
        Self {
            mark: Mark::from_plays_x(plays_x),
            plays_even_turns: board.start_x() == plays_x,
            strategy,
        }
    }

    /// Mark this player places.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// True when this player moves at move counts 0, 2, 4, ...
    pub fn plays_even_turns(&self) -> bool {
        self.plays_even_turns
    }

    /// Strategy driving this player.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Chooses this player's next cell on `board`.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::NotYourTurn` when the board expects the other
    /// mark or the move-count parity does not match, and otherwise whatever
    /// the strategy reports.
    pub fn select_move(&self, board: &Board) -> Result<Cell> {
        let parity_matches = (board.move_count() % 2 == 0) == self.plays_even_turns;
        if board.turn() != self.mark || !parity_matches {
            warn!(mark = %self.mark, turn = %board.turn(), "Player asked out of turn");
            return Err(PolicyError::NotYourTurn {
                mark: self.mark,
                turn: board.turn(),
            }
            .into());
        }
        self.strategy.select_move(board)
    }
}

impl Player<FixedPolicy> {
    /// Builds a random fixed-policy player from the explorer's cached space.
    ///
    /// # Errors
    ///
    /// Propagates enumeration and policy generation failures.
    pub fn random<R: Rng + ?Sized>(
        explorer: &Explorer,
        plays_x: bool,
        rng: &mut R,
    ) -> Result<Self> {
        let policy = Policy::generate(explorer.space()?, rng)?;
        Ok(Self::new(explorer.root(), plays_x, FixedPolicy::new(policy)))
    }

    /// Builds a random fixed-policy player from a seed.
    ///
    /// # Errors
    ///
    /// Propagates enumeration and policy generation failures.
    pub fn seeded(explorer: &Explorer, plays_x: bool, seed: u64) -> Result<Self> {
        let policy = Policy::seeded(explorer.space()?, seed)?;
        Ok(Self::new(explorer.root(), plays_x, FixedPolicy::new(policy)))
    }
}
