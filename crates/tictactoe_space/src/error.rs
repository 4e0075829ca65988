//! Error types for play, enumeration and policy lookup.
//!
//! Every failure here is a local, synchronous logic failure. Nothing is
//! retried; callers surface the error and stop.

use crate::key::StateKey;
use crate::types::{Cell, Mark};
use derive_more::Display;
use tracing::instrument;

/// A move that the board refused before mutating anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MoveError {
    /// Coordinates fall outside the 3x3 grid.
    #[display("Cell ({}, {}) is outside the 3x3 board", row, col)]
    OutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The square is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Cell),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// No empty square remains.
    #[display("No legal moves remain")]
    NoLegalMoves,
}

impl std::error::Error for MoveError {}

/// A player could not resolve a move from its policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PolicyError {
    /// The board's state was never part of the policy's enumeration.
    #[display("No policy entry for state {}", _0)]
    MissingState(StateKey),

    /// The player was asked to move on the opponent's turn.
    #[display("Player {} asked to move while {} is to play", mark, turn)]
    NotYourTurn {
        /// Mark of the player that was asked.
        mark: Mark,
        /// Mark the board expects.
        turn: Mark,
    },
}

impl std::error::Error for PolicyError {}

/// An internal consistency check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InvariantViolation {
    /// Both players hold a complete line.
    #[display("Both players complete a line in {}", _0)]
    BothPlayersWin(StateKey),

    /// A policy transition does not differ in exactly one cell.
    #[display("Transition {} -> {} changes {} cells", from, to, changed)]
    TransitionWidth {
        /// Source state.
        from: StateKey,
        /// Destination state.
        to: StateKey,
        /// Number of differing cells.
        changed: usize,
    },

    /// The changed cell was not empty before or does not carry the mover's mark.
    #[display("Transition {} -> {} does not place the mover's mark", from, to)]
    TransitionMark {
        /// Source state.
        from: StateKey,
        /// Destination state.
        to: StateKey,
    },

    /// Mark counts or turn owner cannot arise from the given first mover.
    #[display("State {} is not reachable when {} moves first", key, first)]
    UnreachableKey {
        /// Rejected state.
        key: StateKey,
        /// First mover of the game the key was checked against.
        first: Mark,
    },

    /// A non-terminal state has no outgoing action.
    #[display("Non-terminal state {} has no outgoing action", _0)]
    DeadEnd(StateKey),
}

impl std::error::Error for InvariantViolation {}

/// Error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, derive_more::From)]
pub enum ErrorKind {
    /// Illegal move.
    #[display("Illegal move: {}", _0)]
    IllegalMove(MoveError),

    /// Policy lookup failure.
    #[display("Policy lookup failure: {}", _0)]
    PolicyLookup(PolicyError),

    /// Invariant violation.
    #[display("Invariant violation: {}", _0)]
    Invariant(InvariantViolation),
}

impl std::error::Error for ErrorKind {}

/// Crate error with location tracking.
#[derive(Debug, Clone, Display, derive_more::Error)]
#[display("{} at {}:{}", kind, file, line)]
pub struct Error {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl Error {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: ErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error category.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl From<MoveError> for Error {
    #[track_caller]
    fn from(err: MoveError) -> Self {
        Self::new(ErrorKind::IllegalMove(err))
    }
}

impl From<PolicyError> for Error {
    #[track_caller]
    fn from(err: PolicyError) -> Self {
        Self::new(ErrorKind::PolicyLookup(err))
    }
}

impl From<InvariantViolation> for Error {
    #[track_caller]
    fn from(err: InvariantViolation) -> Self {
        Self::new(ErrorKind::Invariant(err))
    }
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
