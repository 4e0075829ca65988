//! Tic-tac-toe state-space enumeration and fixed random policies.
//!
//! # Architecture
//!
//! - **Board**: 3x3 grid, turn tracking, win/draw detection
//! - **Space**: single-pass enumeration of reachable states and transitions
//! - **Policy**: one uniformly chosen next state per non-terminal state
//! - **Player**: resolves a policy entry back into a cell to play
//! - **Runner**: alternates two players until the board is terminal
//!
//! # Example
//!
//! ```
//! use tictactoe_space::{Board, Explorer, GameRunner, Player};
//!
//! # fn example() -> tictactoe_space::Result<()> {
//! let explorer = Explorer::new(Board::new(true));
//! assert_eq!(explorer.space()?.len(), 5478);
//!
//! let x = Player::seeded(&explorer, true, 1)?;
//! let o = Player::seeded(&explorer, false, 2)?;
//! let report = GameRunner::new(Board::new(true), x, o).run()?;
//! assert!(report.board().terminal());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod error;
mod key;
mod player;
mod policy;
pub mod rules;
mod runner;
mod space;
mod types;

pub use action::Move;
pub use board::Board;
pub use error::{Error, ErrorKind, InvariantViolation, MoveError, PolicyError, Result};
pub use key::StateKey;
pub use player::{FirstOpen, FixedPolicy, Player, Strategy};
pub use policy::Policy;
pub use runner::{GameReport, GameRunner};
pub use space::{Action, ActionId, Explorer, SpaceSummary, StateId, StateNode, StateSpace};
pub use types::{Cell, Mark, Outcome, Square};
