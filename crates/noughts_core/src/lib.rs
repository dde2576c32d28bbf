//! Noughts core - tic-tac-toe rules, engine and an unbeaten opponent.
//!
//! This crate holds no I/O and no async code. It provides:
//!
//! - **Engine**: [`GameState`] with [`apply_move`](GameState::apply_move),
//!   [`evaluate`](GameState::evaluate) and the combined
//!   [`try_move`](GameState::try_move)
//! - **Search**: [`choose_move`], an exhaustive minimax over the remaining
//!   game tree
//! - **Rules**: the eight [`WIN_LINES`] and draw detection
//!
//! # Example
//!
//! ```
//! use noughts_core::{GameState, GameStatus, Mark};
//!
//! # fn example() -> Result<(), noughts_core::MoveError> {
//! let game = GameState::new().try_move(4, Mark::X)?;
//! let reply = game.request_computer_move()?;
//! let game = game.try_move(reply.index, Mark::O)?;
//! assert_eq!(game.status(), GameStatus::Active);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod contracts;
mod game;
mod position;
mod search;
mod types;

pub mod invariants;
pub mod rules;

pub use action::{Move, MoveError};
pub use contracts::{Contract, GameIsActive, LegalMove, MoveContract, PlayersTurn, SquareIsEmpty};
pub use game::{GameState, new_game};
pub use position::Position;
pub use rules::{WIN_LINES, WinningLine};
pub use search::{DRAW_SCORE, O_WIN_SCORE, SearchOutcome, X_WIN_SCORE, choose_move, game_value};
pub use types::{Board, GameStatus, Mark, Square};
