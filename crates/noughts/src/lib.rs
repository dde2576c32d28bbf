//! Noughts - interactive tic-tac-toe sessions.
//!
//! Wraps the [`noughts_core`] engine in a [`Session`] that tracks the game
//! mode, keeps a scoreboard across games and schedules the computer's reply
//! after a configurable delay.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod config;
mod mode;
mod scoreboard;
mod session;

pub use config::{ConfigError, SessionConfig};
pub use mode::{COMPUTER_MARK, HUMAN_MARK, Mode};
pub use scoreboard::Scoreboard;
pub use session::{
    MoveReport, PendingReply, ReplyOutcome, Session, SessionError, SessionEvent, SessionSnapshot,
};
