//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They represent
//! the player's intent and can be validated independently of execution.

use super::{Mark, Position};
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a mark placed at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// The mark being placed.
    pub mark: Mark,
    /// The position where the mark is placed.
    pub position: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position.label())
    }
}

/// Error that can occur when validating or applying a move, or when asking
/// the opponent for one.
///
/// Every variant is recoverable: the state the caller holds is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The cell is occupied or the index is outside 0-8.
    #[display("Invalid move: cell {} is occupied or out of range", _0)]
    InvalidMove(usize),

    /// The game has already been won or drawn.
    #[display("Game is already over")]
    GameInactive,

    /// The acting side is not the player to move.
    #[display("It's not {}'s turn", _0)]
    WrongTurn(Mark),

    /// Search was asked for a move on a board with nothing left to play.
    #[display("No legal moves available")]
    NoLegalMoves,

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
