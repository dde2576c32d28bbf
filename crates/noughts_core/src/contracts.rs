//! Contract-based validation for tic-tac-toe.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::{Move, MoveError};
use super::invariants::{
    HistoryConsistentInvariant, Invariant, InvariantSet, Transition, TransitionInvariants,
};
use super::GameState;
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

/// Precondition: the game has not been won or drawn.
pub struct GameIsActive;

impl GameIsActive {
    /// Fails with [`MoveError::GameInactive`] on a terminal state.
    pub fn check(game: &GameState) -> Result<(), MoveError> {
        if game.status().is_terminal() {
            Err(MoveError::GameInactive)
        } else {
            Ok(())
        }
    }
}

/// Precondition: The square at the move's position must be empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Fails with [`MoveError::InvalidMove`] if the square is taken.
    pub fn check(mov: &Move, game: &GameState) -> Result<(), MoveError> {
        if !game.board().is_empty(mov.position) {
            Err(MoveError::InvalidMove(mov.position.to_index()))
        } else {
            Ok(())
        }
    }
}

/// Precondition: It must be the player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails with [`MoveError::WrongTurn`] if `mov.mark` is not to move.
    pub fn check(mov: &Move, game: &GameState) -> Result<(), MoveError> {
        if mov.mark != game.current_player() {
            Err(MoveError::WrongTurn(mov.mark))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition: the game is active, it's the mover's turn and
/// the square is empty.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameState) -> Result<(), MoveError> {
        GameIsActive::check(game)?;
        PlayersTurn::check(mov, game)?;
        SquareIsEmpty::check(mov, game)?;
        Ok(())
    }
}

/// Contract for move actions.
///
/// Preconditions:
/// - Game must be active
/// - Must be player's turn
/// - Square must be empty
///
/// Postconditions:
/// - Board remains monotonic
/// - Players still alternate
/// - History remains consistent with board
pub struct MoveContract;

impl Contract<GameState, Move> for MoveContract {
    fn pre(game: &GameState, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, game)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), MoveError> {
        let mut descriptions = Vec::new();

        if let Err(violations) = TransitionInvariants::check_all(&Transition { before, after }) {
            descriptions.extend(violations.into_iter().map(|v| v.description));
        }
        if !HistoryConsistentInvariant::holds(after) {
            descriptions.push(HistoryConsistentInvariant::description().to_string());
        }

        if descriptions.is_empty() {
            Ok(())
        } else {
            warn!(?descriptions, "Move postcondition failed");
            Err(MoveError::InvariantViolation(format!(
                "Postcondition failed: {}",
                descriptions.join("; ")
            )))
        }
    }
}
