//! Monotonic board invariant: squares never change once set.

use super::{Invariant, Transition};
use crate::{Position, Square};

/// Invariant: an accepted move fills exactly one empty square and
/// never overwrites an occupied one.
pub struct MonotonicBoardInvariant;

impl Invariant<Transition<'_>> for MonotonicBoardInvariant {
    fn holds(transition: &Transition<'_>) -> bool {
        let before = transition.before.board();
        let after = transition.after.board();
        let mut filled = 0;

        for pos in Position::ALL {
            match (before.square(pos), after.square(pos)) {
                (Square::Empty, Square::Empty) => {}
                (Square::Empty, Square::Occupied(_)) => filled += 1,
                (old, new) if old == new => {}
                _ => return false,
            }
        }

        filled == 1
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, GameState, Mark};

    #[test]
    fn test_single_move_holds() {
        let before = GameState::new();
        let after = before.try_move(4, Mark::X).unwrap();
        assert!(MonotonicBoardInvariant::holds(&Transition {
            before: &before,
            after: &after,
        }));
    }

    #[test]
    fn test_overwrite_violates() {
        let before = GameState::from_board(Board::parse("X........").unwrap(), Mark::O);
        let after = GameState::from_board(Board::parse("O........").unwrap(), Mark::X);
        assert!(!MonotonicBoardInvariant::holds(&Transition {
            before: &before,
            after: &after,
        }));
    }

    #[test]
    fn test_no_change_violates() {
        let state = GameState::new();
        assert!(!MonotonicBoardInvariant::holds(&Transition {
            before: &state,
            after: &state,
        }));
    }
}
