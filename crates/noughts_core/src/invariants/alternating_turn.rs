//! Alternating turn invariant: players alternate X, O, X, O, ...

use super::{Invariant, Transition};
use crate::{GameStatus, Square};

/// Invariant: the square filled by a move holds the mover's mark, and the
/// turn passes to the opponent exactly when the game stays active.
pub struct AlternatingTurnInvariant;

impl Invariant<Transition<'_>> for AlternatingTurnInvariant {
    fn holds(transition: &Transition<'_>) -> bool {
        let mover = transition.before.current_player();
        let after = transition.after;

        let placed_by_mover = after.last_move().is_some_and(|mv| {
            mv.mark == mover && after.board().square(mv.position) == Square::Occupied(mover)
        });

        let expected_next = match after.status() {
            GameStatus::Active => mover.opponent(),
            GameStatus::Won(_) | GameStatus::Draw => mover,
        };

        placed_by_mover && after.current_player() == expected_next
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}
