//! History consistency invariant: every recorded move is still on the board.

use super::Invariant;
use crate::{GameState, Square};

/// Invariant: each move in the history names a distinct cell, and that
/// cell still holds the mark the move placed.
pub struct HistoryConsistentInvariant;

impl Invariant<GameState> for HistoryConsistentInvariant {
    fn holds(game: &GameState) -> bool {
        let mut seen = [false; 9];
        game.history().iter().all(|mv| {
            let index = mv.position.to_index();
            let fresh = !std::mem::replace(&mut seen[index], true);
            fresh && game.board().square(mv.position) == Square::Occupied(mv.mark)
        })
    }

    fn description() -> &'static str {
        "Move history matches the board"
    }
}
