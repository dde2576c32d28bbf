//! Mark balance invariant: X is never behind O, and never more than one ahead.

use super::Invariant;
use crate::{GameState, GameStatus, Mark};

/// Invariant: `count(X) - count(O)` is 0 or 1, and while the game is active
/// the player to move is the one the counts imply.
pub struct MarkBalanceInvariant;

impl Invariant<GameState> for MarkBalanceInvariant {
    fn holds(game: &GameState) -> bool {
        let x = game.board().count(Mark::X);
        let o = game.board().count(Mark::O);
        if x != o && x != o + 1 {
            return false;
        }
        match game.status() {
            GameStatus::Active => {
                let expected = if x == o { Mark::X } else { Mark::O };
                game.current_player() == expected
            }
            GameStatus::Won(_) | GameStatus::Draw => true,
        }
    }

    fn description() -> &'static str {
        "X and O counts stay balanced"
    }
}
