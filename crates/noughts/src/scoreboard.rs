//! Session-level tallies of finished games.

use derive_getters::Getters;
use noughts_core::{GameStatus, Mark};
use serde::{Deserialize, Serialize};

/// Wins per mark and draws. Counters only go up; restarting a game keeps
/// them, [`Scoreboard::reset`] clears them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Games won by X.
    x_wins: u32,
    /// Games won by O.
    o_wins: u32,
    /// Drawn games.
    draws: u32,
}

impl Scoreboard {
    /// Counts a finished game. Returns false (and counts nothing) while
    /// the game is still active.
    pub fn record(&mut self, status: GameStatus) -> bool {
        match status {
            GameStatus::Won(Mark::X) => self.x_wins += 1,
            GameStatus::Won(Mark::O) => self.o_wins += 1,
            GameStatus::Draw => self.draws += 1,
            GameStatus::Active => return false,
        }
        true
    }

    /// Clears all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Total finished games.
    pub fn games(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }
}

impl std::fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "X: {}  O: {}  Draws: {}", self.x_wins, self.o_wins, self.draws)
    }
}
