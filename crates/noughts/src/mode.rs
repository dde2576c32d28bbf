//! Game mode selection.

use noughts_core::Mark;
use serde::{Deserialize, Serialize};

/// Mark played by the human in [`Mode::HumanVsComputer`].
pub const HUMAN_MARK: Mark = Mark::X;

/// Mark played by the computer in [`Mode::HumanVsComputer`].
pub const COMPUTER_MARK: Mark = Mark::O;

/// Game mode - who is the opponent?
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Two humans share the board.
    #[strum(serialize = "Human vs Human")]
    HumanVsHuman,
    /// Human plays X, the minimax opponent plays O.
    #[default]
    #[strum(serialize = "Human vs Computer")]
    HumanVsComputer,
}

impl Mode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Mode::HumanVsHuman => Mode::HumanVsComputer,
            Mode::HumanVsComputer => Mode::HumanVsHuman,
        }
    }

    /// Whether the computer answers after a human move.
    pub fn has_computer(self) -> bool {
        matches!(self, Mode::HumanVsComputer)
    }

    /// The side a human submitting a move acts for, given who is to move.
    pub fn human_side(self, to_move: Mark) -> Mark {
        match self {
            Mode::HumanVsHuman => to_move,
            Mode::HumanVsComputer => HUMAN_MARK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_against_computer() {
        assert_eq!(Mode::default(), Mode::HumanVsComputer);
        assert!(Mode::default().has_computer());
    }

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(Mode::HumanVsComputer.toggled(), Mode::HumanVsHuman);
        assert_eq!(Mode::HumanVsComputer.toggled().toggled(), Mode::HumanVsComputer);
    }

    #[test]
    fn test_human_side() {
        assert_eq!(Mode::HumanVsHuman.human_side(Mark::O), Mark::O);
        assert_eq!(Mode::HumanVsComputer.human_side(Mark::O), Mark::X);
    }

    #[test]
    fn test_display() {
        assert_eq!(Mode::HumanVsHuman.to_string(), "Human vs Human");
    }
}
