//! Command-line interface for noughts.

use crate::mode::Mode;
use clap::{Parser, Subcommand, ValueEnum};
use noughts_core::{Mark, Position};
use std::path::PathBuf;

/// Noughts - tic-tac-toe against a friend or an opponent that never loses
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe with an exhaustive minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game on the terminal
    Play {
        /// Starting mode (overrides the config file)
        #[arg(short, long, value_enum)]
        mode: Option<Mode>,

        /// Path to a TOML session config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Delay before the computer answers, in milliseconds (overrides the config file)
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Print the best move and game value for a board
    Analyze {
        /// Nine cells, `X`, `O` or `.`; spaces and `|` are ignored (e.g. "XX. OO. ...")
        board: String,

        /// Side to move
        #[arg(short, long, value_enum, default_value = "o")]
        side: Side,
    },
}

/// Side argument for `analyze`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Side {
    /// Crosses.
    X,
    /// Noughts.
    O,
}

impl From<Side> for Mark {
    fn from(side: Side) -> Self {
        match side {
            Side::X => Mark::X,
            Side::O => Mark::O,
        }
    }
}

/// One line typed during `play`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInput {
    /// Play a cell. Numbers are passed through unchecked so the engine can
    /// reject out-of-range cells.
    Cell(usize),
    /// Start a new game.
    Restart,
    /// Switch between human-vs-human and human-vs-computer.
    ToggleMode,
    /// Show the scoreboard.
    Scores,
    /// Clear the scoreboard.
    ResetScores,
    /// Show the command list.
    Help,
    /// Leave.
    Quit,
    /// Anything else.
    Unknown(String),
}

impl PlayerInput {
    /// Parses a line of player input.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if let Ok(cell) = line.parse::<usize>() {
            return PlayerInput::Cell(cell);
        }

        match line.to_ascii_lowercase().as_str() {
            "restart" | "r" | "new" => PlayerInput::Restart,
            "mode" | "m" => PlayerInput::ToggleMode,
            "scores" | "s" => PlayerInput::Scores,
            "reset-scores" | "reset" => PlayerInput::ResetScores,
            "help" | "h" | "?" => PlayerInput::Help,
            "quit" | "q" | "exit" => PlayerInput::Quit,
            _ => Position::from_label_or_number(line)
                .map(|pos| PlayerInput::Cell(pos.to_index()))
                .unwrap_or_else(|| PlayerInput::Unknown(line.to_string())),
        }
    }
}

/// Text shown for `help`.
pub const HELP: &str = "\
Commands:
  0-8 or a label (e.g. \"center\", \"top left\")  play a cell
  restart                                       start a new game
  mode                                          toggle human/computer opponent
  scores                                        show the scoreboard
  reset-scores                                  clear the scoreboard
  quit                                          leave";
