//! Noughts - CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;
use noughts::cli::{Cli, Command, HELP, PlayerInput, Side};
use noughts::{Mode, Session, SessionConfig, SessionEvent};
use noughts_core::{Board, GameStatus, Mark, choose_move};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,noughts=info,noughts_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { mode, config, delay_ms } => run_play(mode, config, delay_ms).await,
        Command::Analyze { board, side } => run_analyze(&board, side),
    }
}

/// Run an interactive game on stdin/stdout
#[instrument]
async fn run_play(
    mode: Option<Mode>,
    config: Option<PathBuf>,
    delay_ms: Option<u64>,
) -> Result<()> {
    let mut session_config = match config {
        Some(path) => SessionConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(mode) = mode {
        session_config = session_config.with_mode(mode);
    }
    if let Some(delay_ms) = delay_ms {
        session_config = session_config.with_reply_delay_ms(delay_ms);
    }

    let (session, mut events) = Session::new(&session_config);
    info!("Starting interactive game");

    println!("Mode: {}", session_config.mode());
    println!("{}", HELP);
    print_board(session.snapshot().await.game().board());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match PlayerInput::parse(&line) {
            PlayerInput::Cell(cell) => match session.human_move(cell).await {
                Ok(report) => {
                    if let Some(reply) = report.reply {
                        drain(&mut events);
                        if let Err(e) = reply.wait().await {
                            warn!(error = %e, "Computer reply failed");
                            println!("{}", e);
                        }
                    }
                }
                Err(e) => println!("{}", e),
            },
            PlayerInput::Restart => {
                session.restart().await;
            }
            PlayerInput::ToggleMode => {
                session.toggle_mode().await;
            }
            PlayerInput::Scores => println!("{}", session.snapshot().await.scores()),
            PlayerInput::ResetScores => session.reset_scores().await,
            PlayerInput::Help => println!("{}", HELP),
            PlayerInput::Quit => break,
            PlayerInput::Unknown(text) => println!("Unknown command '{}'. Type 'help'.", text),
        }
        drain(&mut events);
    }

    let snapshot = session.snapshot().await;
    info!(scores = %snapshot.scores(), "Leaving");
    println!("Final scores: {}", snapshot.scores());
    Ok(())
}

fn drain(events: &mut mpsc::UnboundedReceiver<SessionEvent>) {
    while let Ok(event) = events.try_recv() {
        render(&event);
    }
}

fn render(event: &SessionEvent) {
    match event {
        SessionEvent::MovePlayed {
            mark,
            index,
            board,
            by_computer,
        } => {
            if *by_computer {
                println!("Computer plays {} at {}", mark, index);
            } else {
                println!("{} plays {}", mark, index);
            }
            print_board(board);
        }
        SessionEvent::ComputerThinking => println!("Computer is thinking..."),
        SessionEvent::GameOver { status, line, scores } => {
            match (status, line) {
                (GameStatus::Won(mark), Some(line)) => {
                    let cells: Vec<_> = line
                        .cells
                        .iter()
                        .map(|pos| pos.to_index().to_string())
                        .collect();
                    println!("{} wins ({})", mark, cells.join("-"));
                }
                (GameStatus::Won(mark), None) => println!("{} wins", mark),
                _ => println!("Draw"),
            }
            println!("{}", scores);
            println!("Type 'restart' to play again.");
        }
        SessionEvent::Restarted { mode } => {
            println!("New game ({})", mode);
            print_board(&Board::new());
        }
        SessionEvent::ReplyDiscarded { .. } => {}
        SessionEvent::ScoresReset => println!("Scores cleared"),
    }
}

fn print_board(board: &Board) {
    println!("\n{}\n", board.display());
}

/// Print the best move for a board
#[instrument]
fn run_analyze(board: &str, side: Side) -> Result<()> {
    let mut parsed = Board::parse(board)
        .with_context(|| format!("'{}' is not a board: expected nine cells of X, O or .", board))?;
    let side = Mark::from(side);

    print_board(&parsed);
    let outcome = choose_move(&mut parsed, side)?;
    println!("Best move for {}: {} (score {})", side, outcome.index, outcome.score);
    Ok(())
}
