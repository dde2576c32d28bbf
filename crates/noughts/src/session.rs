//! Interactive session: the live game, the mode, the scoreboard and the
//! delayed computer reply.
//!
//! All state sits behind one async mutex. A computer reply runs as a spawned
//! task that sleeps for the configured delay, then re-checks the session
//! generation under the lock before touching the game. Every restart bumps
//! the generation, so a reply scheduled for an abandoned game is dropped
//! instead of landing on the new board.

use crate::config::SessionConfig;
use crate::mode::{COMPUTER_MARK, Mode};
use crate::scoreboard::Scoreboard;
use derive_getters::Getters;
use noughts_core::{Board, GameState, GameStatus, Mark, MoveError, SearchOutcome, WinningLine};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Messages sent from the session to whoever renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A mark was placed.
    MovePlayed {
        /// Who moved.
        mark: Mark,
        /// Cell played (0-8).
        index: usize,
        /// Board after the move.
        board: Board,
        /// Whether the search picked this move.
        by_computer: bool,
    },
    /// A computer reply has been scheduled.
    ComputerThinking,
    /// The game was won or drawn.
    GameOver {
        /// Final status.
        status: GameStatus,
        /// Completed line, if any.
        line: Option<WinningLine>,
        /// Scores including this game.
        scores: Scoreboard,
    },
    /// A fresh game started.
    Restarted {
        /// Mode of the new game.
        mode: Mode,
    },
    /// A scheduled reply woke up after its game was abandoned.
    ReplyDiscarded {
        /// Generation the reply was scheduled for.
        generation: u64,
    },
    /// The scoreboard was cleared.
    ScoresReset,
}

/// Error from a session operation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// The engine rejected a move.
    #[display("{}", _0)]
    Move(MoveError),

    /// The computer reply task panicked or was cancelled.
    #[display("Computer reply task failed: {}", _0)]
    ReplyTask(String),
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Move(e) => Some(e),
            SessionError::ReplyTask(_) => None,
        }
    }
}

impl From<MoveError> for SessionError {
    fn from(e: MoveError) -> Self {
        SessionError::Move(e)
    }
}

/// How a scheduled computer reply ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The computer moved.
    Played(SearchOutcome),
    /// The game the reply was meant for had been restarted.
    Discarded,
}

/// Handle on a scheduled computer reply.
#[derive(Debug)]
pub struct PendingReply {
    generation: u64,
    handle: JoinHandle<Result<ReplyOutcome, SessionError>>,
}

impl PendingReply {
    /// Generation of the game this reply belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Waits for the reply to play or be discarded.
    pub async fn wait(self) -> Result<ReplyOutcome, SessionError> {
        self.handle
            .await
            .map_err(|e| SessionError::ReplyTask(e.to_string()))?
    }
}

/// Result of an accepted human move.
#[derive(Debug)]
pub struct MoveReport {
    /// Game after the human move.
    pub game: GameState,
    /// Computer reply, if one was scheduled.
    pub reply: Option<PendingReply>,
}

/// Read-only copy of the session for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Live game.
    game: GameState,
    /// Current mode.
    mode: Mode,
    /// Tallies of finished games.
    scores: Scoreboard,
    /// Restart counter.
    generation: u64,
}

#[derive(Debug)]
struct SessionState {
    game: GameState,
    mode: Mode,
    scores: Scoreboard,
    generation: u64,
}

impl SessionState {
    /// Installs `next` as the live game and books the result if it ended.
    fn commit(
        &mut self,
        next: GameState,
        by_computer: bool,
        events: &mpsc::UnboundedSender<SessionEvent>,
    ) {
        let played = next.last_move();
        self.game = next;

        if let Some(mv) = played {
            emit(
                events,
                SessionEvent::MovePlayed {
                    mark: mv.mark,
                    index: mv.position.to_index(),
                    board: *self.game.board(),
                    by_computer,
                },
            );
        }

        let status = self.game.status();
        if self.scores.record(status) {
            info!(%status, scores = %self.scores, "Game finished");
            emit(
                events,
                SessionEvent::GameOver {
                    status,
                    line: self.game.winning_line(),
                    scores: self.scores,
                },
            );
        }
    }

    fn restart(&mut self, events: &mpsc::UnboundedSender<SessionEvent>) {
        self.generation += 1;
        self.game = GameState::reset();
        info!(generation = self.generation, mode = %self.mode, "Game restarted");
        emit(events, SessionEvent::Restarted { mode: self.mode });
    }
}

fn emit(events: &mpsc::UnboundedSender<SessionEvent>, event: SessionEvent) {
    if let Err(e) = events.send(event) {
        debug!(event = ?e.0, "No event listener");
    }
}

/// One player's (or two players') run of games.
#[derive(Debug, Clone)]
pub struct Session {
    state: Arc<Mutex<SessionState>>,
    events: mpsc::UnboundedSender<SessionEvent>,
    reply_delay: Duration,
}

impl Session {
    /// Creates a session and the receiving end of its event stream.
    #[instrument(
        skip(config),
        fields(mode = %config.mode(), reply_delay_ms = config.reply_delay_ms())
    )]
    pub fn new(config: &SessionConfig) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let state = SessionState {
            game: GameState::new(),
            mode: *config.mode(),
            scores: Scoreboard::default(),
            generation: 0,
        };
        info!("Session created");
        let session = Self {
            state: Arc::new(Mutex::new(state)),
            events,
            reply_delay: config.reply_delay(),
        };
        (session, rx)
    }

    /// Plays `cell` for the human side.
    ///
    /// In human-vs-human mode the move is made for whoever is to move. In
    /// human-vs-computer mode the human is always X; if the game is still
    /// active afterwards a computer reply is scheduled and returned.
    ///
    /// # Errors
    ///
    /// [`SessionError::Move`] if the engine rejects the move, including
    /// [`MoveError::WrongTurn`] while a computer reply is pending.
    #[instrument(skip(self))]
    pub async fn human_move(&self, cell: usize) -> Result<MoveReport, SessionError> {
        let mut state = self.state.lock().await;

        let acting = state.mode.human_side(state.game.current_player());
        let next = state.game.try_move(cell, acting).inspect_err(|e| {
            warn!(error = %e, "Move rejected");
        })?;
        state.commit(next, false, &self.events);

        let reply = if state.mode.has_computer()
            && !state.game.status().is_terminal()
            && state.game.current_player() == COMPUTER_MARK
        {
            Some(self.schedule_reply(state.generation))
        } else {
            None
        };

        Ok(MoveReport {
            game: state.game.clone(),
            reply,
        })
    }

    fn schedule_reply(&self, generation: u64) -> PendingReply {
        debug!(generation, delay = ?self.reply_delay, "Scheduling computer reply");
        emit(&self.events, SessionEvent::ComputerThinking);

        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        let delay = self.reply_delay;
        let handle = tokio::spawn(computer_reply(state, events, delay, generation));
        PendingReply { generation, handle }
    }

    /// Abandons the current game and starts a fresh one in the same mode.
    /// Scores are kept and any pending computer reply is discarded.
    #[instrument(skip(self))]
    pub async fn restart(&self) -> GameState {
        let mut state = self.state.lock().await;
        state.restart(&self.events);
        state.game.clone()
    }

    /// Switches between the two modes and restarts. Returns the new mode.
    #[instrument(skip(self))]
    pub async fn toggle_mode(&self) -> Mode {
        let mut state = self.state.lock().await;
        state.mode = state.mode.toggled();
        state.restart(&self.events);
        state.mode
    }

    /// Selects `mode` and restarts, even if the mode is unchanged.
    #[instrument(skip(self))]
    pub async fn set_mode(&self, mode: Mode) {
        let mut state = self.state.lock().await;
        state.mode = mode;
        state.restart(&self.events);
    }

    /// Clears the scoreboard. The live game is untouched.
    #[instrument(skip(self))]
    pub async fn reset_scores(&self) {
        let mut state = self.state.lock().await;
        state.scores.reset();
        info!("Scores reset");
        emit(&self.events, SessionEvent::ScoresReset);
    }

    /// Copies the current session state.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock().await;
        SessionSnapshot {
            game: state.game.clone(),
            mode: state.mode,
            scores: state.scores,
            generation: state.generation,
        }
    }
}

#[instrument(skip(state, events))]
async fn computer_reply(
    state: Arc<Mutex<SessionState>>,
    events: mpsc::UnboundedSender<SessionEvent>,
    delay: Duration,
    generation: u64,
) -> Result<ReplyOutcome, SessionError> {
    tokio::time::sleep(delay).await;

    let mut state = state.lock().await;
    if state.generation != generation {
        debug!(current = state.generation, "Game restarted while thinking, dropping reply");
        emit(&events, SessionEvent::ReplyDiscarded { generation });
        return Ok(ReplyOutcome::Discarded);
    }

    let outcome = state.game.request_computer_move()?;
    let next = state.game.try_move(outcome.index, COMPUTER_MARK)?;
    info!(index = outcome.index, score = outcome.score, "Computer moved");
    state.commit(next, true, &events);

    Ok(ReplyOutcome::Played(outcome))
}
