//! Exhaustive minimax opponent.
//!
//! Scores use a fixed polarity regardless of who is searching: a line of X
//! is [`X_WIN_SCORE`], a line of O is [`O_WIN_SCORE`], a full board without
//! a line is [`DRAW_SCORE`]. O maximizes, X minimizes. There is no depth
//! discount and no pruning; the whole remaining tree is walked.

use super::action::MoveError;
use super::rules;
use super::{Board, Mark, Position, Square};
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use tracing::{debug, instrument};

/// Leaf score when X has three in a row.
pub const X_WIN_SCORE: i32 = -10;

/// Leaf score when O has three in a row.
pub const O_WIN_SCORE: i32 = 10;

/// Leaf score for a full board with no line.
pub const DRAW_SCORE: i32 = 0;

/// Move picked by the search and its game-theoretic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct SearchOutcome {
    /// Cell to play (0-8).
    pub index: usize,
    /// Value of the position after playing `index`, assuming best play.
    pub score: i32,
}

impl SearchOutcome {
    /// The chosen cell as a [`Position`].
    pub fn position(&self) -> Option<Position> {
        Position::from_index(self.index)
    }
}

/// A trial mark that is removed again when the guard is dropped.
///
/// Every exit from a child search, early or not, restores the square.
struct ScopedMark<'a> {
    board: &'a mut Board,
    pos: Position,
}

impl<'a> ScopedMark<'a> {
    fn place(board: &'a mut Board, pos: Position, mark: Mark) -> Self {
        debug_assert!(board.is_empty(pos), "trial mark on occupied square");
        board.set(pos, Square::Occupied(mark));
        Self { board, pos }
    }
}

impl Deref for ScopedMark<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for ScopedMark<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for ScopedMark<'_> {
    fn drop(&mut self) {
        self.board.set(self.pos, Square::Empty);
    }
}

/// Chooses the best move for `side` on `board`.
///
/// Children are tried in increasing index order; O keeps the first strictly
/// greater score, X the first strictly lower one, so ties go to the lowest
/// index. `board` is mutated during the search and restored before this
/// returns.
///
/// # Errors
///
/// [`MoveError::NoLegalMoves`] if the board is full or already has a line.
#[instrument(skip(board), fields(board = %board.display()))]
pub fn choose_move(board: &mut Board, side: Mark) -> Result<SearchOutcome, MoveError> {
    if terminal_score(board).is_some() {
        debug!("Search called on a finished board");
        return Err(MoveError::NoLegalMoves);
    }

    let outcome = best_child(board, side).ok_or(MoveError::NoLegalMoves)?;
    debug!(index = outcome.index, score = outcome.score, "Search complete");
    Ok(outcome)
}

/// Game-theoretic value of `board` with `side` to move.
pub fn game_value(board: &mut Board, side: Mark) -> i32 {
    if let Some(score) = terminal_score(board) {
        return score;
    }
    best_child(board, side).map_or(DRAW_SCORE, |outcome| outcome.score)
}

fn terminal_score(board: &Board) -> Option<i32> {
    if rules::has_line(board, Mark::X) {
        Some(X_WIN_SCORE)
    } else if rules::has_line(board, Mark::O) {
        Some(O_WIN_SCORE)
    } else if rules::is_full(board) {
        Some(DRAW_SCORE)
    } else {
        None
    }
}

fn best_child(board: &mut Board, side: Mark) -> Option<SearchOutcome> {
    let mut best: Option<SearchOutcome> = None;

    for pos in Position::ALL {
        if !board.is_empty(pos) {
            continue;
        }

        let score = {
            let mut trial = ScopedMark::place(board, pos, side);
            game_value(&mut trial, side.opponent())
        };

        if best.is_none_or(|current| improves(side, score, current.score)) {
            best = Some(SearchOutcome::new(pos.to_index(), score));
        }
    }

    best
}

fn improves(side: Mark, candidate: i32, current: i32) -> bool {
    match side {
        Mark::O => candidate > current,
        Mark::X => candidate < current,
    }
}
