//! Game engine for tic-tac-toe.
//!
//! [`GameState`] is an explicit value: every operation takes `&self` and
//! returns a new state, so the caller holds exactly one live instance and
//! replaces it after each accepted move.

use super::action::{Move, MoveError};
use super::contracts::{Contract, GameIsActive, MoveContract};
use super::rules::{self, WinningLine};
use super::search::{self, SearchOutcome};
use super::{Board, GameStatus, Mark, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Complete game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// The board.
    board: Board,
    /// Player to move; after a win or draw, the player who moved last.
    current_player: Mark,
    /// Game status.
    status: GameStatus,
    /// Moves played, oldest first.
    history: Vec<Move>,
}

/// Creates a fresh game: empty board, X to move.
pub fn new_game() -> GameState {
    GameState::new()
}

impl GameState {
    /// Creates a new game.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Mark::X,
            status: GameStatus::Active,
            history: Vec::new(),
        }
    }

    /// Discards any game and starts a fresh one.
    pub fn reset() -> Self {
        Self::new()
    }

    /// Wraps an arbitrary board as an active game with `current_player` to
    /// move. The status is not recomputed until [`evaluate`](Self::evaluate)
    /// runs, and since the history starts empty, `evaluate` will not pass
    /// the turn until a move has been applied.
    pub fn from_board(board: Board, current_player: Mark) -> Self {
        Self {
            board,
            current_player,
            status: GameStatus::Active,
            history: Vec::new(),
        }
    }

    /// Plays the given cell indices in order from a fresh game, alternating
    /// X and O.
    #[instrument]
    pub fn replay(indices: &[usize]) -> Result<Self, MoveError> {
        indices.iter().try_fold(Self::new(), |game, &index| {
            let mover = game.current_player;
            game.try_move(index, mover)
        })
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current player.
    pub fn current_player(&self) -> Mark {
        self.current_player
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Most recent move, if any.
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    /// The completed line, once the game has been won.
    pub fn winning_line(&self) -> Option<WinningLine> {
        match self.status {
            GameStatus::Won(_) => rules::winning_line(&self.board),
            GameStatus::Active | GameStatus::Draw => None,
        }
    }

    /// Returns valid positions.
    pub fn valid_moves(&self) -> Vec<Position> {
        if self.status.is_terminal() {
            return Vec::new();
        }
        Position::valid_moves(&self.board)
    }

    /// Places the current player's mark at `index`.
    ///
    /// Does not switch players or detect a win; callers pair it with
    /// [`evaluate`](Self::evaluate).
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameInactive`] if the game is over.
    /// - [`MoveError::InvalidMove`] if `index` is out of range or occupied.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn apply_move(&self, index: usize) -> Result<Self, MoveError> {
        GameIsActive::check(self)?;

        let position = Position::from_index(index)
            .filter(|pos| self.board.is_empty(*pos))
            .ok_or(MoveError::InvalidMove(index))?;

        let mut next = self.clone();
        next.board
            .set(position, Square::Occupied(self.current_player));
        next.history.push(Move::new(self.current_player, position));
        Ok(next)
    }

    /// Recomputes the status after a move.
    ///
    /// A completed line is credited to the current player (the mover, who
    /// has not been switched yet). A full board without a line is a draw.
    /// Otherwise the turn passes to the opponent, but only if the latest
    /// move in the history was the current player's: evaluating a fresh game,
    /// or evaluating twice, leaves the turn alone. Terminal states are
    /// returned unchanged.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn evaluate(&self) -> Self {
        let mut next = self.clone();
        if self.status.is_terminal() {
            return next;
        }

        if rules::check_winner(&self.board).is_some() {
            next.status = GameStatus::Won(self.current_player);
            info!(winner = %self.current_player, "Game won");
        } else if rules::is_full(&self.board) {
            next.status = GameStatus::Draw;
            info!("Game drawn");
        } else if self
            .last_move()
            .is_some_and(|mv| mv.mark == self.current_player)
        {
            next.current_player = self.current_player.opponent();
        }

        next
    }

    /// Validates, applies and evaluates a move for `acting`.
    ///
    /// Contract enforcement:
    /// - Preconditions checked always
    /// - Postconditions checked in debug builds only
    ///
    /// # Errors
    ///
    /// [`MoveError::GameInactive`], [`MoveError::WrongTurn`] or
    /// [`MoveError::InvalidMove`]; the receiver is untouched either way.
    #[instrument(skip(self))]
    pub fn try_move(&self, index: usize, acting: Mark) -> Result<Self, MoveError> {
        GameIsActive::check(self)?;

        let position = Position::from_index(index).ok_or(MoveError::InvalidMove(index))?;
        let action = Move::new(acting, position);
        MoveContract::pre(self, &action)?;

        let next = self.apply_move(index)?.evaluate();

        #[cfg(debug_assertions)]
        MoveContract::post(self, &next)?;

        debug!(%action, status = %next.status, "Move accepted");
        Ok(next)
    }

    /// Asks the opponent search for the best move for the player to move.
    ///
    /// # Errors
    ///
    /// [`MoveError::GameInactive`] once the game is over,
    /// [`MoveError::NoLegalMoves`] if the board has no empty cell.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn request_computer_move(&self) -> Result<SearchOutcome, MoveError> {
        GameIsActive::check(self)?;
        let mut board = self.board;
        search::choose_move(&mut board, self.current_player)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_is_active_with_x_to_move() {
        let game = new_game();
        assert_eq!(game.status(), GameStatus::Active);
        assert_eq!(game.current_player(), Mark::X);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_evaluate_fresh_game_keeps_x_to_move() {
        let game = GameState::new().evaluate();
        assert_eq!(game.current_player(), Mark::X);
        assert_eq!(game.status(), GameStatus::Active);
    }

    #[test]
    fn test_evaluate_twice_flips_once() {
        let game = GameState::new().apply_move(0).unwrap().evaluate().evaluate();
        assert_eq!(game.current_player(), Mark::O);
    }

    #[test]
    fn test_from_board_keeps_turn_until_a_move_is_applied() {
        let game = GameState::from_board(Board::parse("X........").unwrap(), Mark::X).evaluate();
        assert_eq!(game.current_player(), Mark::X);
        assert!(game.history().is_empty());

        let game = game.apply_move(4).unwrap().evaluate();
        assert_eq!(game.current_player(), Mark::O);
    }

    #[test]
    fn test_apply_move_does_not_switch_player() {
        let game = GameState::new().apply_move(4).unwrap();
        assert_eq!(game.board().square(Position::Center), Square::Occupied(Mark::X));
        assert_eq!(game.current_player(), Mark::X);
        assert_eq!(game.evaluate().current_player(), Mark::O);
    }

    #[test]
    fn test_apply_move_rejects_occupied_and_out_of_range() {
        let game = GameState::new().apply_move(4).unwrap().evaluate();
        assert_eq!(game.apply_move(4), Err(MoveError::InvalidMove(4)));
        assert_eq!(game.apply_move(9), Err(MoveError::InvalidMove(9)));
    }

    #[test]
    fn test_apply_move_rejects_finished_game() {
        let game = GameState::replay(&[0, 3, 1, 4, 2]).unwrap();
        assert_eq!(game.apply_move(8), Err(MoveError::GameInactive));
    }

    #[test]
    fn test_try_move_rejects_wrong_turn() {
        let game = GameState::new();
        assert_eq!(game.try_move(0, Mark::O), Err(MoveError::WrongTurn(Mark::O)));
    }

    #[test]
    fn test_evaluate_is_noop_on_terminal_state() {
        let game = GameState::replay(&[0, 3, 1, 4, 2]).unwrap();
        assert_eq!(game.evaluate(), game);
    }

    #[test]
    fn test_winner_is_current_player() {
        // The line belongs to O, but evaluate credits whoever is marked as
        // the mover.
        let game = GameState::from_board(Board::parse("OOO XX. X..").unwrap(), Mark::O).evaluate();
        assert_eq!(game.status(), GameStatus::Won(Mark::O));
        assert_eq!(
            game.winning_line().map(|line| line.cells),
            Some([Position::TopLeft, Position::TopCenter, Position::TopRight])
        );
    }

    #[test]
    fn test_request_computer_move_on_finished_game() {
        let game = GameState::replay(&[0, 3, 1, 4, 2]).unwrap();
        assert_eq!(game.request_computer_move(), Err(MoveError::GameInactive));
    }

    #[test]
    fn test_valid_moves_empty_after_game_over() {
        let game = GameState::replay(&[0, 3, 1, 4, 2]).unwrap();
        assert!(game.valid_moves().is_empty());
        assert_eq!(GameState::new().valid_moves().len(), 9);
    }
}
