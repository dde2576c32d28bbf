//! Tests for the game engine state machine.

use noughts_core::invariants::{InvariantSet, ReachableInvariants};
use noughts_core::{Board, GameState, GameStatus, Mark, MoveError, Position, Square, WIN_LINES};

#[test]
fn test_fresh_game_evaluates_to_active_with_x() {
    let game = GameState::new().evaluate();
    assert_eq!(game.status(), GameStatus::Active);
    assert_eq!(game.current_player(), Mark::X);
}

#[test]
fn test_top_row_win() {
    let game = GameState::replay(&[0, 4, 1, 7, 2]).expect("Valid replay");
    assert_eq!(game.status(), GameStatus::Won(Mark::X));
    assert_eq!(game.current_player(), Mark::X);
    assert_eq!(
        game.winning_line().map(|line| line.cells),
        Some([Position::TopLeft, Position::TopCenter, Position::TopRight])
    );
}

#[test]
fn test_full_board_without_line_is_draw() {
    // X O X / O X O / O X O
    let board = Board::parse("XOX OXO OXO").unwrap();
    for mover in [Mark::X, Mark::O] {
        let game = GameState::from_board(board, mover).evaluate();
        assert_eq!(game.status(), GameStatus::Draw);
        assert!(game.winning_line().is_none());
    }
}

#[test]
fn test_draw_by_play() {
    let game = GameState::replay(&[0, 4, 2, 1, 3, 5, 7, 6, 8]).expect("Valid replay");
    assert_eq!(game.status(), GameStatus::Draw);
}

#[test]
fn test_every_win_line_is_detected() {
    for mark in [Mark::X, Mark::O] {
        for line in WIN_LINES {
            let mut board = Board::new();
            for pos in line {
                board.set(pos, Square::Occupied(mark));
            }
            let game = GameState::from_board(board, mark).evaluate();
            assert_eq!(game.status(), GameStatus::Won(mark), "line {:?}", line);
            assert_eq!(game.winning_line().map(|l| l.cells), Some(line));
        }
    }
}

#[test]
fn test_terminal_state_rejects_moves() {
    let game = GameState::replay(&[0, 4, 1, 7, 2]).unwrap();
    assert_eq!(game.try_move(8, Mark::O), Err(MoveError::GameInactive));
    assert_eq!(game.try_move(8, Mark::X), Err(MoveError::GameInactive));
    assert_eq!(game.apply_move(8), Err(MoveError::GameInactive));
}

#[test]
fn test_rejected_move_leaves_state_unchanged() {
    let game = GameState::replay(&[4]).unwrap();
    let before = game.clone();

    assert_eq!(game.try_move(4, Mark::O), Err(MoveError::InvalidMove(4)));
    assert_eq!(game.try_move(12, Mark::O), Err(MoveError::InvalidMove(12)));
    assert_eq!(game.try_move(0, Mark::X), Err(MoveError::WrongTurn(Mark::X)));
    assert_eq!(game, before);
}

#[test]
fn test_reset_discards_finished_game() {
    let finished = GameState::replay(&[0, 4, 1, 7, 2]).unwrap();
    assert!(finished.status().is_terminal());

    let fresh = GameState::reset();
    assert_eq!(fresh.status(), GameStatus::Active);
    assert_eq!(fresh.current_player(), Mark::X);
    assert_eq!(fresh.board(), &Board::new());
}

/// Walks every game reachable by legal play and checks the per-move
/// properties at each step.
fn walk(game: &GameState, visited: &mut usize) {
    *visited += 1;
    assert!(ReachableInvariants::check_all(game).is_ok(), "{:?}", game);

    for pos in game.valid_moves() {
        let mover = game.current_player();
        let next = game.try_move(pos.to_index(), mover).expect("legal move");

        // No overwrite: exactly the chosen square changed.
        for other in Position::ALL {
            if other == pos {
                assert_eq!(next.board().square(other), Square::Occupied(mover));
            } else {
                assert_eq!(next.board().square(other), game.board().square(other));
            }
        }

        // Strict alternation while active.
        match next.status() {
            GameStatus::Active => assert_eq!(next.current_player(), mover.opponent()),
            GameStatus::Won(winner) => {
                assert_eq!(winner, mover);
                assert_eq!(next.current_player(), mover);
            }
            GameStatus::Draw => assert!(next.valid_moves().is_empty()),
        }

        walk(&next, visited);
    }
}

#[test]
fn test_all_reachable_games_preserve_invariants() {
    let mut visited = 0;
    walk(&GameState::new(), &mut visited);
    // 549,946 nodes in the full tic-tac-toe game tree, root included.
    assert_eq!(visited, 549_946);
}

#[test]
fn test_state_serializes_for_rendering() {
    let game = GameState::replay(&[4, 0]).unwrap();
    let json = serde_json::to_string(&game).unwrap();
    let back: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, game);
}
