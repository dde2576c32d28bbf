//! Win detection logic for tic-tac-toe.

use super::super::{Board, Mark, Position, Square};
use serde::{Deserialize, Serialize};

/// The eight winning triples: three rows, three columns, two diagonals.
pub const WIN_LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// A completed line and the mark that filled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinningLine {
    /// Mark occupying all three cells.
    pub mark: Mark,
    /// The three cells, in line order.
    pub cells: [Position; 3],
}

/// First completed line on the board, scanning [`WIN_LINES`] in order.
pub fn winning_line(board: &Board) -> Option<WinningLine> {
    WIN_LINES.into_iter().find_map(|cells @ [a, b, c]| {
        let sq = board.square(a);
        match sq {
            Square::Occupied(mark) if sq == board.square(b) && sq == board.square(c) => {
                Some(WinningLine { mark, cells })
            }
            _ => None,
        }
    })
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(mark)` if a mark has three in a row, `None` otherwise.
pub fn check_winner(board: &Board) -> Option<Mark> {
    winning_line(board).map(|line| line.mark)
}

/// Whether `mark` holds any complete line.
pub fn has_line(board: &Board, mark: Mark) -> bool {
    let sq = Square::Occupied(mark);
    WIN_LINES
        .iter()
        .any(|line| line.iter().all(|pos| board.square(*pos) == sq))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = Board::parse("XXX OO. ...").unwrap();
        assert_eq!(check_winner(&board), Some(Mark::X));
    }

    #[test]
    fn test_winner_diagonal() {
        let board = Board::parse("O.X .OX ..O").unwrap();
        assert_eq!(check_winner(&board), Some(Mark::O));
        let line = winning_line(&board).unwrap();
        assert_eq!(line.cells, [Position::TopLeft, Position::Center, Position::BottomRight]);
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = Board::parse("XX. ... ...").unwrap();
        assert_eq!(check_winner(&board), None);
        assert!(!has_line(&board, Mark::X));
    }

    #[test]
    fn test_has_line_checks_each_mark() {
        let board = Board::parse("OOO XX. X..").unwrap();
        assert!(has_line(&board, Mark::O));
        assert!(!has_line(&board, Mark::X));
    }
}
