//! Game rules.
//!
//! Pure functions over a [`Board`]. Rules are kept apart from board
//! storage so the match state machine and the search share one definition
//! of a finished game.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner};

use crate::types::{Board, GameStatus};

/// Indices of empty squares in ascending order.
///
/// Empty when the board is full.
pub fn legal_moves(board: &Board) -> Vec<usize> {
    (0..Board::CELLS).filter(|&i| board.is_empty(i)).collect()
}

/// Derives the match status from the board alone.
///
/// A completed line takes precedence over a full board.
pub fn evaluate(board: &Board) -> GameStatus {
    if let Some((winner, line)) = check_winner(board) {
        GameStatus::Won { winner, line }
    } else if is_full(board) {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Player;

    #[test]
    fn test_legal_moves_ascending() {
        let board: Board = "X...O...X".parse().expect("valid board");
        assert_eq!(legal_moves(&board), vec![1, 2, 3, 5, 6, 7]);
        assert_eq!(legal_moves(&Board::new()), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_legal_moves_full_board() {
        let board: Board = "XOXXOOOXX".parse().expect("valid board");
        assert!(legal_moves(&board).is_empty());
    }

    #[test]
    fn test_evaluate_center_opening_in_progress() {
        let board: Board = "....X....".parse().expect("valid board");
        assert_eq!(evaluate(&board), GameStatus::InProgress);
    }

    #[test]
    fn test_evaluate_full_board_without_line_is_draw() {
        let board: Board = "XOXXOOOXX".parse().expect("valid board");
        assert_eq!(evaluate(&board), GameStatus::Draw);
    }

    #[test]
    fn test_evaluate_top_row_win() {
        let board: Board = "XXXOO....".parse().expect("valid board");
        assert_eq!(
            evaluate(&board),
            GameStatus::Won {
                winner: Player::X,
                line: [0, 1, 2]
            }
        );
    }

    #[test]
    fn test_win_on_full_board_beats_draw() {
        // Last move completes the diagonal and fills the board.
        let board: Board = "XOXOXOOXX".parse().expect("valid board");
        assert_eq!(
            evaluate(&board),
            GameStatus::Won {
                winner: Player::X,
                line: [0, 4, 8]
            }
        );
    }

    #[test]
    fn test_evaluate_is_pure() {
        let board: Board = "XO.OX....".parse().expect("valid board");
        assert_eq!(evaluate(&board), evaluate(&board));
        assert_eq!(board.notation(), "XO.OX....");
    }
}
