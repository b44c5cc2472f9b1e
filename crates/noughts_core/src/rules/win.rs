//! Win detection.

use crate::types::{Board, Line, Player, Square};

/// The eight winning lines: rows, then columns, then diagonals.
pub const LINES: [Line; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks if there is a winner on the board.
///
/// Returns the player and the first completed line in [`LINES`] order,
/// `None` otherwise.
pub fn check_winner(board: &Board) -> Option<(Player, Line)> {
    let squares = board.squares();
    LINES.iter().find_map(|&line| {
        let [a, b, c] = line;
        match squares[a] {
            Square::Occupied(player) if squares[a] == squares[b] && squares[a] == squares[c] => {
                Some((player, line))
            }
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board: Board = "XXX......".parse().expect("valid board");
        assert_eq!(check_winner(&board), Some((Player::X, [0, 1, 2])));
    }

    #[test]
    fn test_winner_column() {
        let board: Board = ".O..O..O.".parse().expect("valid board");
        assert_eq!(check_winner(&board), Some((Player::O, [1, 4, 7])));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board: Board = "..O.O.O..".parse().expect("valid board");
        assert_eq!(check_winner(&board), Some((Player::O, [2, 4, 6])));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board: Board = "XX.......".parse().expect("valid board");
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board: Board = "XOX......".parse().expect("valid board");
        assert_eq!(check_winner(&board), None);
    }
}
