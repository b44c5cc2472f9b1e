//! Core domain types for noughts and crosses.

use crate::error::{BoardParseError, MoveError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Player {
    /// Player X (goes first).
    #[default]
    #[serde(alias = "x")]
    X,
    /// Player O (goes second).
    #[serde(alias = "o")]
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// The character used for this player's mark.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }
}

/// Three board indices that win the match when held by one side.
pub type Line = [usize; 3];

/// 3x3 board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Number of cells on the board.
    pub const CELLS: usize = 9;

    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; Self::CELLS],
        }
    }

    /// Returns a copy of the board with `player` placed at `index`.
    ///
    /// Only checks the square itself; whether the match is still running is
    /// the caller's concern.
    pub fn with_move(&self, index: usize, player: Player) -> Result<Self, MoveError> {
        match self.get(index) {
            None => Err(MoveError::OutOfBounds(index)),
            Some(Square::Occupied(_)) => Err(MoveError::SquareOccupied(index)),
            Some(Square::Empty) => {
                let mut next = self.clone();
                next.put(index, Square::Occupied(player));
                Ok(next)
            }
        }
    }

    /// Gets the square at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Square> {
        self.squares.get(index).copied()
    }

    /// Checks if a square is empty. Out-of-range indices are never empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Square::Empty))
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of squares held by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }

    /// Number of occupied squares.
    pub fn occupied(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// The side to move implied by piece counts, assuming X opened.
    ///
    /// Returns `None` when the counts cannot arise from alternating play.
    pub fn implied_to_move(&self) -> Option<Player> {
        let x = self.count(Player::X);
        let o = self.count(Player::O);
        if x == o {
            Some(Player::X)
        } else if x == o + 1 {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Compact one-line notation: `X`, `O` and `.` for empty.
    pub fn notation(&self) -> String {
        self.squares
            .iter()
            .map(|s| s.player().map_or('.', Player::symbol))
            .collect()
    }

    /// Writes a square without bounds checks beyond the array's own.
    ///
    /// Callers validate the index first.
    pub(crate) fn put(&mut self, index: usize, square: Square) {
        self.squares[index] = square;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    /// Renders the grid with 1-based numbers on empty squares.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                match self.squares[index] {
                    Square::Empty => write!(f, "{}", index + 1)?,
                    Square::Occupied(player) => write!(f, "{}", player.symbol())?,
                }
                if col < 2 {
                    f.write_str("|")?;
                }
            }
            if row < 2 {
                f.write_str("\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses nine cells of `X`, `O`, `.`, `_` or `-`; whitespace and `|` are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut squares = [Square::Empty; Board::CELLS];
        let mut filled = 0;

        for ch in s.chars().filter(|c| !c.is_whitespace() && *c != '|') {
            let square = match ch {
                'X' | 'x' => Square::Occupied(Player::X),
                'O' | 'o' => Square::Occupied(Player::O),
                '.' | '_' | '-' => Square::Empty,
                other => {
                    return Err(BoardParseError::new(format!(
                        "unexpected character {other:?} in board {s:?}"
                    )));
                }
            };
            let Some(slot) = squares.get_mut(filled) else {
                return Err(BoardParseError::new(format!(
                    "board {s:?} has more than {} cells",
                    Board::CELLS
                )));
            };
            *slot = square;
            filled += 1;
        }

        if filled != Board::CELLS {
            return Err(BoardParseError::new(format!(
                "board {s:?} has {filled} cells, expected {}",
                Board::CELLS
            )));
        }

        Ok(Self { squares })
    }
}

/// Current status of the game, always derived from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// A side completed a line.
    Won {
        /// The side holding the line.
        winner: Player,
        /// The three winning indices.
        line: Line,
    },
    /// Board is full with no line.
    Draw,
}

impl GameStatus {
    /// True once the match has ended.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameStatus::Won { winner, .. } => Some(*winner),
            _ => None,
        }
    }

    /// Returns the winning line if there is one.
    pub fn line(&self) -> Option<Line> {
        match self {
            GameStatus::Won { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "In progress"),
            GameStatus::Won { winner, .. } => write!(f, "{winner} wins"),
            GameStatus::Draw => write!(f, "Draw"),
        }
    }
}
