//! The match state machine.
//!
//! A [`Game`] owns the live board, the side to move and the undo history.
//! Its status is never stored: every query re-derives it from the board, so
//! undo can move a finished match back to [`GameStatus::InProgress`].

use crate::error::MoveError;
use crate::history::{History, Snapshot};
use crate::invariants::assert_invariants;
use crate::rules;
use crate::types::{Board, GameStatus, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// A single match: board, turn and history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    to_move: Player,
    history: History,
}

impl Game {
    /// Creates a new match: empty board, X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Player::X,
            history: History::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Derives the current status from the board.
    pub fn status(&self) -> GameStatus {
        rules::evaluate(&self.board)
    }

    /// Returns the undo history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Number of moves that can be undone.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Empty squares in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        rules::legal_moves(&self.board)
    }

    /// Places the mark of the side to move at `index` (0-8).
    ///
    /// On success the previous board and turn are pushed onto the history,
    /// the turn flips, and the new status is returned. A rejected move leaves
    /// every field untouched.
    #[instrument(skip(self), fields(to_move = %self.to_move))]
    pub fn apply_move(&mut self, index: usize) -> Result<GameStatus, MoveError> {
        if self.status().is_terminal() {
            warn!(index, "Move after the match ended");
            return Err(MoveError::GameOver);
        }

        let mover = self.to_move;
        let next = self
            .board
            .with_move(index, mover)
            .inspect_err(|e| warn!(index, error = %e, "Move rejected"))?;

        let previous = std::mem::replace(&mut self.board, next);
        self.history.push(Snapshot::new(previous, mover));
        self.to_move = mover.opponent();

        assert_invariants(self);

        let status = self.status();
        info!(index, player = %mover, %status, "Move applied");
        Ok(status)
    }

    /// Rolls back up to `steps` moves.
    ///
    /// Restores the board and turn from the oldest popped snapshot and
    /// returns how many entries were popped; zero means nothing changed.
    #[instrument(skip(self), fields(history_len = self.history.len()))]
    pub fn undo(&mut self, steps: usize) -> usize {
        if self.history.is_empty() {
            debug!("Nothing to undo");
            return 0;
        }
        let Some((snapshot, popped)) = self.history.pop(steps) else {
            debug!(steps, "Undo of zero steps");
            return 0;
        };

        self.board = snapshot.board().clone();
        self.to_move = *snapshot.to_move();
        info!(popped, to_move = %self.to_move, status = %self.status(), "Undo applied");
        popped
    }

    /// Discards the match and starts over with X to move.
    #[instrument(skip(self))]
    pub fn new_match(&mut self) {
        self.board = Board::new();
        self.to_move = Player::X;
        self.history.clear();
        info!("New match started");
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Square;

    fn play(game: &mut Game, moves: &[usize]) {
        for &index in moves {
            game.apply_move(index).expect("legal move");
        }
    }

    #[test]
    fn test_new_game() {
        let game = Game::new();
        assert_eq!(game.to_move(), Player::X);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.history_len(), 0);
        assert_eq!(game.legal_moves().len(), 9);
    }

    #[test]
    fn test_center_opening() {
        let mut game = Game::new();
        let status = game.apply_move(4).expect("legal move");
        assert_eq!(status, GameStatus::InProgress);
        assert_eq!(game.to_move(), Player::O);
        assert_eq!(game.board().get(4), Some(Square::Occupied(Player::X)));
        assert_eq!(game.history_len(), 1);
    }

    #[test]
    fn test_occupied_square_is_a_no_op() {
        let mut game = Game::new();
        game.apply_move(4).expect("legal move");
        let before = game.clone();

        assert_eq!(game.apply_move(4), Err(MoveError::SquareOccupied(4)));
        assert_eq!(game, before);
    }

    #[test]
    fn test_out_of_bounds_is_a_no_op() {
        let mut game = Game::new();
        assert_eq!(game.apply_move(9), Err(MoveError::OutOfBounds(9)));
        assert_eq!(game, Game::new());
    }

    #[test]
    fn test_no_moves_after_win() {
        let mut game = Game::new();
        let moves = [0, 3, 1, 4];
        play(&mut game, &moves);
        let status = game.apply_move(2).expect("winning move");
        assert_eq!(
            status,
            GameStatus::Won {
                winner: Player::X,
                line: [0, 1, 2]
            }
        );

        let before = game.clone();
        assert_eq!(game.apply_move(8), Err(MoveError::GameOver));
        assert_eq!(game, before);
    }

    #[test]
    fn test_full_board_draw() {
        let mut game = Game::new();
        // X O X / X O O / O X X
        play(&mut game, &[0, 1, 2, 4, 3, 5, 7, 6]);
        assert_eq!(game.apply_move(8), Ok(GameStatus::Draw));
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn test_undo_round_trip() {
        let mut game = Game::new();
        play(&mut game, &[4, 0]);
        let before = game.clone();

        game.apply_move(8).expect("legal move");
        assert_eq!(game.undo(1), 1);

        assert_eq!(game.board(), before.board());
        assert_eq!(game.to_move(), before.to_move());
        assert_eq!(game.history(), before.history());
    }

    #[test]
    fn test_undo_reverts_a_win() {
        let mut game = Game::new();
        play(&mut game, &[0, 3, 1, 4, 2]);
        assert!(game.status().is_terminal());

        game.undo(1);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.to_move(), Player::X);
    }

    #[test]
    fn test_undo_on_empty_history_is_a_no_op() {
        let mut game = Game::new();
        for _ in 0..3 {
            assert_eq!(game.undo(1), 0);
            assert_eq!(game, Game::new());
        }
    }

    #[test]
    fn test_new_match_clears_everything() {
        let mut game = Game::new();
        play(&mut game, &[4, 0, 8]);
        game.new_match();
        assert_eq!(game, Game::new());
    }

    #[test]
    fn test_turn_alternates() {
        let mut game = Game::new();
        let mut expected = Player::X;
        for index in [4, 0, 8, 2, 1, 7, 3, 5, 6] {
            assert_eq!(game.to_move(), expected);
            if game.apply_move(index).is_ok() {
                expected = expected.opponent();
            }
        }
    }
}
