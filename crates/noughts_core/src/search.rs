//! Perfect-play search: exhaustive negamax with alpha-beta pruning.
//!
//! The game tree is at most nine plies deep, so every position is searched
//! to the end. Terminal positions score `10 - depth` for the side to move
//! and `depth - 10` against it, where `depth` counts plies from the root.
//! Quicker wins therefore outrank slower ones and slower losses outrank
//! quicker ones.

use crate::rules::{evaluate, legal_moves};
use crate::types::{Board, GameStatus, Player, Square};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use tracing::{debug, instrument};

/// Score of an immediate win.
pub const WIN_SCORE: i32 = 10;

/// Bound outside every reachable score.
const INFINITY: i32 = 1_000;

/// The chosen move and its score from the mover's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BestMove {
    /// Positive when the mover can force a win, zero for a draw.
    pub score: i32,
    /// `None` only when the position was already terminal.
    pub index: Option<usize>,
}

/// Result of a root search with the work it took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct SearchReport {
    best: BestMove,
    nodes: u64,
}

/// Finds the optimal move for `side` against `other`.
///
/// Legal moves are tried in ascending index order and the first move with
/// the greatest score is kept, so the result is deterministic.
pub fn best_move(board: &Board, side: Player, other: Player) -> BestMove {
    *search(board, side, other).best()
}

/// Like [`best_move`], also reporting the number of nodes visited.
#[instrument(skip(board), fields(board = %board.notation()))]
pub fn search(board: &Board, side: Player, other: Player) -> SearchReport {
    let mut searcher = Searcher::default();

    if let Some(score) = terminal_score(&evaluate(board), side, 0) {
        debug!(score, "Root position is terminal");
        return SearchReport {
            best: BestMove { score, index: None },
            nodes: 1,
        };
    }

    let mut scratch = board.clone();
    let mut best = BestMove {
        score: -INFINITY,
        index: None,
    };
    let mut alpha = -INFINITY;
    let beta = INFINITY;

    for index in legal_moves(&scratch) {
        let score = {
            let mut trial = Trial::place(&mut scratch, index, side);
            -searcher.negamax(&mut trial, other, side, -beta, -alpha, 1)
        };
        if score > best.score {
            best = BestMove {
                score,
                index: Some(index),
            };
        }
        alpha = alpha.max(score);
    }

    debug!(
        index = ?best.index,
        score = best.score,
        nodes = searcher.nodes,
        "Search complete"
    );

    SearchReport {
        best,
        nodes: searcher.nodes,
    }
}

/// Score of a finished position for `side`, `None` while play continues.
fn terminal_score(status: &GameStatus, side: Player, depth: i32) -> Option<i32> {
    match status {
        GameStatus::InProgress => None,
        GameStatus::Draw => Some(0),
        GameStatus::Won { winner, .. } if *winner == side => Some(WIN_SCORE - depth),
        GameStatus::Won { .. } => Some(depth - WIN_SCORE),
    }
}

#[derive(Debug, Default)]
struct Searcher {
    nodes: u64,
}

impl Searcher {
    /// Scores `board` for `side`, the player about to move.
    fn negamax(
        &mut self,
        board: &mut Board,
        side: Player,
        other: Player,
        mut alpha: i32,
        beta: i32,
        depth: i32,
    ) -> i32 {
        self.nodes += 1;

        if let Some(score) = terminal_score(&evaluate(board), side, depth) {
            return score;
        }

        let mut best = -INFINITY;
        for index in legal_moves(board) {
            let score = {
                let mut trial = Trial::place(board, index, side);
                -self.negamax(&mut trial, other, side, -beta, -alpha, depth + 1)
            };
            best = best.max(score);
            alpha = alpha.max(best);
            if alpha >= beta {
                break;
            }
        }
        best
    }
}

/// A mark placed for the duration of one recursive call.
///
/// The square is cleared when the guard drops, on every exit path.
struct Trial<'a> {
    board: &'a mut Board,
    index: usize,
}

impl<'a> Trial<'a> {
    fn place(board: &'a mut Board, index: usize, player: Player) -> Self {
        board.put(index, Square::Occupied(player));
        Self { board, index }
    }
}

impl Deref for Trial<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Trial<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Trial<'_> {
    fn drop(&mut self) {
        self.board.put(self.index, Square::Empty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(notation: &str) -> Board {
        notation.parse().expect("valid board")
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let best = best_move(&Board::new(), Player::X, Player::O);
        assert_eq!(best.score, 0);
        assert!(best.index.is_some());
    }

    #[test]
    fn test_takes_immediate_win() {
        // X X . / O O . / . . .  with X to move: 2 wins at once.
        let best = best_move(&board("XX.OO...."), Player::X, Player::O);
        assert_eq!(best, BestMove { score: 9, index: Some(2) });
    }

    #[test]
    fn test_blocks_immediate_threat() {
        // X X . / O . . / . . .  with O to move: only 2 avoids losing next ply.
        let best = best_move(&board("XX.O....."), Player::O, Player::X);
        assert_eq!(best.index, Some(2));
        assert!(best.score <= 0);
    }

    #[test]
    fn test_prefers_quicker_win() {
        // O to move on X X . / O O . / . . . : 5 wins now (score 9); 2 only wins later.
        let best = best_move(&board("XX.OO...."), Player::O, Player::X);
        assert_eq!(best, BestMove { score: 9, index: Some(5) });
    }

    #[test]
    fn test_terminal_root_has_no_move() {
        let won = best_move(&board("XXXOO...."), Player::O, Player::X);
        assert_eq!(won, BestMove { score: -WIN_SCORE, index: None });

        let won = best_move(&board("XXXOO...."), Player::X, Player::O);
        assert_eq!(won, BestMove { score: WIN_SCORE, index: None });

        let drawn = best_move(&board("XOXXOOOXX"), Player::O, Player::X);
        assert_eq!(drawn, BestMove { score: 0, index: None });
    }

    #[test]
    fn test_search_is_deterministic() {
        let position = board("X...O....");
        let first = search(&position, Player::X, Player::O);
        for _ in 0..3 {
            assert_eq!(search(&position, Player::X, Player::O), first);
        }
    }

    #[test]
    fn test_search_leaves_input_untouched() {
        let position = board("X...O...X");
        let copy = position.clone();
        let _ = search(&position, Player::O, Player::X);
        assert_eq!(position, copy);
    }

    #[test]
    fn test_trial_clears_square_on_drop() {
        let mut position = Board::new();
        {
            let trial = Trial::place(&mut position, 4, Player::X);
            assert_eq!(trial.get(4), Some(Square::Occupied(Player::X)));
        }
        assert!(position.is_empty(4));
    }

    /// Plain negamax without pruning, as a reference for the pruned search.
    fn reference(board: &mut Board, side: Player, depth: i32) -> i32 {
        if let Some(score) = terminal_score(&evaluate(board), side, depth) {
            return score;
        }
        legal_moves(board)
            .into_iter()
            .map(|index| {
                let mut trial = Trial::place(board, index, side);
                -reference(&mut trial, side.opponent(), depth + 1)
            })
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn test_pruning_matches_plain_negamax() {
        for notation in ["X........", "X...O....", "XO..X....", "XX.O.....", "O.X.X...."] {
            let mut position = board(notation);
            let side = position.implied_to_move().expect("alternating board");
            let pruned = best_move(&position, side, side.opponent());

            let mut best: Option<(i32, usize)> = None;
            for index in legal_moves(&position) {
                let score = {
                    let mut trial = Trial::place(&mut position, index, side);
                    -reference(&mut trial, side.opponent(), 1)
                };
                if best.is_none_or(|(s, _)| score > s) {
                    best = Some((score, index));
                }
            }

            let (score, index) = best.expect("legal moves");
            assert_eq!(pruned, BestMove { score, index: Some(index) }, "{notation}");
        }
    }
}
