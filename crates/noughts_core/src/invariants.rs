//! Invariants of a live match.
//!
//! Checked after every accepted move in debug builds and testable on
//! their own.

use crate::game::Game;
use crate::types::Player;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Players alternate X, O, X, O, ... starting with X.
pub struct AlternatingTurnInvariant;

impl Invariant<Game> for AlternatingTurnInvariant {
    fn holds(game: &Game) -> bool {
        game.board().implied_to_move() == Some(game.to_move())
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}

/// One snapshot per placed mark, each a prefix of the next.
pub struct HistoryConsistentInvariant;

impl Invariant<Game> for HistoryConsistentInvariant {
    fn holds(game: &Game) -> bool {
        let entries = game.history().entries();
        if entries.len() != game.board().occupied() {
            return false;
        }

        entries.iter().enumerate().all(|(ply, snapshot)| {
            let expected = if ply % 2 == 0 { Player::X } else { Player::O };
            snapshot.board().occupied() == ply
                && *snapshot.to_move() == expected
                && snapshot
                    .board()
                    .squares()
                    .iter()
                    .zip(game.board().squares())
                    .all(|(then, now)| then.player().is_none() || then == now)
        })
    }

    fn description() -> &'static str {
        "History holds one snapshot per move and marks are never removed"
    }
}

/// Panics in debug builds if a match invariant is broken.
pub(crate) fn assert_invariants(game: &Game) {
    debug_assert!(
        AlternatingTurnInvariant::holds(game),
        "{}",
        AlternatingTurnInvariant::description()
    );
    debug_assert!(
        HistoryConsistentInvariant::holds(game),
        "{}",
        HistoryConsistentInvariant::description()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_game_holds() {
        let game = Game::new();
        assert!(AlternatingTurnInvariant::holds(&game));
        assert!(HistoryConsistentInvariant::holds(&game));
    }

    #[test]
    fn test_holds_through_moves_and_undo() {
        let mut game = Game::new();
        for index in [4, 0, 8, 2] {
            game.apply_move(index).expect("legal move");
            assert!(AlternatingTurnInvariant::holds(&game));
            assert!(HistoryConsistentInvariant::holds(&game));
        }
        game.undo(1);
        assert!(AlternatingTurnInvariant::holds(&game));
        assert!(HistoryConsistentInvariant::holds(&game));
    }
}
