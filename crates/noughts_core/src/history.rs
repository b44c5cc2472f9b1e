//! Undo history of prior match states.

use crate::types::{Board, Player};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// The board and side to move, captured before a move was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Snapshot {
    board: Board,
    to_move: Player,
}

/// Append-only stack of snapshots; undo pops from the end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    entries: Vec<Snapshot>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a snapshot.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.push(snapshot);
    }

    /// Pops up to `steps` entries.
    ///
    /// Returns the oldest popped snapshot (the state to restore) together
    /// with the number of entries removed, or `None` when nothing was popped.
    pub fn pop(&mut self, steps: usize) -> Option<(Snapshot, usize)> {
        let steps = steps.min(self.entries.len());
        if steps == 0 {
            return None;
        }
        let popped = self.entries.split_off(self.entries.len() - steps);
        popped.into_iter().next().map(|oldest| (oldest, steps))
    }

    /// Number of recorded snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing can be undone.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forgets every snapshot.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Snapshots, oldest first.
    pub fn entries(&self) -> &[Snapshot] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(notation: &str, to_move: Player) -> Snapshot {
        Snapshot::new(notation.parse().expect("valid board"), to_move)
    }

    #[test]
    fn test_pop_on_empty_is_none() {
        let mut history = History::new();
        assert_eq!(history.pop(1), None);
        assert_eq!(history.pop(2), None);
    }

    #[test]
    fn test_pop_two_returns_oldest_of_pair() {
        let mut history = History::new();
        history.push(snapshot(".........", Player::X));
        history.push(snapshot("X........", Player::O));
        history.push(snapshot("XO.......", Player::X));

        let (restored, popped) = history.pop(2).expect("entries to pop");
        assert_eq!(popped, 2);
        assert_eq!(restored, snapshot("X........", Player::O));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_pop_is_capped_at_length() {
        let mut history = History::new();
        history.push(snapshot(".........", Player::X));

        let (restored, popped) = history.pop(2).expect("entry to pop");
        assert_eq!(popped, 1);
        assert_eq!(*restored.to_move(), Player::X);
        assert!(history.is_empty());
    }
}
