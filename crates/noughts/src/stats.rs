//! Win and draw tally, persisted as JSON.

use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts_core::{GameStatus, Player};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Finished matches counted by result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Tally {
    #[serde(default)]
    x_wins: u32,
    #[serde(default)]
    o_wins: u32,
    #[serde(default)]
    draws: u32,
}

impl Tally {
    /// Counts a finished match. In-progress statuses are ignored.
    #[instrument(skip(self))]
    pub fn record(&mut self, status: &GameStatus) {
        match status {
            GameStatus::InProgress => return,
            GameStatus::Won {
                winner: Player::X, ..
            } => self.x_wins += 1,
            GameStatus::Won {
                winner: Player::O, ..
            } => self.o_wins += 1,
            GameStatus::Draw => self.draws += 1,
        }
        info!(
            x_wins = self.x_wins,
            o_wins = self.o_wins,
            draws = self.draws,
            "Result recorded"
        );
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Number of finished matches.
    pub fn total(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }

    /// Loads the tally, or an empty one if the file does not exist.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StatsError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No statistics file, starting from zero");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| StatsError::new(format!("Failed to read statistics: {}", e)))?;
        serde_json::from_str(&content)
            .map_err(|e| StatsError::new(format!("Failed to parse statistics: {}", e)))
    }

    /// Writes the tally as pretty JSON.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StatsError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| StatsError::new(format!("Failed to encode statistics: {}", e)))?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| StatsError::new(format!("Failed to write statistics: {}", e)))?;
        debug!("Statistics saved");
        Ok(())
    }
}

/// Statistics persistence error.
#[derive(Debug, Clone, Display, Error)]
#[display("Stats error: {} at {}:{}", message, file, line)]
pub struct StatsError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StatsError {
    /// Creates a new statistics error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
