//! Error types for the game core.

use crate::session::Origin;
use crate::types::Player;
use derive_more::{Display, Error};
use tracing::instrument;

/// Why a move request left the match unchanged.
///
/// A rejected move is a no-op: callers re-read state rather than treat
/// this as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The index is outside 0-8.
    #[display("Position {} is off the board", _0)]
    OutOfBounds(#[error(not(source))] usize),

    /// The square is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(#[error(not(source))] usize),

    /// The match is already over.
    #[display("Game is already over")]
    GameOver,

    /// The session does not let this origin move now.
    #[display("{origin} may not move while {to_move} is to move")]
    NotYourTurn {
        /// Who asked to move.
        origin: Origin,
        /// Side whose turn it is.
        to_move: Player,
    },
}

/// The search and the rules disagree about a position.
///
/// This is an internal invariant failure, never a recoverable condition.
#[derive(Debug, Clone, Display, Error)]
#[display("Engine error: {} at {}:{}", message, file, line)]
pub struct EngineError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl EngineError {
    /// Creates a new engine error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// A board string could not be parsed.
#[derive(Debug, Clone, Display, Error)]
#[display("Board parse error: {} at {}:{}", message, file, line)]
pub struct BoardParseError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl BoardParseError {
    /// Creates a new parse error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
