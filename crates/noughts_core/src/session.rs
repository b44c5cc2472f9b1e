//! Session policy: who plays, and when the engine moves.

use crate::error::{EngineError, MoveError};
use crate::game::Game;
use crate::search::{self, BestMove};
use crate::types::{GameStatus, Player};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Who the human plays against.
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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Mode {
    /// Two humans share the board.
    HumanVsHuman,
    /// One human against the engine.
    #[default]
    HumanVsEngine,
}

impl Mode {
    /// Returns the display label for this mode.
    pub fn label(self) -> &'static str {
        match self {
            Self::HumanVsHuman => "Human vs Human",
            Self::HumanVsEngine => "Human vs Engine",
        }
    }

    /// Toggles between the two modes.
    pub fn toggle(self) -> Self {
        match self {
            Self::HumanVsHuman => Self::HumanVsEngine,
            Self::HumanVsEngine => Self::HumanVsHuman,
        }
    }
}

/// Who a move request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Origin {
    /// A person at the board.
    Human,
    /// The search engine.
    Engine,
}

/// Mode and side assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Opponent type.
    pub mode: Mode,
    /// The side the human plays in engine mode.
    pub human_side: Player,
}

/// A move the engine chose and played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineMove {
    /// Square played.
    pub index: usize,
    /// Search score from the engine's perspective.
    pub score: i32,
    /// Status after the move.
    pub status: GameStatus,
}

/// A match plus the policy that decides whose move is allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    game: Game,
    config: SessionConfig,
}

impl Session {
    /// Creates a session with a fresh match.
    #[instrument]
    pub fn new(config: SessionConfig) -> Self {
        info!(mode = %config.mode, human_side = %config.human_side, "Creating session");
        Self {
            game: Game::new(),
            config,
        }
    }

    /// The live match.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Current mode and side assignment.
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// The side the engine plays in engine mode.
    pub fn engine_side(&self) -> Player {
        self.config.human_side.opponent()
    }

    /// Switches mode and starts a new match.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: Mode) {
        self.config.mode = mode;
        self.new_match();
    }

    /// Switches the human's side and starts a new match.
    #[instrument(skip(self))]
    pub fn set_human_side(&mut self, side: Player) {
        self.config.human_side = side;
        self.new_match();
    }

    /// Replaces the whole configuration and starts a new match.
    #[instrument(skip(self))]
    pub fn set_config(&mut self, config: SessionConfig) {
        self.config = config;
        self.new_match();
    }

    /// Starts over with an empty board, X to move.
    pub fn new_match(&mut self) {
        self.game.new_match();
    }

    /// True iff the engine should move now.
    pub fn is_engines_turn(&self) -> bool {
        self.config.mode == Mode::HumanVsEngine
            && self.game.status() == GameStatus::InProgress
            && self.game.to_move() == self.engine_side()
    }

    /// Whether `origin` may move in the current position.
    fn admits(&self, origin: Origin) -> bool {
        match (self.config.mode, origin) {
            (Mode::HumanVsHuman, Origin::Human) => true,
            (Mode::HumanVsHuman, Origin::Engine) => false,
            (Mode::HumanVsEngine, Origin::Human) => self.game.to_move() == self.config.human_side,
            (Mode::HumanVsEngine, Origin::Engine) => self.game.to_move() == self.engine_side(),
        }
    }

    /// Applies a move on behalf of `origin`.
    ///
    /// A human cannot move for the engine and the engine cannot move for a
    /// human; such requests leave the session unchanged.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, index: usize, origin: Origin) -> Result<GameStatus, MoveError> {
        if !self.game.status().is_terminal() && !self.admits(origin) {
            let to_move = self.game.to_move();
            warn!(%to_move, "Move out of turn");
            return Err(MoveError::NotYourTurn { origin, to_move });
        }
        self.game.apply_move(index)
    }

    /// Rolls back the last move, or the last move pair against the engine.
    ///
    /// Returns the number of moves undone.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> usize {
        let steps = match self.config.mode {
            Mode::HumanVsHuman => 1,
            Mode::HumanVsEngine if self.game.history_len() >= 2 => 2,
            Mode::HumanVsEngine => 1,
        };
        self.game.undo(steps)
    }

    /// Plays the engine's move if it is the engine's turn.
    ///
    /// Returns `None` when the engine has nothing to do. An error means the
    /// search and the rules disagree, which callers treat as fatal.
    #[instrument(skip(self))]
    pub fn engine_reply(&mut self) -> Result<Option<EngineMove>, EngineError> {
        if !self.is_engines_turn() {
            return Ok(None);
        }

        let side = self.game.to_move();
        let best = search::best_move(self.game.board(), side, side.opponent());
        let index = best.index.ok_or_else(|| {
            EngineError::new(format!(
                "search returned no move for {side} on in-progress board {}",
                self.game.board().notation()
            ))
        })?;

        let status = self
            .apply_move(index, Origin::Engine)
            .map_err(|e| EngineError::new(format!("engine move {index} was rejected: {e}")))?;

        info!(index, score = best.score, %status, "Engine moved");
        Ok(Some(EngineMove {
            index,
            score: best.score,
            status,
        }))
    }

    /// The engine's choice for the side to move, without playing it.
    pub fn hint(&self) -> Option<BestMove> {
        if self.game.status().is_terminal() {
            return None;
        }
        let side = self.game.to_move();
        Some(search::best_move(self.game.board(), side, side.opponent()))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
