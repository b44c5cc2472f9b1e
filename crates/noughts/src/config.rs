//! User preferences persisted as TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts_core::{Mode, Player, SessionConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Colour palette of the terminal UI.
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
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    /// Light text on a dark background.
    #[default]
    Dark,
    /// Dark text on a light background.
    Light,
}

impl Theme {
    /// The other palette.
    pub fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Preferences restored between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Preferences {
    /// Opponent type.
    #[serde(default)]
    mode: Mode,

    /// Side the human plays against the engine.
    #[serde(default)]
    human_side: Player,

    /// Pause before the engine replies, in milliseconds.
    #[serde(default = "default_engine_delay_ms")]
    engine_delay_ms: u64,

    /// Colour palette.
    #[serde(default)]
    theme: Theme,

    /// Ring the terminal bell on moves, results, undo and new matches.
    #[serde(default = "default_sound")]
    sound: bool,
}

#[instrument]
fn default_engine_delay_ms() -> u64 {
    350
}

fn default_sound() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            human_side: Player::default(),
            engine_delay_ms: default_engine_delay_ms(),
            theme: Theme::default(),
            sound: default_sound(),
        }
    }
}

impl Preferences {
    /// Loads preferences from a TOML file, or defaults if it does not exist.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No preferences file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new(format!("Failed to read preferences: {}", e)))?;
        let prefs: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse preferences: {}", e)))?;

        info!(
            mode = %prefs.mode,
            human_side = %prefs.human_side,
            theme = %prefs.theme,
            sound = prefs.sound,
            "Preferences loaded"
        );
        Ok(prefs)
    }

    /// Writes preferences as TOML.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to encode preferences: {}", e)))?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| ConfigError::new(format!("Failed to write preferences: {}", e)))?;
        debug!("Preferences saved");
        Ok(())
    }

    /// Applies command-line overrides on top of loaded values.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        mode: Option<Mode>,
        human_side: Option<Player>,
        engine_delay_ms: Option<u64>,
    ) -> Self {
        if let Some(mode) = mode {
            self.mode = mode;
        }
        if let Some(side) = human_side {
            self.human_side = side;
        }
        if let Some(delay) = engine_delay_ms {
            self.engine_delay_ms = delay;
        }
        self
    }

    /// The session settings these preferences describe.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            mode: self.mode,
            human_side: self.human_side,
        }
    }

    /// Stores a session's settings.
    pub fn set_session_config(&mut self, config: SessionConfig) {
        self.mode = config.mode;
        self.human_side = config.human_side;
    }

    /// Switches the colour palette.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Turns the bell on or off.
    pub fn set_sound(&mut self, sound: bool) {
        self.sound = sound;
    }

    /// Engine reply delay.
    pub fn engine_delay(&self) -> Duration {
        Duration::from_millis(self.engine_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
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
