//! Application state and logic.

use anyhow::Result;
use noughts_core::{GameStatus, Mode, Origin, Player, Position, Session};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::input::{Action, move_cursor};
use crate::config::{Preferences, Theme};
use crate::stats::Tally;

/// Main application state.
#[derive(Debug)]
pub struct App {
    session: Session,
    prefs: Preferences,
    prefs_path: PathBuf,
    tally: Tally,
    stats_path: PathBuf,
    cursor: Position,
    hint: Option<usize>,
    message: String,
    bell: bool,
    should_quit: bool,
}

impl App {
    /// Creates the app with a fresh match from saved preferences.
    #[instrument(skip_all)]
    pub fn new(prefs: Preferences, prefs_path: PathBuf, tally: Tally, stats_path: PathBuf) -> Self {
        Self {
            session: Session::new(prefs.session_config()),
            prefs,
            prefs_path,
            tally,
            stats_path,
            cursor: Position::Center,
            hint: None,
            message: String::new(),
            bell: false,
            should_quit: false,
        }
    }

    /// The live session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Results so far.
    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    /// Current preferences.
    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    /// Active colour palette.
    pub fn theme(&self) -> Theme {
        *self.prefs.theme()
    }

    /// Highlighted square.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Square suggested by the last hint, if still relevant.
    pub fn hint(&self) -> Option<usize> {
        self.hint
    }

    /// Last feedback message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// True once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// True when the engine should reply now.
    pub fn engine_due(&self) -> bool {
        self.session.is_engines_turn()
    }

    /// Pause before the engine replies.
    pub fn engine_delay(&self) -> Duration {
        self.prefs.engine_delay()
    }

    /// Returns and clears the pending bell.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell)
    }

    /// Status line: whose turn it is, or how the match ended.
    pub fn status_line(&self) -> String {
        let game = self.session.game();
        match game.status() {
            GameStatus::Won { winner, .. } => format!("{winner} wins!"),
            GameStatus::Draw => "It's a draw!".to_string(),
            GameStatus::InProgress => {
                let to_move = game.to_move();
                match self.session.config().mode {
                    Mode::HumanVsHuman => format!("{to_move}'s turn"),
                    Mode::HumanVsEngine if self.session.is_engines_turn() => {
                        format!("{to_move}'s turn - engine is thinking...")
                    }
                    Mode::HumanVsEngine => format!("{to_move}'s turn - your move"),
                }
            }
        }
    }

    /// Handles one key action.
    #[instrument(skip(self))]
    pub fn handle(&mut self, action: Action) {
        match action {
            Action::Cursor(key) => self.cursor = move_cursor(self.cursor, key),
            Action::PlaceAtCursor => self.place(self.cursor.to_index()),
            Action::Place(index) => {
                if let Some(pos) = Position::from_index(index) {
                    self.cursor = pos;
                }
                self.place(index);
            }
            Action::Undo => self.undo(),
            Action::NewMatch => {
                self.session.new_match();
                self.hint = None;
                self.message = "New match.".to_string();
                self.ring();
            }
            Action::ToggleMode => {
                let mode = self.session.config().mode.toggle();
                self.session.set_mode(mode);
                self.hint = None;
                self.message = format!("Mode: {}.", mode.label());
                self.persist_prefs();
            }
            Action::ChooseSide(side) => {
                self.session.set_human_side(side);
                self.hint = None;
                self.message = format!("You play {side}.");
                self.persist_prefs();
            }
            Action::ToggleTheme => {
                let theme = self.theme().toggle();
                self.prefs.set_theme(theme);
                self.message = format!("Theme: {theme}.");
                self.persist_prefs();
            }
            Action::ToggleSound => {
                let sound = !*self.prefs.sound();
                self.prefs.set_sound(sound);
                self.message = if sound { "Sound on." } else { "Sound off." }.to_string();
                self.persist_prefs();
            }
            Action::ResetTally => {
                self.tally.reset();
                self.message = "Tally reset.".to_string();
                self.persist_tally();
            }
            Action::Hint => self.show_hint(),
            Action::Quit => {
                info!("User quit");
                self.should_quit = true;
            }
        }
    }

    /// Places the human's mark; rejected moves only update the message.
    fn place(&mut self, index: usize) {
        match self.session.apply_move(index, Origin::Human) {
            Ok(status) => {
                self.hint = None;
                self.message.clear();
                self.observe(status);
            }
            Err(e) => {
                debug!(index, error = %e, "Move ignored");
                self.message = e.to_string();
            }
        }
    }

    /// Lets the engine reply if it is its turn.
    #[instrument(skip(self))]
    pub fn play_engine(&mut self) -> Result<()> {
        if let Some(reply) = self.session.engine_reply()? {
            let label = Position::from_index(reply.index).map_or("?", |pos| pos.label());
            self.message = format!("Engine played {label}.");
            self.observe(reply.status);
        }
        Ok(())
    }

    fn undo(&mut self) {
        let undone = self.session.undo();
        self.hint = None;
        self.message = match undone {
            0 => "Nothing to undo.".to_string(),
            1 => "Undid 1 move.".to_string(),
            n => format!("Undid {n} moves."),
        };
        if undone > 0 {
            self.ring();
        }
    }

    fn show_hint(&mut self) {
        match self.session.hint().and_then(|best| best.index) {
            Some(index) => {
                self.hint = Some(index);
                let label = Position::from_index(index).map_or("?", |pos| pos.label());
                self.message = format!("Hint: {label}.");
            }
            None => self.message = "No moves left.".to_string(),
        }
    }

    /// Rings for an accepted move and counts the result once it ends the match.
    fn observe(&mut self, status: GameStatus) {
        self.ring();
        if status.is_terminal() {
            self.tally.record(&status);
            self.persist_tally();
        }
    }

    fn ring(&mut self) {
        if *self.prefs.sound() {
            self.bell = true;
        }
    }

    /// Saving is best-effort: a failure is logged and shown, play goes on.
    fn persist_tally(&mut self) {
        if let Err(e) = self.tally.save(&self.stats_path) {
            warn!(error = %e, path = %self.stats_path.display(), "Could not save statistics");
            self.message = "Statistics not saved.".to_string();
        }
    }

    fn persist_prefs(&mut self) {
        self.prefs.set_session_config(self.session.config());
        if let Err(e) = self.prefs.save(&self.prefs_path) {
            warn!(error = %e, path = %self.prefs_path.display(), "Could not save preferences");
            self.message = "Preferences not saved.".to_string();
        }
    }

    /// Side the human plays, for display.
    pub fn human_side(&self) -> Player {
        self.session.config().human_side
    }
}
