//! Key bindings and cursor movement.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use noughts_core::{Player, Position};

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the cursor.
    Cursor(KeyCode),
    /// Place at the cursor.
    PlaceAtCursor,
    /// Place at a board index (0-8).
    Place(usize),
    /// Undo the last move (or move pair against the engine).
    Undo,
    /// Start a new match.
    NewMatch,
    /// Switch between human and engine opponents.
    ToggleMode,
    /// Play as the given side.
    ChooseSide(Player),
    /// Switch between the dark and light palettes.
    ToggleTheme,
    /// Turn the bell on or off.
    ToggleSound,
    /// Zero the win/draw tally.
    ResetTally,
    /// Show the engine's suggestion.
    Hint,
    /// Leave the game.
    Quit,
}

/// Maps a key press to an action.
pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            Some(Action::Cursor(key.code))
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::PlaceAtCursor),
        KeyCode::Char(c @ '1'..='9') => c
            .to_digit(10)
            .map(|digit| Action::Place(digit as usize - 1)),
        KeyCode::Char('u') => Some(Action::Undo),
        KeyCode::Char('n') => Some(Action::NewMatch),
        KeyCode::Char('m') => Some(Action::ToggleMode),
        KeyCode::Char('x') => Some(Action::ChooseSide(Player::X)),
        KeyCode::Char('o') => Some(Action::ChooseSide(Player::O)),
        KeyCode::Char('t') => Some(Action::ToggleTheme),
        KeyCode::Char('s') => Some(Action::ToggleSound),
        KeyCode::Char('r') => Some(Action::ResetTally),
        KeyCode::Char('h') => Some(Action::Hint),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Moves cursor based on arrow keys, stopping at the edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let target = match key {
        KeyCode::Up => Position::from_row_col(row.wrapping_sub(1), col),
        KeyCode::Down => Position::from_row_col(row + 1, col),
        KeyCode::Left => Position::from_row_col(row, col.wrapping_sub(1)),
        KeyCode::Right => Position::from_row_col(row, col + 1),
        _ => None,
    };
    target.unwrap_or(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_moves_within_grid() {
        assert_eq!(move_cursor(Position::Center, KeyCode::Up), Position::TopCenter);
        assert_eq!(move_cursor(Position::Center, KeyCode::Down), Position::BottomCenter);
        assert_eq!(move_cursor(Position::Center, KeyCode::Left), Position::MiddleLeft);
        assert_eq!(move_cursor(Position::Center, KeyCode::Right), Position::MiddleRight);
    }

    #[test]
    fn test_cursor_stops_at_edges() {
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Up), Position::TopLeft);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Left), Position::TopLeft);
        assert_eq!(move_cursor(Position::BottomRight, KeyCode::Down), Position::BottomRight);
        assert_eq!(move_cursor(Position::BottomRight, KeyCode::Right), Position::BottomRight);
    }

    #[test]
    fn test_digit_keys_are_one_based() {
        let key = KeyEvent::new(KeyCode::Char('1'), KeyModifiers::NONE);
        assert_eq!(action_for(key), Some(Action::Place(0)));
        let key = KeyEvent::new(KeyCode::Char('9'), KeyModifiers::NONE);
        assert_eq!(action_for(key), Some(Action::Place(8)));
        let key = KeyEvent::new(KeyCode::Char('0'), KeyModifiers::NONE);
        assert_eq!(action_for(key), None);
    }

    #[test]
    fn test_settings_keys() {
        let action = |c| action_for(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        assert_eq!(action('t'), Some(Action::ToggleTheme));
        assert_eq!(action('s'), Some(Action::ToggleSound));
        assert_eq!(action('r'), Some(Action::ResetTally));
        assert_eq!(action('o'), Some(Action::ChooseSide(Player::O)));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for(key), Some(Action::Quit));
    }
}
