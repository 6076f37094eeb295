use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    Refresh,
    GoTo(Section),
    Cancel,
    NextField,
    PrevField,
    Submit,
    Backspace,
    Left,
    Right,
    Up,
    Down,
    Input(char),
    None,
}

/// Maps a key to an action. Plain characters stay [`AppAction::Input`]
/// since they may be typed into the add form; the app decides what they
/// mean outside of it.
pub fn map_key(key: KeyEvent) -> AppAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => AppAction::Quit,
            KeyCode::Char('r') => AppAction::Refresh,
            _ => AppAction::None,
        };
    }

    match key.code {
        KeyCode::F(1) => AppAction::GoTo(Section::Add),
        KeyCode::F(2) => AppAction::GoTo(Section::List),
        KeyCode::F(3) => AppAction::GoTo(Section::Summary),
        KeyCode::F(5) => AppAction::Refresh,
        KeyCode::Esc => AppAction::Cancel,
        KeyCode::Tab => AppAction::NextField,
        KeyCode::BackTab => AppAction::PrevField,
        KeyCode::Enter => AppAction::Submit,
        KeyCode::Backspace => AppAction::Backspace,
        KeyCode::Left => AppAction::Left,
        KeyCode::Right => AppAction::Right,
        KeyCode::Up => AppAction::Up,
        KeyCode::Down => AppAction::Down,
        KeyCode::Char(ch) => AppAction::Input(ch),
        _ => AppAction::None,
    }
}
