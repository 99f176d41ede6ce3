//! Keyboard mapping for the combat screen.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use skirmish::combat::CombatInput;

/// What a key press means to the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Combat(CombatInput),
    Quit,
    Ignore,
}

pub fn map_key(key: KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::Ignore;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => {
            KeyAction::Combat(CombatInput::Up)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => {
            KeyAction::Combat(CombatInput::Down)
        }
        KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Combat(CombatInput::Confirm),
        KeyCode::Esc | KeyCode::Backspace => KeyAction::Combat(CombatInput::Back),
        _ => KeyAction::Combat(CombatInput::Other),
    }
}
