pub mod button;
pub mod layout;
pub mod primitives;
pub mod select;
pub mod text_area;
pub mod text_input;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keys every editing widget leaves to the runtime: focus movement,
/// escape and Ctrl chords
pub(crate) fn is_navigation_key(key_event: &KeyEvent) -> bool {
    matches!(key_event.code, KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc)
        || key_event.modifiers.contains(KeyModifiers::CONTROL)
        || key_event.modifiers.contains(KeyModifiers::ALT)
}
