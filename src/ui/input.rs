//! Input handling.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::picker::PickerEvent;

/// Translate a crossterm event into a picker event.
/// Returns `None` for events the picker does not care about.
pub fn map_event(event: &Event) -> Option<PickerEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => map_key(key),
        _ => None,
    }
}

/// Translate a key press.
pub fn map_key(key: &KeyEvent) -> Option<PickerEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(PickerEvent::Cancel),
            KeyCode::Char('u') => Some(PickerEvent::ClearQuery),
            KeyCode::Char('j') | KeyCode::Char('n') => Some(PickerEvent::Next),
            KeyCode::Char('k') | KeyCode::Char('p') => Some(PickerEvent::Prev),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Down => Some(PickerEvent::Next),
        KeyCode::Up => Some(PickerEvent::Prev),
        KeyCode::PageDown => Some(PickerEvent::PageDown),
        KeyCode::PageUp => Some(PickerEvent::PageUp),
        KeyCode::Home => Some(PickerEvent::First),
        KeyCode::End => Some(PickerEvent::Last),
        KeyCode::Enter => Some(PickerEvent::Confirm),
        KeyCode::Esc => Some(PickerEvent::Cancel),
        KeyCode::Backspace => Some(PickerEvent::Pop),
        KeyCode::Char(c) if !c.is_control() => Some(PickerEvent::Push(c)),
        _ => None,
    }
}
