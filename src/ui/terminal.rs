//! Terminal ownership for interactive pickers.

use std::io::{self, Write};
use std::panic;
use std::sync::Once;

use crossterm::{
    event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use super::input::map_event;
use super::picker::{ListPicker, PickerItem, PickerState};
use super::render::{render, PickerStyles};
use crate::core::{ThemeType, ThemeTypePrompt};

/// RAII guard for terminal state. Restores terminal on drop (including panic).
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> io::Result<Self> {
        install_panic_hook();
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn restore_terminal() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
    let _ = io::stdout().flush();
}

/// Restore the terminal before the default hook prints the panic.
fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal();
            default_hook(info);
        }));
    });
}

/// Let the user choose one of `items` in a full-screen picker.
///
/// Returns `Ok(None)` when the user cancels or there is nothing to choose.
pub fn pick<T: PickerItem>(title: &str, items: Vec<T>) -> io::Result<Option<T>> {
    if items.is_empty() {
        return Ok(None);
    }

    let mut picker = ListPicker::new(title, items);
    let styles = PickerStyles::default();

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    while picker.state() == PickerState::Browsing {
        terminal.draw(|frame| render(frame, &mut picker, &styles))?;

        if let Some(picker_event) = map_event(&event::read()?) {
            picker.push_event(picker_event);
        }
        picker.drain_events();
    }

    Ok(picker.into_choice())
}

/// Asks the user for a theme type with a two-item picker.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalThemeTypePrompt;

impl ThemeTypePrompt for TerminalThemeTypePrompt {
    fn choose_theme_type(&mut self, theme_label: &str) -> io::Result<Option<ThemeType>> {
        pick(
            &format!("Select Theme Type for {theme_label}"),
            vec![ThemeType::Light, ThemeType::Dark],
        )
    }
}
