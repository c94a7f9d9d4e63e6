//! Terminal UI using ratatui.

mod input;
pub mod picker;
pub mod render;
mod terminal;

pub use input::{map_event, map_key};
pub use picker::{ListPicker, PickerEvent, PickerItem, PickerState};
pub use render::{render, PickerStyles};
pub use terminal::{pick, TerminalThemeTypePrompt};
