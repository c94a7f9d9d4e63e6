//! Filterable list picker state machine.
//!
//! The picker knows nothing about terminals: key presses are translated into
//! [`PickerEvent`]s elsewhere, queued, and applied in order. Once the picker
//! reaches [`PickerState::Confirmed`] or [`PickerState::Cancelled`] further
//! events are ignored.

use std::collections::VecDeque;

use crate::core::{FuzzyMatcher, Theme, ThemeType};

/// Something that can be shown in a [`ListPicker`].
pub trait PickerItem {
    /// Main text; also what the filter matches against.
    fn label(&self) -> String;

    /// Secondary text shown for the highlighted item.
    fn detail(&self) -> Option<String> {
        None
    }
}

impl PickerItem for Theme {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn detail(&self) -> Option<String> {
        Some(format!("{} · {}", self.extension, self.path.display()))
    }
}

impl PickerItem for ThemeType {
    fn label(&self) -> String {
        match self {
            ThemeType::Dark => "Dark Theme".to_string(),
            ThemeType::Light => "Light Theme".to_string(),
        }
    }
}

/// Lifecycle of a picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerState {
    /// Still choosing.
    Browsing,
    /// The item at this index (into the original item list) was chosen.
    Confirmed(usize),
    /// The user backed out.
    Cancelled,
}

/// Input to the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEvent {
    /// Highlight the next visible item.
    Next,
    /// Highlight the previous visible item.
    Prev,
    /// Move down one page.
    PageDown,
    /// Move up one page.
    PageUp,
    /// Jump to the first visible item.
    First,
    /// Jump to the last visible item.
    Last,
    /// Append a character to the filter query.
    Push(char),
    /// Remove the last character of the filter query.
    Pop,
    /// Clear the filter query.
    ClearQuery,
    /// Choose the highlighted item.
    Confirm,
    /// Give up without choosing.
    Cancel,
}

/// A filterable, keyboard-driven list.
#[derive(Debug)]
pub struct ListPicker<T> {
    title: String,
    items: Vec<T>,
    labels: Vec<String>,
    query: String,
    /// Indices into `items`, in display order.
    visible: Vec<usize>,
    /// Position within `visible`.
    selected: usize,
    page_size: usize,
    state: PickerState,
    events: VecDeque<PickerEvent>,
    matcher: FuzzyMatcher,
}

impl<T: PickerItem> ListPicker<T> {
    /// Create a picker over `items`, all visible, first one highlighted.
    pub fn new(title: impl Into<String>, items: Vec<T>) -> Self {
        let labels: Vec<String> = items.iter().map(PickerItem::label).collect();
        let visible = (0..items.len()).collect();
        Self {
            title: title.into(),
            items,
            labels,
            query: String::new(),
            visible,
            selected: 0,
            page_size: 10,
            state: PickerState::Browsing,
            events: VecDeque::new(),
            matcher: FuzzyMatcher::new(),
        }
    }

    /// Title shown above the list.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current filter query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current state.
    pub fn state(&self) -> PickerState {
        self.state
    }

    /// Total number of items, visible or not.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if there are no items at all.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Visible items with their original indices, in display order.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.visible.iter().map(move |&i| (i, &self.items[i]))
    }

    /// Number of visible items.
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Position of the highlighted item within the visible list.
    pub fn selected_position(&self) -> Option<usize> {
        (!self.visible.is_empty()).then_some(self.selected)
    }

    /// The highlighted item.
    pub fn selected_item(&self) -> Option<&T> {
        self.visible
            .get(self.selected)
            .and_then(|&i| self.items.get(i))
    }

    /// Set how far PageUp/PageDown move.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
    }

    /// Queue an event for the next [`drain_events`](Self::drain_events).
    pub fn push_event(&mut self, event: PickerEvent) {
        self.events.push_back(event);
    }

    /// Apply all queued events in order and return the resulting state.
    pub fn drain_events(&mut self) -> PickerState {
        while let Some(event) = self.events.pop_front() {
            self.apply(event);
        }
        self.state
    }

    /// Apply a single event immediately.
    pub fn apply(&mut self, event: PickerEvent) {
        if self.state != PickerState::Browsing {
            return;
        }

        let last = self.visible.len().saturating_sub(1);
        match event {
            PickerEvent::Next => self.selected = (self.selected + 1).min(last),
            PickerEvent::Prev => self.selected = self.selected.saturating_sub(1),
            PickerEvent::PageDown => self.selected = (self.selected + self.page_size).min(last),
            PickerEvent::PageUp => self.selected = self.selected.saturating_sub(self.page_size),
            PickerEvent::First => self.selected = 0,
            PickerEvent::Last => self.selected = last,
            PickerEvent::Push(c) => {
                self.query.push(c);
                self.refilter();
            }
            PickerEvent::Pop => {
                if self.query.pop().is_some() {
                    self.refilter();
                }
            }
            PickerEvent::ClearQuery => {
                if !self.query.is_empty() {
                    self.query.clear();
                    self.refilter();
                }
            }
            PickerEvent::Confirm => {
                if let Some(&index) = self.visible.get(self.selected) {
                    self.state = PickerState::Confirmed(index);
                }
            }
            PickerEvent::Cancel => self.state = PickerState::Cancelled,
        }
    }

    fn refilter(&mut self) {
        self.visible = self.matcher.rank(&self.query, &self.labels);
        self.selected = 0;
    }

    /// Consume the picker, returning the confirmed item if any.
    pub fn into_choice(self) -> Option<T> {
        match self.state {
            PickerState::Confirmed(index) => self.items.into_iter().nth(index),
            PickerState::Browsing | PickerState::Cancelled => None,
        }
    }
}
