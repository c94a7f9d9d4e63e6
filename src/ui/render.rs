//! Picker rendering with ratatui.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use super::picker::{ListPicker, PickerItem};

/// Colors used by the picker.
#[derive(Debug, Clone, Copy)]
#[allow(missing_docs)]
pub struct PickerStyles {
    pub bg: Color,
    pub bg_elevated: Color,
    pub bg_selected: Color,
    pub text_muted: Color,
    pub text_normal: Color,
    pub text_bright: Color,
    pub accent: Color,
}

impl Default for PickerStyles {
    fn default() -> Self {
        Self {
            bg: Color::Rgb(18, 18, 22),
            bg_elevated: Color::Rgb(36, 36, 44),
            bg_selected: Color::Rgb(45, 45, 55),
            text_muted: Color::Rgb(80, 80, 92),
            text_normal: Color::Rgb(175, 175, 185),
            text_bright: Color::Rgb(230, 230, 235),
            accent: Color::Rgb(80, 200, 200),
        }
    }
}

const HELP: [(&str, &str); 5] = [
    ("↑/↓", "move"),
    ("PgUp/PgDn", "page"),
    ("type", "filter"),
    ("Enter", "select"),
    ("Esc", "cancel"),
];

/// Draw the picker over the whole frame.
///
/// Also updates the picker's page size to the visible list height.
pub fn render<T: PickerItem>(frame: &mut Frame, picker: &mut ListPicker<T>, styles: &PickerStyles) {
    frame.render_widget(Block::default().style(Style::default().bg(styles.bg)), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Filter
            Constraint::Min(0),    // List
            Constraint::Length(1), // Detail
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    render_title(frame, picker, styles, chunks[0]);
    render_filter(frame, picker, styles, chunks[1]);
    picker.set_page_size(chunks[2].height as usize);
    render_list(frame, picker, styles, chunks[2]);
    render_detail(frame, picker, styles, chunks[3]);
    render_help(frame, styles, chunks[4]);
}

fn render_title<T: PickerItem>(frame: &mut Frame, picker: &ListPicker<T>, styles: &PickerStyles, area: Rect) {
    let count = if picker.query().is_empty() {
        format!("  {} items", picker.len())
    } else {
        format!("  {}/{}", picker.visible_len(), picker.len())
    };
    let line = Line::from(vec![
        Span::styled(
            format!("  {}", picker.title()),
            Style::default()
                .fg(styles.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(count, Style::default().fg(styles.text_muted)),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(styles.bg_elevated)),
        area,
    );
}

fn render_filter<T: PickerItem>(frame: &mut Frame, picker: &ListPicker<T>, styles: &PickerStyles, area: Rect) {
    let line = if picker.query().is_empty() {
        Line::from(Span::styled(
            "  / type to filter",
            Style::default().fg(styles.text_muted),
        ))
    } else {
        Line::from(vec![
            Span::styled("  / ", Style::default().fg(styles.accent)),
            Span::styled(
                picker.query().to_string(),
                Style::default().fg(styles.text_bright),
            ),
            Span::styled("█", Style::default().fg(styles.accent)),
        ])
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_list<T: PickerItem>(frame: &mut Frame, picker: &ListPicker<T>, styles: &PickerStyles, area: Rect) {
    let height = area.height as usize;
    if height == 0 {
        return;
    }

    let Some(selected) = picker.selected_position() else {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "  No matches",
                Style::default().fg(styles.text_muted),
            ))),
            area,
        );
        return;
    };

    // Scroll to keep selection visible
    let scroll = selected.saturating_sub(height.saturating_sub(1));

    let lines: Vec<Line> = picker
        .visible()
        .enumerate()
        .skip(scroll)
        .take(height)
        .map(|(pos, (_, item))| {
            let is_selected = pos == selected;
            let row_bg = if is_selected {
                styles.bg_selected
            } else {
                styles.bg
            };
            let text_color = if is_selected {
                styles.text_bright
            } else {
                styles.text_normal
            };
            let indicator = if is_selected { "▌" } else { " " };
            Line::from(vec![
                Span::styled(indicator, Style::default().fg(styles.accent).bg(row_bg)),
                Span::styled(
                    format!(" {:>3}. {}", pos + 1, item.label()),
                    Style::default().fg(text_color).bg(row_bg),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_detail<T: PickerItem>(frame: &mut Frame, picker: &ListPicker<T>, styles: &PickerStyles, area: Rect) {
    let detail = picker
        .selected_item()
        .and_then(PickerItem::detail)
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("  {detail}"),
            Style::default().fg(styles.text_muted),
        ))
        .style(Style::default().bg(styles.bg_elevated)),
        area,
    );
}

fn render_help(frame: &mut Frame, styles: &PickerStyles, area: Rect) {
    let mut spans = vec![Span::raw("  ")];
    for (key, action) in HELP {
        spans.push(Span::styled(
            key,
            Style::default()
                .fg(styles.text_normal)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {action}   "),
            Style::default().fg(styles.text_muted),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
