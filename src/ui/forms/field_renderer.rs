//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one field: bordered input plus a feedback line
pub const FIELD_HEIGHT: u16 = 4;

/// Draw an intake field with its inline validation feedback
pub fn draw_intake_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    value: &str,
    is_active: bool,
    error: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let border_color = match (!error.is_empty(), is_active) {
        (true, _) => Color::Red,
        (false, true) => Color::Cyan,
        (false, false) => Color::DarkGray,
    };

    let value_style = if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let cursor = if is_active { "▌" } else { "" };

    let input = Paragraph::new(Line::from(vec![
        Span::styled(field.display_value(value, is_active), value_style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]))
    .block(
        Block::default()
            .title(format!(" {} * ", field.label))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(input, chunks[0]);

    if let Some(line) = feedback_line(field, value, error) {
        frame.render_widget(Paragraph::new(line), chunks[1]);
    }
}

/// Error text when invalid, confirmation once a value passed validation.
/// An empty `error` means the field has no error.
fn feedback_line<'a>(field: &FormField, value: &str, error: &str) -> Option<Line<'a>> {
    if !error.is_empty() {
        return Some(Line::from(Span::styled(
            format!(" ✗ {error}"),
            Style::default().fg(Color::Red),
        )));
    }
    if value.is_empty() {
        return None;
    }
    Some(Line::from(Span::styled(
        format!(" ✓ {}", field.field.ok_message()),
        Style::default().fg(Color::Green),
    )))
}
