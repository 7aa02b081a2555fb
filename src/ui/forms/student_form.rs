//! Student registration form

use super::field_renderer::{draw_intake_field, FIELD_HEIGHT};
use crate::app::App;
use crate::state::{StudentCreateForm, StudentFormButton};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the student create form with action sidebar
pub fn draw_student_create(frame: &mut Frame, area: Rect, app: &App) {
    let Some(form) = app.state.form.student_create() else {
        return;
    };

    // Split into form (left) and action panel (right)
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(20), // Action panel
        ])
        .split(area);

    draw_form(frame, main_chunks[0], form);
    draw_action_panel(frame, main_chunks[1], form);
}

fn draw_form(frame: &mut Frame, area: Rect, form: &StudentCreateForm) {
    let border_color = if form.is_buttons_row_active() {
        Color::DarkGray
    } else {
        Color::Cyan
    };

    let block = Block::default()
        .title(" Student Registration ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),            // Intro
            Constraint::Length(FIELD_HEIGHT), // Name
            Constraint::Length(FIELD_HEIGHT), // Phone
            Constraint::Length(FIELD_HEIGHT), // Birth date
            Constraint::Min(0),               // Spacer
            Constraint::Length(1),            // Help text
        ])
        .margin(1)
        .split(area);

    let intake = &form.intake;
    let intro = match &intake.submit_error {
        Some(err) => Paragraph::new(format!("Registration failed: {err}"))
            .style(Style::default().fg(Color::Red)),
        None => Paragraph::new("Fill in the details to register a new student")
            .style(Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(intro, chunks[0]);

    for (idx, field) in form.fields.iter().enumerate() {
        draw_intake_field(
            frame,
            chunks[idx + 1],
            field,
            intake.form.get(field.field),
            form.active_field_index == idx && intake.is_editing(),
            &intake.errors.message(field.field),
        );
    }

    let help = Paragraph::new(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(": next field  "),
        Span::styled(
            crate::platform::SAVE_SHORTCUT,
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(": save  "),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::raw(": cancel"),
    ]))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[5]);
}

/// Draw the action panel sidebar
fn draw_action_panel(frame: &mut Frame, area: Rect, form: &StudentCreateForm) {
    let is_focused = form.is_buttons_row_active();
    let submitting = form.intake.is_submitting();

    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let button_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Save (primary)
            Constraint::Length(BUTTON_HEIGHT), // Cancel
            Constraint::Min(0),
        ])
        .split(inner_area);

    for (idx, button) in StudentFormButton::ALL.iter().enumerate() {
        let is_selected = is_focused && form.selected_button() == *button;
        let (label, enabled, color) = match button {
            StudentFormButton::Save if submitting => ("Saving...", false, Color::Green),
            StudentFormButton::Save => ("Register", true, Color::Green),
            StudentFormButton::Cancel => ("Cancel", true, Color::Gray),
        };
        render_action_button(
            frame,
            button_chunks[idx],
            label,
            is_selected,
            enabled,
            Some(color),
        );
    }
}
