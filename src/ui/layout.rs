//! Layout components (sidebar, status bar)

use super::components::{render_sidebar_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::state::{StudentsFocus, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Sidebar items: shortcut key and the view it opens
const SIDEBAR_ITEMS: [(&str, View); 2] = [("1", View::Dashboard), ("2", View::Students)];

/// Create the main layout with sidebar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20), // Sidebar
            Constraint::Min(0),     // Main content
        ])
        .split(area);

    // Reserve bottom line for status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[1]);

    let sidebar_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[0]);

    (sidebar_chunks[0], main_chunks[0])
}

/// Draw the sidebar: brand header and one boxed button per view
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Brand
            Constraint::Length(BUTTON_HEIGHT), // Dashboard
            Constraint::Length(BUTTON_HEIGHT), // Students
            Constraint::Min(0),
        ])
        .split(area);

    let brand = Paragraph::new(vec![
        Line::from(Span::styled(
            " QuadraGo",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            " Instructor Panel",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(brand, chunks[0]);

    for (idx, (key, view)) in SIDEBAR_ITEMS.iter().enumerate() {
        // The registration form belongs to the students section
        let is_selected = match view {
            View::Students => matches!(
                app.state.current_view,
                View::Students | View::StudentCreate
            ),
            other => app.state.current_view == *other,
        };
        let label = match view {
            View::Dashboard => "Dashboard",
            _ => "Students",
        };
        render_sidebar_button(frame, chunks[idx + 1], key, label, is_selected);
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Busy indicator while a registration is pending
    if app.is_submitting() {
        spans.push(Span::styled(" ◌ ", Style::default().fg(Color::Yellow)));
    } else {
        spans.push(Span::styled(" ● ", Style::default().fg(Color::Green)));
    }

    spans.push(Span::styled(
        view_hints(app.state.current_view, app.state.students_focus),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn view_hints(view: View, focus: StudentsFocus) -> String {
    match (view, focus) {
        (View::Dashboard, _) => {
            "j/k:nav  Enter:select  n:new student  s:students  q:quit".to_string()
        }
        (View::Students, StudentsFocus::List) => {
            "j/k:nav  /:search  n:new student  Esc:back  q:quit".to_string()
        }
        (View::Students, StudentsFocus::Search) => {
            "type to filter  Esc:clear  Enter:list".to_string()
        }
        (View::StudentCreate, _) => format!(
            "Tab:next  Enter:select  {}:save  Esc:cancel",
            crate::platform::SAVE_SHORTCUT
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_hints_mention_save_shortcut() {
        let hints = view_hints(View::StudentCreate, StudentsFocus::List);
        assert!(hints.contains("Ctrl+S:save"));
    }

    #[test]
    fn test_search_hints_differ_from_list_hints() {
        assert_ne!(
            view_hints(View::Students, StudentsFocus::Search),
            view_hints(View::Students, StudentsFocus::List)
        );
    }
}
