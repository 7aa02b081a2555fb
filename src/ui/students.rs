//! Students view: summary, search box and roster

use super::render_scrollable_list;
use crate::app::App;
use crate::directory::CLASSES_THIS_WEEK;
use crate::state::{Student, StudentsFocus, View};
use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the students list
pub fn draw_list(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(4), // Summary cards
            Constraint::Length(3), // Search
            Constraint::Length(1), // Result count
            Constraint::Min(0),    // List
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {}", View::Students.title()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("  [n] new student", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(header, chunks[0]);

    draw_summary(frame, chunks[1], app);
    draw_search(frame, chunks[2], app);

    let filtered = app.state.filtered_students();
    let count = Paragraph::new(found_label(filtered.len()))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(count, chunks[3]);

    draw_roster(frame, chunks[4], app, &filtered);
}

fn found_label(count: usize) -> String {
    let noun = if count == 1 { "student" } else { "students" };
    format!(" {count} {noun} found")
}

fn draw_summary(frame: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    let figures = [
        ("Total Students", app.state.students.len().to_string(), Color::Blue),
        (
            "Active Students",
            app.state.active_student_count().to_string(),
            Color::Green,
        ),
        ("Classes This Week", CLASSES_THIS_WEEK.to_string(), Color::Yellow),
    ];

    for ((title, value, color), card) in figures.into_iter().zip(cards.iter()) {
        let content = Paragraph::new(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(content, *card);
    }
}

fn draw_search(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.state.students_focus == StudentsFocus::Search;
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };

    let line = if app.state.search_term.is_empty() && !focused {
        Line::from(Span::styled(
            "Search students by name...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let cursor = if focused { "▌" } else { "" };
        Line::from(vec![
            Span::raw(app.state.search_term.as_str()),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ])
    };

    let search = Paragraph::new(line).block(
        Block::default()
            .title(" Search [/] ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(search, area);
}

fn draw_roster(frame: &mut Frame, area: Rect, app: &App, students: &[&Student]) {
    let list_focused = app.state.students_focus == StudentsFocus::List;
    let block = Block::default()
        .title(" Students ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if list_focused {
            Color::Cyan
        } else {
            Color::DarkGray
        }));

    if students.is_empty() {
        let message = if app.state.students.is_empty() {
            "No students registered yet.\nPress 'n' to register the first one.".to_string()
        } else {
            format!("No students match \"{}\".", app.state.search_term)
        };
        let content = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    let today = app.today();
    let items: Vec<ListItem> = students
        .iter()
        .enumerate()
        .map(|(idx, student)| {
            let is_selected = list_focused && idx == app.state.selected_index;
            student_row(student, today, is_selected)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));

    let selected = list_focused.then_some(app.state.selected_index);
    render_scrollable_list(frame, area, list, selected);
}

fn student_row(student: &Student, today: NaiveDate, is_selected: bool) -> ListItem<'static> {
    let prefix = if is_selected { "▸ " } else { "  " };
    let status_color = if student.is_active() {
        Color::Green
    } else {
        Color::Red
    };

    ListItem::new(Line::from(vec![
        Span::raw(prefix),
        Span::styled(
            format!("{:<24}", student.name),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(format!("{:<17}", student.phone)),
        Span::styled(
            format!("{:<22}", birth_label(student, today)),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("[{}]", student.status.label()),
            Style::default().fg(status_color),
        ),
    ]))
}

/// Birth date with the current age, e.g. `15/03/1995 (31 years)`
fn birth_label(student: &Student, today: NaiveDate) -> String {
    format!(
        "{} ({} years)",
        student.birth_date.format("%d/%m/%Y"),
        student.age_on(today)
    )
}
