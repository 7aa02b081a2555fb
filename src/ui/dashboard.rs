//! Dashboard view: stat cards, quick actions and recent activity

use super::render_scrollable_list;
use crate::app::App;
use crate::state::{ActivityKind, DashboardStat, QuickAction, StatAccent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

const STAT_CARD_HEIGHT: u16 = 5;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                // Header
            Constraint::Length(STAT_CARD_HEIGHT), // Stats
            Constraint::Min(0),                   // Actions + activity
        ])
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            format!(" {}", crate::state::View::Dashboard.title()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            " Overview of your classes and students",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(header, chunks[0]);

    draw_stats(frame, chunks[1], &app.state.dashboard.stats);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[2]);

    draw_quick_actions(frame, bottom[0], app);
    draw_activity(frame, bottom[1], app);
}

fn accent_color(accent: StatAccent) -> Color {
    match accent {
        StatAccent::Blue => Color::Blue,
        StatAccent::Green => Color::Green,
        StatAccent::Orange => Color::Yellow,
    }
}

fn draw_stats(frame: &mut Frame, area: Rect, stats: &[DashboardStat]) {
    if stats.is_empty() {
        return;
    }
    let constraints = vec![Constraint::Ratio(1, stats.len() as u32); stats.len()];
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (stat, card) in stats.iter().zip(cards.iter()) {
        let color = accent_color(stat.accent);
        let content = Paragraph::new(vec![
            Line::from(Span::styled(
                stat.value.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                stat.description.as_str(),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(
            Block::default()
                .title(format!(" {} ", stat.title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
        frame.render_widget(content, *card);
    }
}

fn draw_quick_actions(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = QuickAction::ALL
        .iter()
        .enumerate()
        .map(|(idx, action)| {
            let is_selected = idx == app.state.selected_index;
            let prefix = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(action.label(), style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Quick Actions ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    render_scrollable_list(frame, area, list, Some(app.state.selected_index));
}

fn draw_activity(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .state
        .dashboard
        .activities
        .iter()
        .map(|activity| {
            let color = match activity.kind {
                ActivityKind::Success => Color::Green,
                ActivityKind::Warning => Color::Yellow,
                ActivityKind::Info => Color::Blue,
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled("● ", Style::default().fg(color)),
                    Span::styled(
                        activity.student.as_str(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}", activity.time),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("  {}", activity.action),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Recent Activity ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    render_scrollable_list(frame, area, list, None);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_accent_has_distinct_color() {
        let colors = [
            accent_color(StatAccent::Blue),
            accent_color(StatAccent::Green),
            accent_color(StatAccent::Orange),
        ];
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }
}
