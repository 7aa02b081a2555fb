//! Modal error dialog showing the front of the error queue

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Padding, Paragraph},
    Frame,
};

/// Widest the dialog gets on a large terminal
const MAX_WIDTH: u16 = 60;
/// Two border columns plus one column of padding on each side
const H_CHROME: u16 = 4;
/// Two border rows, title, and the blank lines around the message and hint
const V_CHROME: u16 = 6;
const HINT: [&str; 5] = ["Press ", "Enter", " or ", "Esc", " to dismiss"];

/// Render `message` centered over the current view. The dialog shrinks with
/// the terminal and never draws outside it.
/// `queued` is the total number of errors waiting, including this one.
pub fn render_error_dialog(frame: &mut Frame, message: &str, queued: usize) {
    let screen = frame.area();
    let title = dialog_title(queued);
    let text_width = MAX_WIDTH.min(screen.width).saturating_sub(H_CHROME).max(1);
    let lines = wrap_words(message, usize::from(text_width));

    let area = dialog_area(screen, &title, &lines);
    if area.is_empty() {
        return;
    }
    frame.render_widget(Clear, area);

    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let hint: Vec<Span> = HINT
        .iter()
        .enumerate()
        .map(|(idx, part)| {
            // Odd parts are the key names
            if idx % 2 == 1 {
                Span::styled(*part, key_style)
            } else {
                Span::raw(*part)
            }
        })
        .collect();

    let mut content = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(lines.into_iter().map(Line::from));
    content.push(Line::from(""));
    content.push(Line::from(hint));

    let dialog = Paragraph::new(content).block(
        Block::bordered()
            .border_style(Style::default().fg(Color::Red))
            .padding(Padding::horizontal(1))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(dialog, area);
}

fn dialog_title(queued: usize) -> String {
    if queued > 1 {
        format!("Error (1 of {queued})")
    } else {
        "Error".to_string()
    }
}

/// Centered rect sized to the content, clamped to `screen`
fn dialog_area(screen: Rect, title: &str, lines: &[String]) -> Rect {
    let hint_width: usize = HINT.iter().map(|part| part.chars().count()).sum();
    let widest = lines
        .iter()
        .map(|line| line.chars().count())
        .chain([title.chars().count(), hint_width])
        .max()
        .unwrap_or(0);

    let width = u16::try_from(widest)
        .unwrap_or(u16::MAX)
        .saturating_add(H_CHROME)
        .min(MAX_WIDTH)
        .min(screen.width);
    let height = u16::try_from(lines.len())
        .unwrap_or(u16::MAX)
        .saturating_add(V_CHROME)
        .min(screen.height);

    Rect {
        x: screen.x + (screen.width - width) / 2,
        y: screen.y + (screen.height - height) / 2,
        width,
        height,
    }
}

/// Break `text` into lines of at most `width` characters on word boundaries.
/// Explicit newlines are kept; a word longer than `width` gets its own line.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = line.chars().count() + word.chars().count() + 1;
            if !line.is_empty() && needed > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }

    lines
}
