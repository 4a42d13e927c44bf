// Duel panel widget: the configured pairing and the latest result.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the duel panel into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut lines = vec![
        Line::from(Span::styled(
            pairing_line(state),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    match &state.duel_result {
        Some(result) => lines.push(Line::from(Span::styled(
            result.clone(),
            Style::default().fg(Color::Green),
        ))),
        None => lines.push(Line::from(Span::styled(
            "No duel yet. Press 'd' to run one.",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Duel"));
    frame.render_widget(paragraph, area);
}

/// One-line description of the configured pairing.
pub fn pairing_line(state: &ViewState) -> String {
    if state.duel_a.is_empty() || state.duel_b.is_empty() {
        return "No pairing configured.".to_string();
    }
    format!("{} vs {}", state.duel_a, state.duel_b)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
