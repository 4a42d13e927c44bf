// Status bar widget: backend connectivity, backend label, status message.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::{ConnectionStatus, StatusKind};
use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [connection indicator] [backend label] | [status message]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = Vec::new();

    let (dot, dot_color) = connection_indicator(state.connection_status);
    spans.push(Span::styled(
        format!(" {} ", dot),
        Style::default().fg(dot_color),
    ));

    spans.push(Span::styled(
        state.backend_label.clone(),
        Style::default().fg(Color::Gray),
    ));

    spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));

    spans.push(Span::styled(
        state.status.text.clone(),
        Style::default().fg(status_color(state.status.kind)),
    ));

    let paragraph =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Return the connection dot character and its color.
pub fn connection_indicator(status: ConnectionStatus) -> (&'static str, Color) {
    match status {
        ConnectionStatus::Connected => ("●", Color::Green),
        ConnectionStatus::Disconnected => ("●", Color::Red),
    }
}

/// Color of the status message per kind.
pub fn status_color(kind: StatusKind) -> Color {
    match kind {
        StatusKind::Info => Color::White,
        StatusKind::Ok => Color::Green,
        StatusKind::Error => Color::Red,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_indicator_connected() {
        let (dot, color) = connection_indicator(ConnectionStatus::Connected);
        assert_eq!(dot, "●");
        assert_eq!(color, Color::Green);
    }

    #[test]
    fn connection_indicator_disconnected() {
        let (dot, color) = connection_indicator(ConnectionStatus::Disconnected);
        assert_eq!(dot, "●");
        assert_eq!(color, Color::Red);
    }

    #[test]
    fn status_colors_per_kind() {
        assert_eq!(status_color(StatusKind::Info), Color::White);
        assert_eq!(status_color(StatusKind::Ok), Color::Green);
        assert_eq!(status_color(StatusKind::Error), Color::Red);
    }

    #[test]
    fn render_does_not_panic_with_defaults() {
        let backend = ratatui::backend::TestBackend::new(80, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
