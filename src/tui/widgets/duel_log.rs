// Duel log widget: chronological list of resolved duels.
//
// Reverse chronological list. Each: "HH:MM:SS  {a} vs {b} -> {winner}"

use ratatui::layout::{Margin, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};
use ratatui::Frame;

use crate::protocol::DuelLogEntry;
use crate::tui::ViewState;

/// Render the duel log into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    if state.duel_log.is_empty() {
        let paragraph = Paragraph::new("  No duels yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Duel Log"));
        frame.render_widget(paragraph, area);
        return;
    }

    // Visible row count: subtract 2 for borders
    let visible_rows = (area.height as usize).saturating_sub(2);

    // All entries in reverse chronological order
    let all_entries: Vec<_> = state.duel_log.iter().rev().collect();
    let total = all_entries.len();

    // Clamp scroll offset
    let max_offset = total.saturating_sub(visible_rows);
    let scroll_offset = state.log_scroll.min(max_offset);

    let items: Vec<ListItem> = all_entries
        .into_iter()
        .skip(scroll_offset)
        .take(visible_rows.max(1))
        .map(|entry| {
            ListItem::new(Line::from(Span::styled(
                format_entry(entry),
                Style::default().fg(Color::White),
            )))
        })
        .collect();

    let title = format!("Duel Log ({})", state.duel_log.len());

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);

    // Render vertical scrollbar if content overflows
    if total > visible_rows {
        let mut scrollbar_state =
            ScrollbarState::new(total.saturating_sub(visible_rows)).position(scroll_offset);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

/// Format a single log entry for display.
pub fn format_entry(entry: &DuelLogEntry) -> String {
    format!(
        "{}  {} vs {} -> {}",
        entry.at.format("%H:%M:%S"),
        entry.a_id,
        entry.b_id,
        entry.winner_id
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
