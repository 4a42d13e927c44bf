// Screen layout: panel arrangement and sizing.
//
// Divides the terminal area into fixed zones for the match console:
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +-------------------------+------------------------+
// | Loadout (55%)            | Duel (45%)             |
// |                          | +- Duel Panel (55%) --+|
// |                          | +- Duel Log (45%) ----+|
// +-------------------------+------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each console zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: backend connectivity and the status message.
    pub status_bar: Rect,
    /// Left side of the middle section: the configured loadout table.
    pub loadout: Rect,
    /// Right column top: duel pairing and latest result.
    pub duel_panel: Rect,
    /// Right column bottom: duel history.
    pub duel_log: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the console layout from the available terminal area.
///
/// Fixed heights for the status and help bars, with the remaining space
/// split between the loadout table and the duel column.
pub fn build_layout(area: Rect) -> AppLayout {
    // Vertical: status(1) | middle(fill) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(10),   // middle section (loadout + duel column)
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let status_bar = vertical[0];
    let middle = vertical[1];
    let help_bar = vertical[2];

    // Horizontal: loadout (55%) | duel column (45%)
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(middle);

    let loadout = horizontal[0];
    let duel_column = horizontal[1];

    // Duel column vertical: duel panel (55%) | duel log (45%)
    let duel_sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(duel_column);

    let duel_panel = duel_sections[0];
    let duel_log = duel_sections[1];

    AppLayout {
        status_bar,
        loadout,
        duel_panel,
        duel_log,
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
