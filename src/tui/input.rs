// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// app orchestrator, or into local ViewState mutations (duel log scrolling).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::protocol::UserCommand;

use super::ViewState;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to
/// the app orchestrator. Returns `None` when the key press was handled
/// locally by mutating `ViewState` (e.g. scrolling) or is unbound.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress; ignoring
    // non-Press events prevents double-processing.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately (escape hatch)
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    match key_event.code {
        KeyCode::Char('q') => Some(UserCommand::Quit),
        KeyCode::Char('v') => Some(UserCommand::ValidateLoadout),
        KeyCode::Char('d') => Some(UserCommand::RunDuel),
        KeyCode::Char('r') => Some(UserCommand::RefreshBackend),

        // Duel log scrolling (offset from the newest entry)
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.log_scroll = view_state.log_scroll.saturating_add(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.log_scroll = view_state.log_scroll.saturating_sub(1);
            None
        }

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
