// TUI console: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors relevant parts of the application
// state. The app orchestrator pushes `UiUpdate` messages over an mpsc
// channel; the TUI applies them to `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::app::READY_MESSAGE;
use crate::config::Config;
use crate::model::Loadout;
use crate::protocol::{ConnectionStatus, DuelLogEntry, StatusLine, UiUpdate, UserCommand};

use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors the application state for rendering.
///
/// Updated incrementally via `UiUpdate` messages from the app orchestrator.
/// The `render_frame` function reads this struct to draw the console.
pub struct ViewState {
    /// Current status message (validation outcomes land here).
    pub status: StatusLine,
    /// Latest duel result text, if any duel has run.
    pub duel_result: Option<String>,
    /// All resolved duels, oldest first.
    pub duel_log: Vec<DuelLogEntry>,
    /// Backend connectivity, as of the last health probe.
    pub connection_status: ConnectionStatus,
    /// The configured loadout (read-only display).
    pub loadout: Loadout,
    /// Configured duel pairing piece ids.
    pub duel_a: String,
    pub duel_b: String,
    /// Short backend description for the status bar.
    pub backend_label: String,
    /// Duel log scroll offset (0 = newest entry at the top).
    pub log_scroll: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            status: StatusLine::info(READY_MESSAGE),
            duel_result: None,
            duel_log: Vec::new(),
            connection_status: ConnectionStatus::Disconnected,
            loadout: Loadout {
                points_pool: 0,
                pieces: Vec::new(),
                rng_seed: None,
            },
            duel_a: String::new(),
            duel_b: String::new(),
            backend_label: String::new(),
            log_scroll: 0,
        }
    }
}

impl ViewState {
    /// Seed the view from the loaded config and backend description.
    pub fn new(config: &Config, backend_label: String) -> Self {
        ViewState {
            loadout: config.loadout.clone(),
            duel_a: config.duel.a.clone(),
            duel_b: config.duel.b.clone(),
            backend_label,
            ..ViewState::default()
        }
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Status(line) => {
            state.status = line;
        }
        UiUpdate::DuelResult(text) => {
            state.duel_result = Some(text);
        }
        UiUpdate::DuelLogged(entry) => {
            state.duel_log.push(entry);
            // Snap to the newest entry so fresh results are visible.
            state.log_scroll = 0;
        }
        UiUpdate::Connection(status) => {
            state.connection_status = status;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete console frame.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::loadout::render(frame, layout.loadout, state);
    widgets::duel_panel::render(frame, layout.duel_panel, state);
    widgets::duel_log::render(frame, layout.duel_log, state);
    render_help_bar(frame, &layout);
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout) {
    let text = " q:Quit | v:Validate | d:Duel | r:Refresh | j/k:Scroll log";
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// This is the main entry point for the terminal UI. It:
/// 1. Initializes the terminal (enters raw mode, enables alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on clean exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    mut view_state: ViewState,
) -> anyhow::Result<()> {
    // 1. Initialize terminal
    let mut terminal = ratatui::init();

    // 2. Set panic hook to restore terminal on crash.
    //    We capture the original hook and chain ours before it.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    // 3. Create crossterm EventStream for async keyboard input
    let mut event_stream = EventStream::new();

    // 4. Create render interval (~30fps)
    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // 5. Main loop
    loop {
        tokio::select! {
            // UI updates from the app orchestrator
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => {
                        apply_ui_update(&mut view_state, ui_update);
                    }
                    None => {
                        // Channel closed: app is shutting down
                        break;
                    }
                }
            }

            // Keyboard input
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(command) = input::handle_key(key_event, &mut view_state) {
                            let quitting = command == UserCommand::Quit;
                            let _ = cmd_tx.send(command).await;
                            if quitting {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse events, resize events, etc. -- ignore
                    }
                    Some(Err(_)) => {
                        // Input error -- break out
                        break;
                    }
                    None => {
                        // Stream ended
                        break;
                    }
                }
            }

            // Render tick
            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    // 6. Restore terminal
    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
