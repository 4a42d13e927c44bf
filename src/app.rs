// Application state and orchestration logic.
//
// The central event loop that coordinates user commands from the TUI and
// results from spawned backend requests. Maintains the display state and
// pushes UI updates to the TUI render loop.
//
// There is no request gating: each command spawns one backend task and
// responses apply in arrival order, exactly like the prototype UI this
// console reproduces.

use std::sync::Arc;

use chrono::Local;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::backend::MatchBackend;
use crate::config::Config;
use crate::model::{DuelResult, ValidationReport};
use crate::protocol::{
    BackendEvent, ConnectionStatus, DuelLogEntry, StatusLine, UiUpdate, UserCommand,
};

/// The status line shown before the first command.
pub const READY_MESSAGE: &str = "Ready to validate the loadout.";

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    /// Backend shared with spawned request tasks.
    pub backend: Arc<MatchBackend>,
    /// Sender for backend events; spawned tasks use a clone to report their
    /// result back to the main event loop.
    pub backend_tx: mpsc::Sender<BackendEvent>,
    pub status: StatusLine,
    pub duel_result: Option<String>,
    pub duel_log: Vec<DuelLogEntry>,
    pub connection_status: ConnectionStatus,
}

impl AppState {
    pub fn new(
        config: Config,
        backend: MatchBackend,
        backend_tx: mpsc::Sender<BackendEvent>,
    ) -> Self {
        AppState {
            config,
            backend: Arc::new(backend),
            backend_tx,
            status: StatusLine::info(READY_MESSAGE),
            duel_result: None,
            duel_log: Vec::new(),
            connection_status: ConnectionStatus::Disconnected,
        }
    }
}

// ---------------------------------------------------------------------------
// Response formatting
// ---------------------------------------------------------------------------

/// Turn a validation report into the status line, preserving the prototype's
/// `OK: ...` / `Error: ...` formatting.
pub fn format_validation(report: &ValidationReport) -> StatusLine {
    if report.ok {
        StatusLine::ok(format!("OK: {}", report.message))
    } else {
        StatusLine::error(format!("Error: {}", report.message))
    }
}

/// Turn a duel result into the result panel text.
pub fn format_duel(result: &DuelResult) -> String {
    format!("Winner: {} ({})", result.winner_id, result.details)
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the app orchestrator until the user quits or the command channel
/// closes.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut backend_rx: mpsc::Receiver<BackendEvent>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    // Probe backend health once at startup so the status bar starts truthful.
    spawn_health_probe(&state);
    let _ = ui_tx.send(UiUpdate::Status(state.status.clone())).await;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    None | Some(UserCommand::Quit) => {
                        info!("Quit requested, shutting down app loop");
                        break;
                    }
                    Some(UserCommand::ValidateLoadout) => {
                        handle_validate_command(&mut state, &ui_tx).await;
                    }
                    Some(UserCommand::RunDuel) => {
                        handle_duel_command(&mut state, &ui_tx).await;
                    }
                    Some(UserCommand::RefreshBackend) => {
                        spawn_health_probe(&state);
                    }
                }
            }

            event = backend_rx.recv() => {
                match event {
                    Some(event) => handle_backend_event(&mut state, event, &ui_tx).await,
                    // Unreachable while `state` holds a sender, but the loop
                    // must not spin if that ever changes.
                    None => break,
                }
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn handle_validate_command(state: &mut AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    info!("Validating loadout against {}", state.backend.describe());
    state.status = StatusLine::info("Validating loadout...");
    let _ = ui_tx.send(UiUpdate::Status(state.status.clone())).await;

    let backend = Arc::clone(&state.backend);
    let tx = state.backend_tx.clone();
    let loadout = state.config.loadout.clone();
    tokio::spawn(async move {
        let result = backend.validate_loadout(&loadout).await;
        let _ = tx.send(BackendEvent::Validation(result)).await;
    });
}

async fn handle_duel_command(state: &mut AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let Some(request) = state.config.duel_request() else {
        // Config validation guarantees the pairing resolves; keep a
        // defensible failure path anyway.
        warn!("Duel pairing does not resolve to loadout pieces");
        state.status = StatusLine::error("Error: duel pairing does not name loadout pieces");
        let _ = ui_tx.send(UiUpdate::Status(state.status.clone())).await;
        return;
    };

    info!(
        "Running duel {} vs {} against {}",
        request.a.id,
        request.b.id,
        state.backend.describe()
    );
    state.status = StatusLine::info(format!(
        "Resolving duel {} vs {}...",
        request.a.id, request.b.id
    ));
    let _ = ui_tx.send(UiUpdate::Status(state.status.clone())).await;

    let backend = Arc::clone(&state.backend);
    let tx = state.backend_tx.clone();
    tokio::spawn(async move {
        let a_id = request.a.id.clone();
        let b_id = request.b.id.clone();
        let outcome = backend.duel(&request).await;
        let _ = tx.send(BackendEvent::Duel { a_id, b_id, outcome }).await;
    });
}

fn spawn_health_probe(state: &AppState) {
    let backend = Arc::clone(&state.backend);
    let tx = state.backend_tx.clone();
    tokio::spawn(async move {
        let result = backend.health().await;
        let _ = tx.send(BackendEvent::Health(result)).await;
    });
}

// ---------------------------------------------------------------------------
// Backend event handling
// ---------------------------------------------------------------------------

/// Apply a backend event to the state and push the matching UI updates.
pub async fn handle_backend_event(
    state: &mut AppState,
    event: BackendEvent,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match event {
        BackendEvent::Validation(Ok(report)) => {
            info!(ok = report.ok, "Validation finished: {}", report.message);
            state.status = format_validation(&report);
            let _ = ui_tx.send(UiUpdate::Status(state.status.clone())).await;
        }
        BackendEvent::Validation(Err(e)) => {
            warn!("Validation request failed: {e}");
            state.status = StatusLine::error(format!("Error: {e}"));
            let _ = ui_tx.send(UiUpdate::Status(state.status.clone())).await;
        }
        BackendEvent::Duel {
            a_id,
            b_id,
            outcome: Ok(result),
        } => {
            info!("Duel {a_id} vs {b_id} won by {}", result.winner_id);
            let text = format_duel(&result);
            state.duel_result = Some(text.clone());
            let _ = ui_tx.send(UiUpdate::DuelResult(text)).await;

            let entry = DuelLogEntry {
                at: Local::now(),
                a_id,
                b_id,
                winner_id: result.winner_id,
            };
            state.duel_log.push(entry.clone());
            let _ = ui_tx.send(UiUpdate::DuelLogged(entry)).await;
        }
        BackendEvent::Duel {
            a_id,
            b_id,
            outcome: Err(e),
        } => {
            warn!("Duel {a_id} vs {b_id} failed: {e}");
            state.status = StatusLine::error(format!("Error: {e}"));
            let _ = ui_tx.send(UiUpdate::Status(state.status.clone())).await;
        }
        BackendEvent::Health(Ok(health)) => {
            info!("Backend healthy (env {})", health.env);
            state.connection_status = ConnectionStatus::Connected;
            let _ = ui_tx
                .send(UiUpdate::Connection(state.connection_status))
                .await;
        }
        BackendEvent::Health(Err(e)) => {
            warn!("Backend health probe failed: {e}");
            state.connection_status = ConnectionStatus::Disconnected;
            let _ = ui_tx
                .send(UiUpdate::Connection(state.connection_status))
                .await;
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
