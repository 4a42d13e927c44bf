// Message types shared between the TUI, the app orchestrator, and the
// backend tasks. Everything here travels over mpsc channels.

use chrono::{DateTime, Local};

use crate::backend::BackendError;
use crate::model::{DuelResult, HealthStatus, ValidationReport};

// ---------------------------------------------------------------------------
// TUI -> app
// ---------------------------------------------------------------------------

/// Commands the user can issue from the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    /// Validate the configured loadout against the backend.
    ValidateLoadout,
    /// Run the configured duel.
    RunDuel,
    /// Re-probe backend health.
    RefreshBackend,
    /// Shut down the application.
    Quit,
}

// ---------------------------------------------------------------------------
// Backend tasks -> app
// ---------------------------------------------------------------------------

/// Results of spawned backend requests.
///
/// There is deliberately no generation counter or cancellation here: each
/// user action issues one request and responses apply in arrival order.
#[derive(Debug)]
pub enum BackendEvent {
    Validation(Result<ValidationReport, BackendError>),
    Duel {
        a_id: String,
        b_id: String,
        outcome: Result<DuelResult, BackendError>,
    },
    Health(Result<HealthStatus, BackendError>),
}

// ---------------------------------------------------------------------------
// App -> TUI
// ---------------------------------------------------------------------------

/// Whether the backend answered its last health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

/// Coloring hint for the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Ok,
    Error,
}

/// The one-line status message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        StatusLine {
            text: text.into(),
            kind: StatusKind::Info,
        }
    }

    pub fn ok(text: impl Into<String>) -> Self {
        StatusLine {
            text: text.into(),
            kind: StatusKind::Ok,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        StatusLine {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }
}

/// One resolved duel, as shown in the duel log panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuelLogEntry {
    pub at: DateTime<Local>,
    pub a_id: String,
    pub b_id: String,
    pub winner_id: String,
}

/// Incremental view updates pushed by the app orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    Status(StatusLine),
    DuelResult(String),
    DuelLogged(DuelLogEntry),
    Connection(ConnectionStatus),
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
