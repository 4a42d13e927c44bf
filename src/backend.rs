// The backend seam: where match verdicts come from.
//
// `Remote` talks to the match service over HTTP; `Local` runs the bundled
// engine in-process with the same semantics. The console never branches on
// the mode outside this module.

use thiserror::Error;

use crate::api::client::{ApiError, MatchApiClient};
use crate::config::{BackendMode, Config};
use crate::engine::duel::{resolve_duel, DuelError};
use crate::engine::rules::validate_loadout;
use crate::model::{DuelRequest, DuelResult, HealthStatus, Loadout, ValidationReport};

/// Fixed confirmation for a valid loadout, matching the remote service.
pub const VALID_LOADOUT_MESSAGE: &str = "Valid distribution.";

/// Fixed detail string attached to every resolved duel.
pub const DUEL_DETAILS: &str = "Prototype duel: three rounds plus a tiebreak.";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Duel(#[from] DuelError),
}

// ---------------------------------------------------------------------------
// LocalEngine
// ---------------------------------------------------------------------------

/// In-process backend built on the bundled match engine.
///
/// Mirrors the remote service's endpoint semantics: rule violations become
/// an `ok: false` report rather than an error, valid loadouts get a fixed
/// confirmation, and duels involving a king are rejected outright.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalEngine;

impl LocalEngine {
    pub fn validate_loadout(&self, loadout: &Loadout) -> ValidationReport {
        match validate_loadout(loadout) {
            Ok(()) => ValidationReport {
                ok: true,
                message: VALID_LOADOUT_MESSAGE.to_string(),
            },
            Err(violation) => ValidationReport {
                ok: false,
                message: violation.to_string(),
            },
        }
    }

    pub fn duel(&self, request: &DuelRequest) -> Result<DuelResult, DuelError> {
        let winner_id = resolve_duel(request)?;
        Ok(DuelResult {
            winner_id,
            details: DUEL_DETAILS.to_string(),
        })
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "ok".to_string(),
            env: "local".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// MatchBackend
// ---------------------------------------------------------------------------

/// Where match verdicts come from: the remote service or the local engine.
pub enum MatchBackend {
    Remote(MatchApiClient),
    Local(LocalEngine),
}

impl MatchBackend {
    /// Build the backend the config asks for.
    pub fn from_config(config: &Config) -> Self {
        match config.backend.mode {
            BackendMode::Remote => {
                MatchBackend::Remote(MatchApiClient::new(config.api.base_url.clone()))
            }
            BackendMode::Local => MatchBackend::Local(LocalEngine),
        }
    }

    /// Short human-readable label for the status bar and logs.
    pub fn describe(&self) -> String {
        match self {
            MatchBackend::Remote(client) => format!("remote ({})", client.base_url()),
            MatchBackend::Local(_) => "local engine".to_string(),
        }
    }

    pub async fn validate_loadout(
        &self,
        loadout: &Loadout,
    ) -> Result<ValidationReport, BackendError> {
        match self {
            MatchBackend::Remote(client) => Ok(client.validate_loadout(loadout).await?),
            MatchBackend::Local(engine) => Ok(engine.validate_loadout(loadout)),
        }
    }

    pub async fn duel(&self, request: &DuelRequest) -> Result<DuelResult, BackendError> {
        match self {
            MatchBackend::Remote(client) => Ok(client.duel(request).await?),
            MatchBackend::Local(engine) => Ok(engine.duel(request)?),
        }
    }

    pub async fn health(&self) -> Result<HealthStatus, BackendError> {
        match self {
            MatchBackend::Remote(client) => Ok(client.health().await?),
            MatchBackend::Local(engine) => Ok(engine.health()),
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Piece, PieceKind};

    fn piece(id: &str, kind: PieceKind, atk: i32, defn: i32, spd: i32) -> Piece {
        Piece {
            id: id.to_string(),
            kind,
            hp: 100,
            atk,
            defn,
            spd,
        }
    }

    fn sample_loadout() -> Loadout {
        Loadout {
            points_pool: 30,
            pieces: vec![
                piece("K", PieceKind::King, 0, 0, 0),
                piece("N1", PieceKind::Knight, 6, 5, 4),
            ],
            rng_seed: Some(123),
        }
    }

    #[test]
    fn local_valid_loadout_gets_fixed_confirmation() {
        let report = LocalEngine.validate_loadout(&sample_loadout());
        assert!(report.ok);
        assert_eq!(report.message, VALID_LOADOUT_MESSAGE);
    }

    #[test]
    fn local_rule_violation_is_a_report_not_an_error() {
        let mut loadout = sample_loadout();
        loadout.points_pool = 1;
        let report = LocalEngine.validate_loadout(&loadout);
        assert!(!report.ok);
        assert_eq!(report.message, "points pool exceeded (15 > 1)");
    }

    #[test]
    fn local_duel_attaches_fixed_details() {
        let request = DuelRequest {
            a: piece("N1", PieceKind::Knight, 6, 5, 4),
            b: piece("B1", PieceKind::Bishop, 4, 4, 6),
            rng_seed: Some(123),
        };
        let result = LocalEngine.duel(&request).unwrap();
        assert_eq!(result.details, DUEL_DETAILS);
        assert!(result.winner_id == "N1" || result.winner_id == "B1");
    }

    #[test]
    fn local_duel_rejects_kings() {
        let request = DuelRequest {
            a: piece("K", PieceKind::King, 0, 0, 0),
            b: piece("B1", PieceKind::Bishop, 4, 4, 6),
            rng_seed: None,
        };
        assert_eq!(
            LocalEngine.duel(&request),
            Err(DuelError::KingCannotDuel)
        );
    }

    #[test]
    fn local_health_is_always_ok() {
        let health = LocalEngine.health();
        assert_eq!(health.status, "ok");
        assert_eq!(health.env, "local");
    }

    #[tokio::test]
    async fn backend_local_dispatches_to_engine() {
        let backend = MatchBackend::Local(LocalEngine);
        let report = backend.validate_loadout(&sample_loadout()).await.unwrap();
        assert!(report.ok);
        assert!(backend.health().await.is_ok());
    }

    #[test]
    fn describe_names_the_mode() {
        assert_eq!(MatchBackend::Local(LocalEngine).describe(), "local engine");
        let remote = MatchBackend::Remote(MatchApiClient::new("http://example.test:8000"));
        assert_eq!(remote.describe(), "remote (http://example.test:8000)");
    }
}
