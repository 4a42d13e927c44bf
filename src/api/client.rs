// Match service HTTP client.
//
// Two unary JSON POSTs plus a health probe against a configurable base URL.
// Any non-success status is an error; there is no retry, timeout, or
// backoff, and no response validation beyond decoding the documented shape.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::model::{DuelRequest, DuelResult, HealthStatus, Loadout, ValidationReport};

/// Where the match service lives when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("server returned {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

// ---------------------------------------------------------------------------
// MatchApiClient
// ---------------------------------------------------------------------------

/// Client for the remote match service.
pub struct MatchApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl MatchApiClient {
    /// Create a client against the given base URL. Trailing slashes are
    /// trimmed so path joining stays predictable.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        MatchApiClient {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /match/validate`: ask the service to validate a loadout.
    pub async fn validate_loadout(
        &self,
        loadout: &Loadout,
    ) -> Result<ValidationReport, ApiError> {
        self.post_json("/match/validate", loadout).await
    }

    /// `POST /match/duel`: ask the service to resolve a duel.
    ///
    /// The service answers 400 when either piece is a king; that surfaces
    /// here as [`ApiError::Status`].
    pub async fn duel(&self, request: &DuelRequest) -> Result<DuelResult, ApiError> {
        self.post_json("/match/duel", request).await
    }

    /// `GET /health`: service liveness probe.
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;
        decode_response(url, response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;
        decode_response(url, response).await
    }
}

/// Reject non-success statuses, then decode the JSON body.
async fn decode_response<T: DeserializeOwned>(
    url: String,
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status { url, status });
    }
    response
        .json()
        .await
        .map_err(|source| ApiError::Decode { url, source })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Piece, PieceKind};

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn knight() -> Piece {
        Piece {
            id: "N1".to_string(),
            kind: PieceKind::Knight,
            hp: 90,
            atk: 6,
            defn: 5,
            spd: 4,
        }
    }

    fn bishop() -> Piece {
        Piece {
            id: "B1".to_string(),
            kind: PieceKind::Bishop,
            hp: 90,
            atk: 4,
            defn: 4,
            spd: 6,
        }
    }

    fn sample_loadout() -> Loadout {
        Loadout {
            points_pool: 30,
            pieces: vec![knight(), bishop()],
            rng_seed: Some(123),
        }
    }

    /// Spawn a one-shot TCP server that answers any request with the given
    /// raw HTTP response. Returns the base URL to point the client at.
    async fn mock_server(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            // Read and discard the request.
            let mut buf = vec![0u8; 8192];
            let _ = socket.read(&mut buf).await;

            socket.write_all(response.as_bytes()).await.unwrap();
            socket.flush().await.unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        });

        format!("http://{addr}")
    }

    fn http_json_response(status_line: &str, body: &str) -> String {
        format!(
            "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let client = MatchApiClient::new("http://localhost:8000///");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[tokio::test]
    async fn validate_decodes_ok_report() {
        let response = http_json_response(
            "HTTP/1.1 200 OK",
            r#"{"ok":true,"message":"Valid distribution."}"#,
        );
        let response: &'static str = Box::leak(response.into_boxed_str());
        let base = mock_server(response).await;

        let client = MatchApiClient::new(base);
        let report = client.validate_loadout(&sample_loadout()).await.unwrap();
        assert!(report.ok);
        assert_eq!(report.message, "Valid distribution.");
    }

    #[tokio::test]
    async fn duel_decodes_result() {
        let response = http_json_response(
            "HTTP/1.1 200 OK",
            r#"{"winner_id":"N1","details":"three rounds plus a tiebreak"}"#,
        );
        let response: &'static str = Box::leak(response.into_boxed_str());
        let base = mock_server(response).await;

        let client = MatchApiClient::new(base);
        let request = DuelRequest {
            a: knight(),
            b: bishop(),
            rng_seed: Some(123),
        };
        let result = client.duel(&request).await.unwrap();
        assert_eq!(result.winner_id, "N1");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let response = http_json_response(
            "HTTP/1.1 400 Bad Request",
            r#"{"detail":"the king does not take part in direct duels"}"#,
        );
        let response: &'static str = Box::leak(response.into_boxed_str());
        let base = mock_server(response).await;

        let client = MatchApiClient::new(base);
        let request = DuelRequest {
            a: knight(),
            b: bishop(),
            rng_seed: None,
        };
        let err = client.duel(&request).await.unwrap_err();
        match err {
            ApiError::Status { status, url } => {
                assert_eq!(status.as_u16(), 400);
                assert!(url.ends_with("/match/duel"));
            }
            other => panic!("expected Status error, got: {other}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let response = http_json_response("HTTP/1.1 200 OK", "not json at all");
        let response: &'static str = Box::leak(response.into_boxed_str());
        let base = mock_server(response).await;

        let client = MatchApiClient::new(base);
        let err = client.validate_loadout(&sample_loadout()).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }), "got: {err}");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        // Bind a port, then drop the listener so nothing is listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = MatchApiClient::new(format!("http://{addr}"));
        let err = client.health().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }), "got: {err}");
    }

    #[tokio::test]
    async fn health_decodes_status() {
        let response =
            http_json_response("HTTP/1.1 200 OK", r#"{"status":"ok","env":"dev"}"#);
        let response: &'static str = Box::leak(response.into_boxed_str());
        let base = mock_server(response).await;

        let client = MatchApiClient::new(base);
        let health = client.health().await.unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.env, "dev");
    }
}
