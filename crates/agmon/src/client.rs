//! HTTPS status client for the language server.
//!
//! One POST per tick against the `GetUserStatus` RPC. The server
//! presents a self-signed certificate on loopback, so certificate and
//! hostname verification are disabled on this client. That is a
//! deliberate relaxation of normal TLS guarantees scoped to a trusted
//! localhost peer; do not reuse this client for anything else.
//!
//! Like discovery, the fetch is best-effort: timeouts, refused
//! connections, non-2xx responses, and malformed JSON all resolve to
//! `None` ("unresponsive"), logged at debug level.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use agmon_core::StatusSnapshot;
use agmon_protocol::{
    status_url, RawStatusResponse, StatusRequest, CONNECT_PROTOCOL_HEADER,
    CONNECT_PROTOCOL_VERSION, CSRF_TOKEN_HEADER,
};

/// Errors from a status fetch.
///
/// Carried into debug logs only; the public fetch API returns `Option`.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request failed in transit (timeout, refused, TLS handshake).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The response body was not the expected JSON shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Capability: fetch one status snapshot from the server.
///
/// The refresh loop depends on this trait rather than the concrete
/// client so tests can drive the state machine with canned snapshots.
#[async_trait]
pub trait StatusFetcher: Send + Sync {
    /// Fetches the current status, or `None` if the server is
    /// unresponsive in any way.
    async fn fetch(&self, port: u16, token: &str) -> Option<StatusSnapshot>;
}

/// Real HTTPS client for the local language server.
#[derive(Debug, Clone)]
pub struct StatusClient {
    http: reqwest::Client,
}

impl StatusClient {
    /// Builds the client with the given request timeout.
    ///
    /// Certificate validation is disabled here; see the module docs.
    pub fn new(timeout: Duration) -> std::result::Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }

    async fn fetch_inner(
        &self,
        port: u16,
        token: &str,
    ) -> std::result::Result<StatusSnapshot, ClientError> {
        let response = self
            .http
            .post(status_url(port))
            .header(CONNECT_PROTOCOL_HEADER, CONNECT_PROTOCOL_VERSION)
            .header(CSRF_TOKEN_HEADER, token)
            .json(&StatusRequest::new())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let raw: RawStatusResponse = serde_json::from_str(&body)?;
        Ok(raw.to_snapshot())
    }
}

#[async_trait]
impl StatusFetcher for StatusClient {
    async fn fetch(&self, port: u16, token: &str) -> Option<StatusSnapshot> {
        match self.fetch_inner(port, token).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                debug!(port, error = %e, "Status fetch failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds() {
        assert!(StatusClient::new(Duration::from_secs(1)).is_ok());
    }

    #[test]
    fn test_status_error_display() {
        let err = ClientError::Status(503);
        assert_eq!(err.to_string(), "unexpected HTTP status 503");
    }

    #[test]
    fn test_decode_error_from_conversion() {
        let parse_result: std::result::Result<RawStatusResponse, _> =
            serde_json::from_str("not json");
        let err: ClientError = parse_result.unwrap_err().into();
        assert!(matches!(err, ClientError::Decode(_)));
        assert!(err.to_string().contains("failed to decode response"));
    }

    #[tokio::test]
    async fn test_fetch_refused_returns_none() {
        // Port 1 on loopback has nothing listening; connection is
        // refused well inside the timeout.
        let client = StatusClient::new(Duration::from_secs(1)).expect("client builds");
        assert!(client.fetch(1, "token").await.is_none());
    }
}
