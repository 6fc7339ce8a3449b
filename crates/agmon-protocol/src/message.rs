//! Request side of the `GetUserStatus` contract.

use agmon_core::LOOPBACK_HOST;
use serde::Serialize;

/// RPC path on the language server.
pub const STATUS_ENDPOINT_PATH: &str =
    "/exa.language_server_pb.LanguageServerService/GetUserStatus";

/// Connect protocol version header name.
pub const CONNECT_PROTOCOL_HEADER: &str = "Connect-Protocol-Version";

/// Connect protocol version the server expects.
pub const CONNECT_PROTOCOL_VERSION: &str = "1";

/// Header carrying the CSRF token scraped from the server command line.
pub const CSRF_TOKEN_HEADER: &str = "X-Codeium-Csrf-Token";

/// Builds the full status URL for a resolved port.
///
/// The scheme is always `https`: the server presents a self-signed
/// certificate, which the client accepts because the peer is loopback.
pub fn status_url(port: u16) -> String {
    format!("https://{LOOPBACK_HOST}:{port}{STATUS_ENDPOINT_PATH}")
}

/// Fixed client-identity metadata sent with every status request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMetadata {
    /// IDE product name the server expects.
    pub ide_name: String,

    /// Extension name the server expects.
    pub extension_name: String,

    /// Request locale.
    pub locale: String,
}

impl Default for RequestMetadata {
    fn default() -> Self {
        Self {
            ide_name: "antigravity".to_string(),
            extension_name: "antigravity".to_string(),
            locale: "en".to_string(),
        }
    }
}

/// Body of the `GetUserStatus` POST.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusRequest {
    /// Client identity metadata.
    pub metadata: RequestMetadata,
}

impl StatusRequest {
    /// Creates the standard request body.
    pub fn new() -> Self {
        Self::default()
    }
}
