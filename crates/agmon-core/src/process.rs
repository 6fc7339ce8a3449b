//! Process identity for the monitored language server.

use serde::{Deserialize, Serialize};

/// Host used for every status request.
///
/// The language server only ever binds loopback; the port is the
/// single variable part of the endpoint and is re-resolved each tick.
pub const LOOPBACK_HOST: &str = "127.0.0.1";

/// A located Antigravity language-server process.
///
/// Produced by process discovery and valid only while the underlying
/// process exists. The handle is re-resolved on every refresh tick, so
/// it never carries a lifecycle of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessHandle {
    /// OS process ID of the language server.
    pub pid: u32,

    /// CSRF token extracted from the server's command line.
    ///
    /// Echoed back in the `X-Codeium-Csrf-Token` request header.
    pub csrf_token: String,
}

impl ProcessHandle {
    /// Creates a new process handle.
    pub fn new(pid: u32, csrf_token: impl Into<String>) -> Self {
        Self {
            pid,
            csrf_token: csrf_token.into(),
        }
    }
}
