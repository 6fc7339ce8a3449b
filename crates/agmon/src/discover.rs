//! Process and port discovery for the Antigravity language server.
//!
//! Discovery scrapes OS tool output (`ps`, `lsof`) rather than a
//! process-table crate: the matching rules are line-oriented text
//! rules, and keeping them as pure parser functions makes them
//! testable without a live process table. The tool invocations sit
//! behind small capability traits so the refresh loop can run against
//! stubs in tests.
//!
//! Both lookups are best-effort: any failure (missing tool, timeout,
//! permission error, no match) resolves to `None` and is logged at
//! debug level. The refresh loop re-invokes every tick, so there is no
//! internal retry.

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

use agmon_core::ProcessHandle;

/// Command-line markers that identify the target process.
///
/// A process line must contain all three to match.
const PROCESS_MARKERS: [&str; 3] = ["antigravity", "language_server", "--csrf_token"];

/// CSRF token value after the flag, `=` or whitespace separated.
/// Case-insensitive to tolerate flag-case drift across server builds.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)--csrf_token[=\s]+([a-f0-9-]+)").expect("token regex is valid")
});

/// Listening address forms lsof prints: loopback or wildcard IPv4,
/// wildcard IPv6, or a bare `*`, followed by the port.
static LISTEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:127\.0\.0\.1|0\.0\.0\.0|\[::1?\]|\*):(\d+)").expect("listen regex is valid")
});

// ============================================================================
// Errors
// ============================================================================

/// Errors from the OS lookup tools.
///
/// These never propagate past the locator/resolver: they are logged
/// and collapsed into `None`. The enum exists so the log line (and the
/// unit tests) can say what actually went wrong.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The tool could not be spawned (missing binary, permissions).
    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The tool did not return within the lookup timeout.
    #[error("{tool} timed out after {timeout_secs}s")]
    Timeout {
        tool: &'static str,
        timeout_secs: u64,
    },
}

// ============================================================================
// Capabilities
// ============================================================================

/// Capability: list all OS processes with full command lines.
#[async_trait]
pub trait ProcessLister: Send + Sync {
    /// Returns the raw process listing, one process per line.
    async fn list_processes(&self) -> std::result::Result<String, DiscoveryError>;
}

/// Capability: list listening TCP sockets for one process.
#[async_trait]
pub trait SocketLister: Send + Sync {
    /// Returns the raw socket listing for `pid`, one socket per line.
    async fn list_sockets(&self, pid: u32) -> std::result::Result<String, DiscoveryError>;
}

/// Runs a command under the lookup timeout, returning stdout as text.
///
/// Exit status is deliberately ignored: lsof exits 1 when a process
/// has no matching sockets, which is a normal "nothing listening yet"
/// answer, not an error. Whatever the tool printed is what we parse.
async fn run_tool(
    mut cmd: Command,
    tool: &'static str,
    timeout: Duration,
) -> std::result::Result<String, DiscoveryError> {
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(String::from_utf8_lossy(&output.stdout).into_owned()),
        Ok(Err(source)) => Err(DiscoveryError::Spawn { tool, source }),
        Err(_) => Err(DiscoveryError::Timeout {
            tool,
            timeout_secs: timeout.as_secs(),
        }),
    }
}

/// Real process lister backed by `ps -ww -eo pid,args`.
///
/// `-ww` matters: without it ps truncates long argument strings and
/// the CSRF token flag never appears in the output.
#[derive(Debug, Clone)]
pub struct PsProcessLister {
    timeout: Duration,
}

impl PsProcessLister {
    /// Creates a lister with the given subprocess timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ProcessLister for PsProcessLister {
    async fn list_processes(&self) -> std::result::Result<String, DiscoveryError> {
        let mut cmd = Command::new("ps");
        cmd.args(["-ww", "-eo", "pid,args"]);
        run_tool(cmd, "ps", self.timeout).await
    }
}

/// Real socket lister backed by `lsof -nP -a -iTCP -sTCP:LISTEN -p <pid>`.
#[derive(Debug, Clone)]
pub struct LsofSocketLister {
    timeout: Duration,
}

impl LsofSocketLister {
    /// Creates a lister with the given subprocess timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl SocketLister for LsofSocketLister {
    async fn list_sockets(&self, pid: u32) -> std::result::Result<String, DiscoveryError> {
        let mut cmd = Command::new("lsof");
        cmd.args(["-nP", "-a", "-iTCP", "-sTCP:LISTEN", "-p"]);
        cmd.arg(pid.to_string());
        run_tool(cmd, "lsof", self.timeout).await
    }
}

// ============================================================================
// Parsers
// ============================================================================

/// Parses one `ps` output line into a process handle.
///
/// The line must contain all three target markers; the PID is the
/// first whitespace-delimited token and the token value comes from the
/// `--csrf_token` flag. Returns `None` for non-matching lines.
pub fn parse_process_line(line: &str) -> Option<ProcessHandle> {
    if !PROCESS_MARKERS.iter().all(|marker| line.contains(marker)) {
        return None;
    }

    let pid: u32 = line.split_whitespace().next()?.parse().ok()?;
    let token = TOKEN_RE.captures(line)?.get(1)?.as_str().to_string();

    Some(ProcessHandle::new(pid, token))
}

/// Parses one `lsof` output line into a listening port.
///
/// Only `(LISTEN)`-tagged lines count; the address must be a loopback
/// or wildcard form. Returns `None` otherwise.
pub fn parse_listen_line(line: &str) -> Option<u16> {
    if !line.contains("(LISTEN)") {
        return None;
    }
    LISTEN_RE.captures(line)?.get(1)?.as_str().parse().ok()
}

// ============================================================================
// Locator / Resolver
// ============================================================================

/// Finds the language-server process in the OS process table.
#[derive(Debug, Clone)]
pub struct ProcessLocator<L> {
    lister: L,
}

impl<L: ProcessLister> ProcessLocator<L> {
    /// Creates a locator over a process-listing capability.
    pub fn new(lister: L) -> Self {
        Self { lister }
    }

    /// Returns the first matching process, or `None`.
    ///
    /// First match wins; multiple concurrent servers are out of scope.
    pub async fn locate(&self) -> Option<ProcessHandle> {
        let listing = match self.lister.list_processes().await {
            Ok(listing) => listing,
            Err(e) => {
                debug!(error = %e, "Process listing failed");
                return None;
            }
        };

        listing.lines().find_map(parse_process_line)
    }
}

/// Finds the listening TCP port of a located process.
#[derive(Debug, Clone)]
pub struct PortResolver<S> {
    lister: S,
}

impl<S: SocketLister> PortResolver<S> {
    /// Creates a resolver over a socket-listing capability.
    pub fn new(lister: S) -> Self {
        Self { lister }
    }

    /// Returns the first listening port of `pid`, or `None`.
    ///
    /// When the process listens on several ports the first line in
    /// lsof's output wins. Known limitation carried over deliberately:
    /// the server binds one API port in practice, and enumeration
    /// order is whatever lsof prints.
    pub async fn resolve(&self, pid: u32) -> Option<u16> {
        let listing = match self.lister.list_sockets(pid).await {
            Ok(listing) => listing,
            Err(e) => {
                debug!(pid, error = %e, "Socket listing failed");
                return None;
            }
        };

        listing.lines().find_map(parse_listen_line)
    }
}

// ============================================================================
// Tests
// ============================================================================
