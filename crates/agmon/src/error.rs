//! Error types for the agmon dashboard.
//!
//! Discovery and fetch failures never reach this module: those calls
//! resolve their own errors to `None` and the refresh loop turns the
//! absence into a display state. `MonitorError` covers the few things
//! that genuinely stop the loop.
//!
//! **Panic-Free Policy:** This module follows the project's panic-free
//! guidelines. No `.unwrap()`, `.expect()`, `panic!()`, `unreachable!()`,
//! or `todo!()`.

use std::io;
use thiserror::Error;

pub use crate::client::ClientError;
pub use crate::discover::DiscoveryError;

/// Fatal dashboard errors.
///
/// Only startup failures and terminal write failures are fatal; every
/// per-tick failure is absorbed into the connection state machine.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// Failed to construct the HTTPS status client at startup.
    #[error("Failed to build status client: {0}")]
    ClientBuild(#[source] ClientError),

    /// Failed to write a frame to the terminal.
    ///
    /// Usually means stdout went away (closed pipe); there is nothing
    /// left to draw on, so the loop stops.
    #[error("Failed to draw frame: {0}")]
    Draw(#[source] io::Error),

    /// I/O error outside the draw path (e.g. signal registration).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Convenience Result type alias for dashboard operations.
pub type Result<T> = std::result::Result<T, MonitorError>;
