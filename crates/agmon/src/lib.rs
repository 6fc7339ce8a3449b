//! Agmon TUI - Library modules
//!
//! This library implements the live quota dashboard for the local
//! Antigravity language server.
//!
//! # Architecture
//!
//! One refresh tick runs a strict pipeline:
//!
//! 1. **Discovery**: find the server process and its CSRF token, then
//!    its listening port (`discover`)
//! 2. **Fetch**: one authenticated HTTPS status call (`client`)
//! 3. **Render**: pure snapshot-to-lines transformation (`render`)
//! 4. **Draw**: atomic in-place terminal update (`display`)
//!
//! The `monitor` module owns the tick loop and the small connection
//! state machine. Nothing outlives a tick except that state and the
//! display driver's first-frame flag.

pub mod client;
pub mod config;
pub mod discover;
pub mod display;
pub mod error;
pub mod logging;
pub mod monitor;
pub mod render;
pub mod theme;

// Re-export commonly used types
pub use client::{StatusClient, StatusFetcher};
pub use config::MonitorConfig;
pub use discover::{LsofSocketLister, PortResolver, ProcessLister, ProcessLocator, PsProcessLister, SocketLister};
pub use display::DisplayDriver;
pub use error::{MonitorError, Result};
pub use monitor::{ConnectionState, Monitor};
pub use theme::Palette;
