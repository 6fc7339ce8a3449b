//! Agmon Core - Shared types for Antigravity quota monitoring
//!
//! This crate provides the domain types shared between the wire
//! protocol (agmon-protocol) and the dashboard application (agmon-tui).
//!
//! All code follows the panic-free policy: no `.unwrap()`, `.expect()`,
//! `panic!()`, `unreachable!()`, `todo!()`, or direct indexing `[i]`.

pub mod format;
pub mod process;
pub mod status;

// Re-exports for convenience
pub use format::{format_count, format_reset_time, truncate_label};
pub use process::{ProcessHandle, LOOPBACK_HOST};
pub use status::{CreditPool, ModelQuota, StatusSnapshot};
