//! File-backed tracing setup.
//!
//! Stdout belongs to the dashboard, so logs go to a file under the
//! state directory (`~/.local/state/agmon` on Linux). `RUST_LOG`
//! raises verbosity; per-tick discovery and fetch failures log at
//! debug, lifecycle events at info. If the log file cannot be created,
//! logging is switched off rather than corrupting the display.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Directory the monitor log lives in.
fn log_dir() -> PathBuf {
    dirs::state_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("agmon")
}

/// Opens the log file in append mode, creating the directory as needed.
fn create_log_file_in(dir: &Path) -> Option<File> {
    if let Err(e) = fs::create_dir_all(dir) {
        eprintln!("Warning: Failed to create log directory {dir:?}: {e}");
        return None;
    }

    let log_path = dir.join("monitor.log");
    match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Warning: Failed to open log file {log_path:?}: {e}");
            None
        }
    }
}

fn default_directive(target: &str) -> tracing_subscriber::filter::Directive {
    format!("{target}=info")
        .parse()
        .unwrap_or_else(|_| tracing_subscriber::filter::Directive::from(tracing::Level::INFO))
}

/// Initializes the global tracing subscriber.
///
/// Call once at startup, before the first frame is drawn.
pub fn init() {
    match create_log_file_in(&log_dir()) {
        Some(file) => {
            let filter = EnvFilter::from_default_env()
                .add_directive(default_directive("agmon"))
                .add_directive(default_directive("agmon_tui"))
                .add_directive(default_directive("agmon_core"))
                .add_directive(default_directive("agmon_protocol"));

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("off"))
                .init();
        }
    }
}
