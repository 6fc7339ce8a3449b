//! agmon - Live quota dashboard for the Antigravity language server
//!
//! Discovers the locally running language server, queries its status
//! endpoint once a second, and redraws a quota summary in place.
//!
//! # Usage
//!
//! ```text
//! agmon                # refresh every second
//! agmon --interval 5   # refresh every 5 seconds
//! ```
//!
//! Ctrl+C (or SIGTERM) is the only exit path; the monitor otherwise
//! runs until the terminal goes away.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use agmon_tui::{
    logging, DisplayDriver, LsofSocketLister, Monitor, MonitorConfig, MonitorError, Palette,
    PsProcessLister, StatusClient,
};

/// agmon - Antigravity quota monitor
#[derive(Parser, Debug)]
#[command(name = "agmon")]
#[command(about = "Live terminal dashboard for Antigravity usage quotas")]
#[command(version)]
struct Args {
    /// Refresh interval in seconds
    #[arg(long, short = 'i', default_value_t = 1)]
    interval: u64,
}

async fn wait_for_shutdown_signal() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;

        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM");
            }
            _ = sigint.recv() => {
                info!("Received SIGINT");
            }
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        info!("Received Ctrl+C");
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        interval_secs = args.interval,
        "agmon starting"
    );

    let config = MonitorConfig::with_interval(args.interval);
    let palette = Palette::default();

    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        if let Err(e) = wait_for_shutdown_signal().await {
            error!(error = %e, "Error waiting for shutdown signal");
        }
        shutdown_token.cancel();
    });

    let client = StatusClient::new(config.request_timeout)
        .map_err(MonitorError::ClientBuild)
        .context("Failed to build HTTPS client for the language server")?;

    let mut monitor = Monitor::new(
        config.clone(),
        palette.clone(),
        PsProcessLister::new(config.lookup_timeout),
        LsofSocketLister::new(config.lookup_timeout),
        client,
        DisplayDriver::new(io::stdout()),
    );

    monitor.run(cancel_token).await?;

    // Drop below the last frame, reset attributes, and say goodbye
    println!("\n{}Monitor stopped.", palette.reset);
    info!("agmon stopped");

    Ok(())
}
