//! The refresh loop and its connection state machine.
//!
//! One tick runs the full pipeline in strict sequence: locate process,
//! resolve port, fetch status, render, draw. No tick overlaps another;
//! a tick in progress is never preempted. Between ticks the loop waits
//! in a single `select!` over cancellation, a terminal resize signal,
//! and the refresh timer — a resize cuts the wait short and forces an
//! immediate redraw, which is safe because every draw re-measures the
//! terminal and uses absolute cursor positioning.

use std::io::Write;

use chrono::Local;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::client::StatusFetcher;
use crate::config::MonitorConfig;
use crate::discover::{PortResolver, ProcessLister, ProcessLocator, SocketLister};
use crate::display::DisplayDriver;
use crate::error::{MonitorError, Result};
use crate::render::{render_dashboard, render_notice, Notice};
use crate::theme::Palette;

/// Connection lifecycle of the monitor.
///
/// Owned exclusively by the refresh loop; the only state that survives
/// a tick. There are no terminal states — the loop runs until the
/// operator cancels it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No matching process in the process table.
    Searching,

    /// Process found, but it has no listening port yet.
    PortPending,

    /// Status fetch succeeded this tick.
    Connected,

    /// Process and port resolved, but the fetch failed.
    Degraded,
}

/// The dashboard orchestrator.
///
/// Generic over its collaborators so tests can drive the state machine
/// with stub listers, a canned fetcher, and a byte-buffer display.
pub struct Monitor<L, S, F, W: Write> {
    locator: ProcessLocator<L>,
    resolver: PortResolver<S>,
    fetcher: F,
    display: DisplayDriver<W>,
    config: MonitorConfig,
    palette: Palette,
    state: ConnectionState,
    // Set on the first successful fetch and never cleared: selects the
    // "connection lost" notice over the initial "waiting" one.
    was_connected: bool,
}

impl<L, S, F, W> Monitor<L, S, F, W>
where
    L: ProcessLister,
    S: SocketLister,
    F: StatusFetcher,
    W: Write,
{
    /// Creates a monitor from its collaborators and configuration.
    pub fn new(
        config: MonitorConfig,
        palette: Palette,
        process_lister: L,
        socket_lister: S,
        fetcher: F,
        display: DisplayDriver<W>,
    ) -> Self {
        Self {
            locator: ProcessLocator::new(process_lister),
            resolver: PortResolver::new(socket_lister),
            fetcher,
            display,
            config,
            palette,
            state: ConnectionState::Searching,
            was_connected: false,
        }
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Runs one full pipeline pass and draws the result.
    pub async fn tick(&mut self) -> Result<()> {
        let width = self.display.width();
        let interval_secs = self.config.refresh_interval.as_secs();

        let lines = match self.locator.locate().await {
            None => {
                if self.state != ConnectionState::Searching {
                    info!(was_connected = self.was_connected, "Process not found");
                }
                self.state = ConnectionState::Searching;
                let notice = if self.was_connected {
                    Notice::ConnectionLost
                } else {
                    Notice::Waiting
                };
                render_notice(&notice, interval_secs, &self.palette)
            }
            Some(handle) => match self.resolver.resolve(handle.pid).await {
                None => {
                    self.state = ConnectionState::PortPending;
                    render_notice(
                        &Notice::PortPending { pid: handle.pid },
                        interval_secs,
                        &self.palette,
                    )
                }
                Some(port) => match self.fetcher.fetch(port, &handle.csrf_token).await {
                    Some(snapshot) => {
                        if self.state != ConnectionState::Connected {
                            info!(pid = handle.pid, port, "Connected to language server");
                        }
                        self.state = ConnectionState::Connected;
                        self.was_connected = true;
                        render_dashboard(
                            &snapshot,
                            handle.pid,
                            port,
                            width,
                            Local::now(),
                            &self.palette,
                            &self.config,
                        )
                    }
                    None => {
                        self.state = ConnectionState::Degraded;
                        render_notice(
                            &Notice::Unresponsive { pid: handle.pid },
                            interval_secs,
                            &self.palette,
                        )
                    }
                },
            },
        };

        self.display.draw(&lines).map_err(MonitorError::Draw)
    }

    /// Runs ticks until `cancel` fires.
    ///
    /// The inter-tick wait is cancellable and resize-aware; neither
    /// signal interrupts a tick already in progress.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<()> {
        let mut resize = spawn_resize_listener();

        loop {
            self.tick().await?;

            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    info!("Cancellation received, stopping monitor");
                    break;
                }

                Some(()) = resize.recv() => {
                    debug!("Terminal resized, forcing redraw");
                }

                _ = tokio::time::sleep(self.config.refresh_interval) => {}
            }
        }

        Ok(())
    }
}

/// Forwards SIGWINCH into a channel the refresh loop can select on.
///
/// The channel holds one pending notification; a burst of resizes
/// collapses into a single early redraw. On non-unix targets the
/// channel never fires and the loop just follows the tick timer.
fn spawn_resize_listener() -> mpsc::Receiver<()> {
    let (tx, rx) = mpsc::channel(1);

    #[cfg(unix)]
    tokio::spawn(async move {
        use tokio::signal::unix::{signal, SignalKind};

        let mut stream = match signal(SignalKind::window_change()) {
            Ok(stream) => stream,
            Err(e) => {
                debug!(error = %e, "SIGWINCH registration failed, resize redraw disabled");
                return;
            }
        };

        while stream.recv().await.is_some() {
            if tx.is_closed() {
                break;
            }
            // A full channel means a redraw is already pending
            let _ = tx.try_send(());
        }
    });

    #[cfg(not(unix))]
    drop(tx);

    rx
}
