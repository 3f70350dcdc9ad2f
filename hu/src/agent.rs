//! Process lifecycle
//!
//! Builds the Hyprland clients, wires the [`UrgencyTracker`] into the event
//! listener and runs until SIGINT/SIGTERM or until the event stream fails.

use eyre::{Context, Result};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::hypr::{EventListener, HyprCtl, SocketPaths};
use crate::tracker::{TrackerOptions, UrgencyTracker};

/// Connected clients ready to process events
pub struct Agent {
    listener: EventListener,
    commands: HyprCtl,
    options: TrackerOptions,
}

impl Agent {
    /// Resolve sockets and connect to the event stream
    ///
    /// Any failure here is fatal: nothing has been processed yet.
    pub async fn connect(config: &Config) -> Result<Self> {
        let paths = SocketPaths::resolve(config.socket_dir.as_deref())?;
        info!(events = ?paths.events, commands = ?paths.commands, "Resolved Hyprland sockets");

        let commands = HyprCtl::new(paths.commands).with_timeout(config.command_timeout());
        let listener = EventListener::connect(&paths.events).await?;

        Ok(Self {
            listener,
            commands,
            options: TrackerOptions::from(config),
        })
    }

    /// Run until a termination signal arrives
    pub async fn run(self) -> Result<()> {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let signals = spawn_signal_watcher(shutdown_tx)?;

        let result = self.run_until(shutdown_rx).await;
        signals.abort();
        result
    }

    /// Run until `shutdown` turns `true`
    ///
    /// Cancellation is a clean exit; any other end of the event loop is an error.
    pub async fn run_until(mut self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let mut tracker = UrgencyTracker::new(self.commands, self.options);
        info!("Listening for Hyprland events");

        if let Err(e) = self.listener.run(&mut shutdown, &mut tracker).await {
            if e.is_disconnect() {
                error!("Lost connection to Hyprland");
            }
            return Err(e).context("Event loop failed");
        }

        info!(still_urgent = tracker.len(), "Event loop stopped");
        Ok(())
    }
}

/// Flip `shutdown_tx` to `true` on SIGINT or SIGTERM
///
/// Handlers are installed before returning so a signal that arrives right
/// after startup is not missed.
fn spawn_signal_watcher(shutdown_tx: watch::Sender<bool>) -> Result<JoinHandle<()>> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt()).context("Failed to install SIGINT handler")?;
    let mut sigterm = signal(SignalKind::terminate()).context("Failed to install SIGTERM handler")?;

    Ok(tokio::spawn(async move {
        tokio::select! {
            _ = sigint.recv() => warn!("SIGINT received"),
            _ = sigterm.recv() => warn!("SIGTERM received"),
        }
        let _ = shutdown_tx.send(true);
    }))
}
