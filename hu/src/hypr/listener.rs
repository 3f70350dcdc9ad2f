//! Event stream listener
//!
//! Reads `.socket2.sock` line by line and hands each decoded event to a single
//! handler. The next line is not read until the handler returns, so handlers
//! see events strictly in arrival order and never concurrently.

use std::path::Path;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Split};
use tokio::net::UnixStream;
use tokio::sync::watch;
use tracing::{debug, info};

use super::{Event, HyprError};

/// Receives events from an [`EventListener`]
#[async_trait]
pub trait EventHandler: Send {
    async fn handle(&mut self, event: Event);
}

/// Connection to the Hyprland event socket
pub struct EventListener {
    lines: Split<BufReader<UnixStream>>,
}

impl EventListener {
    /// Connect to the event socket
    pub async fn connect(path: &Path) -> Result<Self, HyprError> {
        debug!(?path, "EventListener::connect: connecting");
        let stream = UnixStream::connect(path).await.map_err(|source| HyprError::Connect {
            path: path.to_path_buf(),
            source,
        })?;
        info!(?path, "Connected to Hyprland event socket");
        Ok(Self::from_stream(stream))
    }

    /// Wrap an already connected stream
    pub fn from_stream(stream: UnixStream) -> Self {
        Self {
            lines: BufReader::new(stream).split(b'\n'),
        }
    }

    /// Deliver events to `handler` until shutdown is requested
    ///
    /// Returns `Ok(())` once `shutdown` turns `true` (or its sender is dropped).
    /// Returns [`HyprError::StreamClosed`] if Hyprland closes the socket.
    pub async fn run<H>(&mut self, shutdown: &mut watch::Receiver<bool>, handler: &mut H) -> Result<(), HyprError>
    where
        H: EventHandler + ?Sized,
    {
        loop {
            if *shutdown.borrow_and_update() {
                info!("Event loop cancelled");
                return Ok(());
            }

            // next_segment is cancel safe, so losing the race to shutdown drops no data
            let segment = tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        info!("Shutdown sender dropped, stopping event loop");
                        return Ok(());
                    }
                    continue;
                }
                segment = self.lines.next_segment() => segment?,
            };

            let Some(bytes) = segment else {
                return Err(HyprError::StreamClosed);
            };

            let line = String::from_utf8_lossy(&bytes);
            match Event::parse(&line) {
                Some(event) => handler.handle(event).await,
                None => debug!(%line, "EventListener::run: skipping unframed line"),
            }
        }
    }
}
