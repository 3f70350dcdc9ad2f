//! Hyprland IPC error types

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur talking to Hyprland
#[derive(Debug, Error)]
pub enum HyprError {
    #[error("Hyprland is not running ({} is not set)", super::INSTANCE_SIGNATURE_ENV)]
    NotRunning,

    #[error("Failed to connect to {}: {source}", .path.display())]
    Connect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Event stream closed by Hyprland")]
    StreamClosed,

    #[error("Hyprland rejected request: {0}")]
    Rejected(String),

    #[error("Empty reply from Hyprland")]
    EmptyReply,
}

impl HyprError {
    /// Whether the event stream can no longer deliver events
    pub fn is_disconnect(&self) -> bool {
        matches!(self, HyprError::StreamClosed | HyprError::Connect { .. })
    }
}
