//! Hyprland IPC
//!
//! Hyprland exposes two Unix Domain Sockets per compositor instance:
//!
//! - `.socket2.sock` pushes newline-framed `NAME>>DATA` events to every listener
//! - `.socket.sock` accepts one request per connection and answers with a reply
//!
//! Both live in the instance directory named after `HYPRLAND_INSTANCE_SIGNATURE`.

use std::path::{Path, PathBuf};

use tracing::debug;

pub mod command;
pub mod error;
pub mod event;
pub mod listener;

pub use command::{CommandSender, HyprCtl, NotifyIcon};
pub use error::HyprError;
pub use event::{Event, WindowAddress};
pub use listener::{EventHandler, EventListener};

/// File name of the event socket inside the instance directory
pub const EVENT_SOCKET: &str = ".socket2.sock";

/// File name of the request/reply socket inside the instance directory
pub const COMMAND_SOCKET: &str = ".socket.sock";

/// Environment variable Hyprland sets for every client it launches
pub const INSTANCE_SIGNATURE_ENV: &str = "HYPRLAND_INSTANCE_SIGNATURE";

/// Resolved locations of both Hyprland sockets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketPaths {
    /// Event stream socket
    pub events: PathBuf,
    /// Command socket
    pub commands: PathBuf,
}

impl SocketPaths {
    /// Socket paths inside an explicit instance directory
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            events: dir.join(EVENT_SOCKET),
            commands: dir.join(COMMAND_SOCKET),
        }
    }

    /// Resolve the socket paths for the running Hyprland instance
    ///
    /// An override directory wins over environment lookup.
    pub fn resolve(override_dir: Option<&Path>) -> Result<Self, HyprError> {
        if let Some(dir) = override_dir {
            debug!(?dir, "SocketPaths::resolve: using configured socket directory");
            return Ok(Self::in_dir(dir));
        }

        let signature = std::env::var(INSTANCE_SIGNATURE_ENV).ok();
        let dir = instance_dir(dirs::runtime_dir(), signature.as_deref())?;
        debug!(?dir, "SocketPaths::resolve: resolved instance directory");
        Ok(Self::in_dir(&dir))
    }
}

/// Locate the instance directory
///
/// Hyprland 0.40+ keeps its sockets under `$XDG_RUNTIME_DIR/hypr/<sig>`; older
/// releases used `/tmp/hypr/<sig>`. The legacy path is used only when it exists
/// and the modern one does not.
fn instance_dir(runtime_dir: Option<PathBuf>, signature: Option<&str>) -> Result<PathBuf, HyprError> {
    let signature = signature.filter(|s| !s.is_empty()).ok_or(HyprError::NotRunning)?;
    let legacy = PathBuf::from("/tmp/hypr").join(signature);

    let Some(runtime_dir) = runtime_dir else {
        return Ok(legacy);
    };

    let modern = runtime_dir.join("hypr").join(signature);
    if !modern.exists() && legacy.exists() {
        debug!(?legacy, "instance_dir: falling back to legacy location");
        return Ok(legacy);
    }
    Ok(modern)
}
