//! Hyprland command socket client
//!
//! Every request opens a fresh connection to `.socket.sock`, writes the
//! request, half-closes the stream and reads the reply until Hyprland closes
//! its end. A reply of `ok` means the request was accepted.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;
use tracing::debug;

use super::HyprError;

/// Default timeout for a single request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Icons accepted by `hyprctl notify`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyIcon {
    Warning,
    Info,
    Hint,
    Error,
    Confused,
    Ok,
    None,
}

impl NotifyIcon {
    /// Numeric code used on the wire
    pub fn code(self) -> i8 {
        match self {
            NotifyIcon::Warning => 0,
            NotifyIcon::Info => 1,
            NotifyIcon::Hint => 2,
            NotifyIcon::Error => 3,
            NotifyIcon::Confused => 4,
            NotifyIcon::Ok => 5,
            NotifyIcon::None => -1,
        }
    }
}

impl fmt::Display for NotifyIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Sends imperative requests to the window manager
#[async_trait]
pub trait CommandSender: Send + Sync {
    /// Run a dispatcher, e.g. `tagwindow` with `+urgent address:0x1`
    async fn dispatch(&self, dispatcher: &str, args: &str) -> Result<(), HyprError>;

    /// Show an on-screen notification
    async fn notify(&self, icon: NotifyIcon, timeout_ms: u64, color: &str, message: &str) -> Result<(), HyprError>;
}

/// Command client speaking to Hyprland's request socket
#[derive(Debug, Clone)]
pub struct HyprCtl {
    socket_path: PathBuf,
    timeout: Duration,
}

impl HyprCtl {
    pub fn new(socket_path: PathBuf) -> Self {
        Self {
            socket_path,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set a custom timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn socket_path(&self) -> &PathBuf {
        &self.socket_path
    }

    /// Send a raw request and return the reply text
    ///
    /// The whole exchange, connect included, is bounded by the timeout.
    pub async fn request(&self, request: &str) -> Result<String, HyprError> {
        debug!(?self.socket_path, request, "HyprCtl::request: sending");
        let reply = tokio::time::timeout(self.timeout, self.exchange(request))
            .await
            .map_err(|_| HyprError::Timeout(self.timeout))??;
        debug!(reply = %reply.trim(), "HyprCtl::request: received reply");
        Ok(reply)
    }

    async fn exchange(&self, request: &str) -> Result<String, HyprError> {
        let mut stream = UnixStream::connect(&self.socket_path)
            .await
            .map_err(|source| HyprError::Connect {
                path: self.socket_path.clone(),
                source,
            })?;

        stream.write_all(request.as_bytes()).await?;
        stream.shutdown().await?;

        let mut reply = String::new();
        stream.read_to_string(&mut reply).await?;
        Ok(reply)
    }

    /// Send a request that is expected to answer `ok`
    async fn request_ok(&self, request: &str) -> Result<(), HyprError> {
        let reply = self.request(request).await?;
        check_reply(&reply)
    }
}

/// Interpret a reply from the command socket
fn check_reply(reply: &str) -> Result<(), HyprError> {
    match reply.trim() {
        "" => Err(HyprError::EmptyReply),
        "ok" => Ok(()),
        other => Err(HyprError::Rejected(other.to_string())),
    }
}

#[async_trait]
impl CommandSender for HyprCtl {
    async fn dispatch(&self, dispatcher: &str, args: &str) -> Result<(), HyprError> {
        self.request_ok(&format!("dispatch {} {}", dispatcher, args)).await
    }

    async fn notify(&self, icon: NotifyIcon, timeout_ms: u64, color: &str, message: &str) -> Result<(), HyprError> {
        self.request_ok(&format!("notify {} {} {} {}", icon, timeout_ms, color, message))
            .await
    }
}
