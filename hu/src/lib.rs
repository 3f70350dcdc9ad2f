//! hyprurgent - urgent window tagging for Hyprland
//!
//! Listens to Hyprland's event socket and keeps a tag (`urgent` by default)
//! on every window that requested attention. The tag is removed when the
//! window is focused; windows closed while urgent are simply forgotten.
//!
//! # Modules
//!
//! - [`hypr`] - Hyprland IPC: event decoding, event listener, command client
//! - [`tracker`] - The urgent window set and its transitions
//! - [`agent`] - Client wiring, signal handling and the run loop
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod agent;
pub mod cli;
pub mod config;
pub mod hypr;
pub mod tracker;

// Re-export commonly used types
pub use agent::Agent;
pub use config::{Config, NotifyConfig};
pub use hypr::{CommandSender, Event, EventHandler, EventListener, HyprCtl, HyprError, NotifyIcon, SocketPaths, WindowAddress};
pub use tracker::{FailureNotice, TrackerOptions, UrgencyTracker};
