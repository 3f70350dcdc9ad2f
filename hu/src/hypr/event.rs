//! Hyprland event decoding
//!
//! Each line on the event socket is `NAME>>DATA`. Only the three events that
//! drive urgency tracking are decoded into typed variants; everything else is
//! kept as [`Event::Other`] so callers can log it and move on.

use std::fmt;

/// Opaque window identifier assigned by Hyprland
///
/// Events carry bare hex (`55d0c1a3b2f0`) while the `address:` window selector
/// expects a `0x` prefix, so the address is normalized to the prefixed form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowAddress(String);

impl WindowAddress {
    /// Build an address from raw event data, `None` if it is blank
    pub fn new(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw == "0x" {
            return None;
        }
        if raw.starts_with("0x") {
            Some(Self(raw.to_string()))
        } else {
            Some(Self(format!("0x{}", raw)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Events received from the Hyprland event socket
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A window requested attention (`urgent>>ADDR`)
    Urgent(WindowAddress),

    /// Focus moved to a window (`activewindowv2>>ADDR`)
    ActiveWindowChanged(WindowAddress),

    /// A window was destroyed (`closewindow>>ADDR`)
    WindowClosed(WindowAddress),

    /// Any event the tracker does not consume
    Other { name: String, data: String },
}

impl Event {
    /// Decode a single line from the event socket
    ///
    /// Returns `None` for lines that are not framed as `NAME>>DATA`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (name, data) = line.split_once(">>")?;

        let typed = match name {
            "urgent" => WindowAddress::new(data).map(Event::Urgent),
            "activewindowv2" => WindowAddress::new(data).map(Event::ActiveWindowChanged),
            "closewindow" => WindowAddress::new(data).map(Event::WindowClosed),
            _ => None,
        };

        Some(typed.unwrap_or_else(|| Event::Other {
            name: name.to_string(),
            data: data.to_string(),
        }))
    }

    /// Event name as it appears on the wire
    pub fn name(&self) -> &str {
        match self {
            Event::Urgent(_) => "urgent",
            Event::ActiveWindowChanged(_) => "activewindowv2",
            Event::WindowClosed(_) => "closewindow",
            Event::Other { name, .. } => name,
        }
    }
}
