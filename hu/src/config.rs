//! Configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name looked up in the working directory and the user config dir
pub const CONFIG_FILE: &str = "hyprurgent.yml";

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Tag toggled on windows that demand attention
    pub tag: String,

    /// Upper bound on each command socket request in milliseconds
    #[serde(rename = "command-timeout-ms")]
    pub command_timeout_ms: u64,

    /// Failure notification settings
    pub notify: NotifyConfig,

    /// Hyprland instance directory, overriding environment lookup
    #[serde(rename = "socket-dir", skip_serializing_if = "Option::is_none")]
    pub socket_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tag: "urgent".to_string(),
            command_timeout_ms: 2000,
            notify: NotifyConfig::default(),
            socket_dir: None,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, it must load
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let mut candidates = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("hyprurgent").join(CONFIG_FILE));
        }

        for candidate in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_file(candidate) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {:#}", candidate.display(), e);
                }
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Validate configuration before use
    pub fn validate(&self) -> Result<()> {
        if self.tag.is_empty() || self.tag.chars().any(char::is_whitespace) {
            return Err(eyre::eyre!("Invalid tag {:?}: must be a single non-empty word", self.tag));
        }
        if self.command_timeout_ms == 0 {
            return Err(eyre::eyre!("command-timeout-ms must be greater than zero"));
        }
        if self.notify.color.is_empty() || self.notify.color.chars().any(char::is_whitespace) {
            return Err(eyre::eyre!("Invalid notify color {:?}", self.notify.color));
        }
        Ok(())
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }
}

/// Failure notification configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NotifyConfig {
    /// Show a Hyprland notification when a tag command fails
    pub enabled: bool,

    /// How long the notification stays up
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Color argument passed to `notify` (`0` keeps the icon's default)
    pub color: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_ms: 1500,
            color: "0".to_string(),
        }
    }
}
