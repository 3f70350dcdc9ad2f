//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;

/// hyprurgent - keep an `urgent` tag on Hyprland windows that want attention
#[derive(Parser, Debug)]
#[command(
    name = "hu",
    about = "Tags Hyprland windows that demand attention until they are focused",
    version,
    after_help = "Stop with SIGINT or SIGTERM. Set RUST_LOG to tune log output (written to stderr)."
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
