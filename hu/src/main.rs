//! hyprurgent - urgent window tagging for Hyprland
//!
//! CLI entry point.

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use hyprurgent::agent::Agent;
use hyprurgent::cli::Cli;
use hyprurgent::config::Config;

fn setup_logging(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!(tag = %config.tag, version = env!("CARGO_PKG_VERSION"), "hyprurgent starting");

    let agent = Agent::connect(&config).await.context("Error creating event client")?;
    agent.run().await.context("Error running event client")?;

    info!("hyprurgent stopped");
    Ok(())
}
