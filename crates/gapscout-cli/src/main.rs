//! GapScout CLI - Command-line interface
//!
//! Runs analyses directly against the public OpenStreetMap services,
//! without going through the API server.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async { commands::execute(cli).await })?;

    Ok(())
}
