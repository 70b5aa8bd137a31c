//! Command implementations

mod analyze;
mod search;
mod types;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    match cli.command {
        Commands::Analyze(args) => analyze::execute(args, &output).await,
        Commands::Search(args) => search::execute(args, &output).await,
        Commands::Types => types::execute(&output),
    }
}
