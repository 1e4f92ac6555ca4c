//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod job;
mod summary;

pub use job::JobCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Burn job management
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Show burn report totals
    Summary,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Job { command } => job::handle_job_command(command, config).await,
        Commands::Summary => summary::show_summary(config).await,
    }
}
