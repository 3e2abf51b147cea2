//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod jobs;
mod tasks;

pub use jobs::JobCommands;
pub use tasks::TaskCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Job table and synchronization
    Jobs {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Background task queue
    Tasks {
        #[command(subcommand)]
        command: TaskCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Jobs { command } => jobs::handle_job_command(command, config).await,
        Commands::Tasks { command } => tasks::handle_task_command(command, config).await,
    }
}
