//! Jobdesk Console
//!
//! Operator console for the Jobdesk backend: loads jobs into a table, keeps
//! the table in sync by polling for deltas, and queues background tasks.
//!
//! Architecture:
//! - Configuration: CLI flags with environment fallbacks
//! - Services: Task queue and job delta feed over HTTP
//! - Store/Status: The rendered jobs table and the status banner
//! - Scheduler: The poll loop that ties them together

mod commands;
mod config;
mod render;
mod scheduler;
mod service;
mod status;
mod store;

#[cfg(test)]
mod testing;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jobdesk")]
#[command(about = "Jobdesk operator console", long_about = None)]
struct Cli {
    /// Backend URL
    #[arg(long, env = "JOBDESK_API_URL", default_value = "http://localhost:5000")]
    api_url: String,

    /// Delay between poll cycles, in milliseconds
    #[arg(long, env = "JOBDESK_POLL_INTERVAL_MS", default_value_t = 1000)]
    poll_interval_ms: u64,

    /// Idle poll cycles before polling stops on its own
    #[arg(long, env = "JOBDESK_IDLE_CEILING", default_value_t = 20)]
    idle_ceiling: u32,

    /// How long transient status messages stay up, in milliseconds
    #[arg(long, env = "JOBDESK_STATUS_TIMEOUT_MS", default_value_t = 3000)]
    status_timeout_ms: u64,

    /// Rows per page for full loads
    #[arg(long, env = "JOBDESK_PAGE_SIZE", default_value_t = 50)]
    page_size: u32,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            api_url: self.api_url.clone(),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            idle_ceiling: self.idle_ceiling,
            status_timeout: Duration::from_millis(self.status_timeout_ms),
            page_size: self.page_size,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout belongs to the table and banner
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobdesk_console=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = cli.config();
    config.validate()?;
    debug!("Loaded configuration: {:?}", config);

    handle_command(cli.command, &config).await
}
