//! Job command handlers
//!
//! Full page loads, the live-synced table, and queueing jobs for
//! processing.

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use jobdesk_client::ApiClient;
use jobdesk_core::dto::job::JobPageQuery;
use jobdesk_core::dto::task::PROCESS_JOB;
use tracing::{debug, info};

use crate::config::Config;
use crate::render::{TerminalBanner, TerminalTable};
use crate::scheduler::{PollPhase, PollSettings, PollingController};
use crate::service::{TaskQueue, TaskQueueClient};
use crate::status::{StatusBroadcaster, StatusLevel};
use crate::store::JobsTableStore;

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// Show one page of jobs
    List {
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Rows per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Show jobs and keep them in sync until polling goes idle
    Watch {
        /// Rows to load before polling starts
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Queue jobs for background processing
    Process {
        /// IDs of the jobs to process
        #[arg(required = true)]
        job_ids: Vec<String>,
    },
}

/// Handle job commands
pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    let client = Arc::new(ApiClient::new(config.api_url.clone()));

    match command {
        JobCommands::List { page, page_size } => {
            let query = JobPageQuery {
                page,
                page_size: page_size.unwrap_or(config.page_size),
            };
            list_jobs(&client, query).await
        }
        JobCommands::Watch { page_size } => {
            let query = JobPageQuery {
                page: 1,
                page_size: page_size.unwrap_or(config.page_size),
            };
            watch_jobs(client, query, config).await
        }
        JobCommands::Process { job_ids } => process_jobs(client, &job_ids).await,
    }
}

/// Load and print one page
async fn list_jobs(client: &ApiClient, query: JobPageQuery) -> Result<()> {
    let jobs = client
        .list_jobs(query)
        .await
        .context("Failed to load jobs")?;

    let mut store = JobsTableStore::new(TerminalTable);
    store.insert_or_append(jobs);
    store.redraw();
    if !store.is_empty() {
        println!(
            "{}",
            format!("{} job(s) on page {}", store.len(), query.page).dimmed()
        );
    }

    Ok(())
}

/// Load the first page, then poll until idle or interrupted
async fn watch_jobs(client: Arc<ApiClient>, query: JobPageQuery, config: &Config) -> Result<()> {
    let status = StatusBroadcaster::new(TerminalBanner);

    let jobs = client
        .list_jobs(query)
        .await
        .context("Failed to load jobs")?;

    let mut store = JobsTableStore::new(TerminalTable);
    store.insert_or_append(jobs);
    store.redraw();

    let notifier = status.clone();
    let timeout = config.status_timeout;
    store.on_miss(move |job| {
        notifier.show_transient(
            format!("Job {} is not on this page yet", job.job_id),
            StatusLevel::Info,
            0,
            timeout,
        );
    });

    let controller = PollingController::new(
        PollSettings::from(config),
        Arc::new(TaskQueueClient::new(Arc::clone(&client))),
        client,
        Arc::new(Mutex::new(store)),
        status.clone(),
    );

    controller.start();
    let mut phase = controller.subscribe();

    tokio::select! {
        result = phase.wait_for(|p| *p == PollPhase::Idle) => {
            result.context("Polling controller went away")?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, stopping polling");
            controller.stop();
        }
    }

    let snapshot = controller.snapshot();
    debug!(
        empty_streak = snapshot.empty_streak,
        last_sync = ?snapshot.last_sync,
        "Polling finished"
    );

    match status.sticky() {
        Some(sticky) if sticky.level == StatusLevel::Error => anyhow::bail!(sticky.message),
        _ => Ok(()),
    }
}

/// Queue one `process_job` task per selected job
async fn process_jobs(client: Arc<ApiClient>, job_ids: &[String]) -> Result<()> {
    let tasks = TaskQueueClient::new(client);

    for job_id in job_ids {
        let task_id = tasks
            .enqueue(PROCESS_JOB, serde_json::json!({ "job_id": job_id }))
            .await
            .with_context(|| format!("Failed to queue job {}", job_id))?;

        println!(
            "{} Queued job {} as task {}",
            "✓".green(),
            job_id.cyan(),
            task_id.to_string().dimmed()
        );
    }

    let pending = tasks
        .pending_count()
        .await
        .context("Failed to read pending task count")?;
    println!("{}", format!("{} task(s) pending", pending).bold());

    Ok(())
}
