//! Task command handlers

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use jobdesk_client::ApiClient;
use jobdesk_core::dto::task::CreateTask;

use crate::config::Config;
use crate::service::{TaskQueue, TaskQueueClient};

/// Task subcommands
#[derive(Subcommand)]
pub enum TaskCommands {
    /// Queue a task of any registered type
    Add {
        /// Task type, e.g. process_job
        task_type: String,

        /// JSON payload
        #[arg(long, default_value = "{}")]
        payload: String,
    },
    /// Show how many tasks are waiting
    Count,
    /// Queue a mailbox scan for new job offers
    FetchEmails {
        /// Maximum number of messages to read
        #[arg(long, default_value_t = 10)]
        messages: u32,
    },
}

/// Handle task commands
pub async fn handle_task_command(command: TaskCommands, config: &Config) -> Result<()> {
    let tasks = TaskQueueClient::new(Arc::new(ApiClient::new(config.api_url.clone())));

    match command {
        TaskCommands::Add { task_type, payload } => {
            let payload: serde_json::Value =
                serde_json::from_str(&payload).context("Payload is not valid JSON")?;
            enqueue(&tasks, CreateTask::new(task_type, payload)).await
        }
        TaskCommands::Count => {
            let pending = tasks
                .pending_count()
                .await
                .context("Failed to read pending task count")?;
            println!("{}", format!("{} task(s) pending", pending).bold());
            Ok(())
        }
        TaskCommands::FetchEmails { messages } => {
            enqueue(&tasks, CreateTask::fetch_email_jobs(messages)).await
        }
    }
}

async fn enqueue(tasks: &impl TaskQueue, task: CreateTask) -> Result<()> {
    let task_id = tasks
        .enqueue(&task.task_type, task.payload)
        .await
        .with_context(|| format!("Failed to queue {} task", task.task_type))?;

    println!(
        "{} Queued {} task {}",
        "✓".green(),
        task.task_type.cyan(),
        task_id.to_string().dimmed()
    );

    Ok(())
}
