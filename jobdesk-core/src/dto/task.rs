//! Task queue DTOs

use serde::{Deserialize, Serialize};

use crate::domain::task::TaskId;

/// Task type that asks the backend to process a single job
pub const PROCESS_JOB: &str = "process_job";

/// Task type that asks the backend to pull job offers out of the mailbox
pub const FETCH_EMAIL_JOBS: &str = "fetch_email_jobs";

/// Request body for `POST /tasks`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTask {
    #[serde(rename = "type")]
    pub task_type: String,
    pub payload: serde_json::Value,
}

impl CreateTask {
    pub fn new(task_type: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            task_type: task_type.into(),
            payload,
        }
    }

    /// A `process_job` task for one job
    pub fn process_job(job_id: &str) -> Self {
        Self::new(PROCESS_JOB, serde_json::json!({ "job_id": job_id }))
    }

    /// A `fetch_email_jobs` task reading at most `num_messages` messages
    pub fn fetch_email_jobs(num_messages: u32) -> Self {
        Self::new(
            FETCH_EMAIL_JOBS,
            serde_json::json!({ "num_messages_to_read": num_messages }),
        )
    }
}

/// Payload of a successful `POST /tasks`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCreated {
    pub task_id: TaskId,
}

/// Payload of `GET /tasks/pending-count`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCount {
    pub pending_count: u64,
}
