//! Task queue service
//!
//! Enqueues background work and reads how much of it is still pending.
//! Submissions are not idempotent; retrying after an ambiguous failure may
//! queue the same work twice.

use std::sync::Arc;

use async_trait::async_trait;
use jobdesk_client::{ApiClient, ClientError};
use jobdesk_core::domain::task::TaskId;
use jobdesk_core::dto::task::CreateTask;
use tracing::{info, warn};

/// Background task queue
#[async_trait]
pub trait TaskQueue: Send + Sync {
    /// Enqueue a work item
    ///
    /// # Arguments
    /// * `task_type` - Registered task type, e.g. `process_job`
    /// * `payload` - Task-specific data
    ///
    /// # Returns
    /// The identifier the backend assigned
    async fn enqueue(
        &self,
        task_type: &str,
        payload: serde_json::Value,
    ) -> Result<TaskId, ClientError>;

    /// Number of tasks not yet processed
    async fn pending_count(&self) -> Result<u64, ClientError>;
}

/// HTTP-backed task queue
#[derive(Clone)]
pub struct TaskQueueClient {
    client: Arc<ApiClient>,
}

impl TaskQueueClient {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TaskQueue for TaskQueueClient {
    async fn enqueue(
        &self,
        task_type: &str,
        payload: serde_json::Value,
    ) -> Result<TaskId, ClientError> {
        let task = CreateTask::new(task_type, payload);

        match self.client.enqueue_task(&task).await {
            Ok(task_id) => {
                info!("Enqueued {} task {}", task_type, task_id);
                Ok(task_id)
            }
            Err(e) => {
                warn!("Failed to enqueue {} task: {}", task_type, e);
                Err(e)
            }
        }
    }

    async fn pending_count(&self) -> Result<u64, ClientError> {
        self.client.pending_task_count().await
    }
}
