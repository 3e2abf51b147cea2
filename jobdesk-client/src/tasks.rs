//! Task queue API endpoints

use crate::ApiClient;
use crate::error::{ClientError, Result};
use jobdesk_core::domain::task::TaskId;
use jobdesk_core::dto::task::{CreateTask, PendingCount, TaskCreated};
use tracing::debug;

impl ApiClient {
    // =============================================================================
    // Task Queue
    // =============================================================================

    /// Enqueue a background task
    ///
    /// Not idempotent: submitting the same task twice queues it twice.
    ///
    /// # Arguments
    /// * `task` - Task type and payload
    ///
    /// # Returns
    /// The identifier the backend assigned to the task
    pub async fn enqueue_task(&self, task: &CreateTask) -> Result<TaskId> {
        if task.task_type.trim().is_empty() {
            return Err(ClientError::InvalidRequest(
                "task type cannot be empty".to_string(),
            ));
        }

        let url = self.url(&self.endpoints.tasks);
        debug!(task_type = %task.task_type, "Enqueueing task");

        let response = self.client.post(&url).json(task).send().await?;

        let created: TaskCreated = self.handle_envelope(response).await?;
        Ok(created.task_id)
    }

    /// Number of tasks still waiting to be processed
    ///
    /// A point-in-time read; other clients may enqueue concurrently.
    pub async fn pending_task_count(&self) -> Result<u64> {
        let url = self.url(&self.endpoints.pending_count);
        let response = self.client.get(&url).send().await?;

        let count: PendingCount = self.handle_envelope(response).await?;
        Ok(count.pending_count)
    }
}
