//! Job delta feed

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jobdesk_client::{ApiClient, ClientError};
use jobdesk_core::domain::job::Job;

/// Source of jobs changed since a cursor
#[async_trait]
pub trait JobFeed: Send + Sync {
    /// Jobs changed after `since`
    async fn deltas_since(&self, since: DateTime<Utc>) -> Result<Vec<Job>, ClientError>;
}

#[async_trait]
impl JobFeed for ApiClient {
    async fn deltas_since(&self, since: DateTime<Utc>) -> Result<Vec<Job>, ClientError> {
        self.job_deltas(since).await
    }
}
