//! Job-related API endpoints

use crate::ApiClient;
use crate::error::Result;
use chrono::{DateTime, Utc};
use jobdesk_core::domain::job::Job;
use jobdesk_core::dto::job::{DeltaQuery, JobPageQuery};
use tracing::debug;

impl ApiClient {
    // =============================================================================
    // Job Loading
    // =============================================================================

    /// Load one page of jobs
    ///
    /// # Arguments
    /// * `query` - Page number (1-based) and page size
    ///
    /// # Returns
    /// The jobs on that page, in backend order
    pub async fn list_jobs(&self, query: JobPageQuery) -> Result<Vec<Job>> {
        let url = self.url(&self.endpoints.jobs);
        debug!(page = query.page, page_size = query.page_size, "Loading job page");

        let response = self.client.get(&url).query(&query).send().await?;

        self.handle_envelope(response).await
    }

    /// Load the jobs that changed after `since`
    ///
    /// The cursor is opaque to the caller; the cost of the call scales with
    /// the number of changed jobs, not the size of the dataset.
    ///
    /// # Arguments
    /// * `since` - Last acknowledged sync cursor
    ///
    /// # Returns
    /// The changed jobs (possibly empty)
    pub async fn job_deltas(&self, since: DateTime<Utc>) -> Result<Vec<Job>> {
        let url = self.url(&self.endpoints.job_deltas);
        let query = DeltaQuery::since(since);
        debug!(since = %query.since, "Loading job deltas");

        let response = self.client.get(&url).query(&query).send().await?;

        self.handle_envelope(response).await
    }
}
