//! Jobdesk HTTP Client
//!
//! A small, type-safe HTTP client for the Jobdesk backend.
//!
//! Every endpoint answers with the same `{status, data, message}` envelope;
//! this crate unwraps it and maps failures onto [`ClientError`] so callers
//! can tell transport trouble from a backend that said no.
//!
//! # Example
//!
//! ```no_run
//! use jobdesk_client::ApiClient;
//! use jobdesk_core::dto::task::CreateTask;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ApiClient::new("http://localhost:5000");
//!
//!     let task_id = client.enqueue_task(&CreateTask::process_job("42")).await?;
//!     let pending = client.pending_task_count().await?;
//!
//!     println!("Queued {} ({} pending)", task_id, pending);
//!     Ok(())
//! }
//! ```

pub mod error;
mod jobs;
mod tasks;

#[cfg(test)]
mod stub;

// Re-export commonly used types
pub use error::{ClientError, Result};

use jobdesk_core::dto::envelope::Envelope;
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Endpoint paths, relative to the base URL
///
/// Deployments that mount the API under a prefix (or use the legacy
/// `/api/task_queue/...` routes) override these instead of forking the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Full page load (`GET`)
    pub jobs: String,
    /// Incremental load by cursor (`GET`)
    pub job_deltas: String,
    /// Enqueue a task (`POST`)
    pub tasks: String,
    /// Pending task count (`GET`)
    pub pending_count: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            jobs: "/jobs".to_string(),
            job_deltas: "/jobs/deltas".to_string(),
            tasks: "/tasks".to_string(),
            pending_count: "/tasks/pending-count".to_string(),
        }
    }
}

/// HTTP client for the Jobdesk backend
///
/// Methods are grouped by resource:
/// - Jobs (full page load, deltas since a cursor)
/// - Task queue (enqueue, pending count)
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Base URL of the backend (e.g., "http://localhost:5000")
    base_url: String,
    /// Endpoint paths
    endpoints: Endpoints,
    /// HTTP client instance
    client: Client,
}

impl ApiClient {
    /// Create a new client with the default endpoint layout
    ///
    /// # Example
    /// ```
    /// use jobdesk_client::ApiClient;
    ///
    /// let client = ApiClient::new("http://localhost:5000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use jobdesk_client::ApiClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(10))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = ApiClient::with_client("http://localhost:5000", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoints: Endpoints::default(),
            client,
        }
    }

    /// Replace the endpoint layout
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Get the base URL of the backend
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the endpoint layout in use
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Unwrap an enveloped response
    ///
    /// The envelope decides success, not the HTTP status: an error envelope
    /// on a 200 is still an error, and an error envelope on a 500 keeps the
    /// backend's message. Only a non-2xx response without an envelope is
    /// reported as [`ClientError::Http`].
    async fn handle_envelope<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<Envelope<T>>(&body) {
            Ok(envelope) => Ok(envelope.into_data()?),
            Err(_) if !status.is_success() => Err(ClientError::http(status.as_u16(), body)),
            Err(e) => Err(ClientError::Protocol(format!(
                "Failed to parse response envelope: {}",
                e
            ))),
        }
    }
}
