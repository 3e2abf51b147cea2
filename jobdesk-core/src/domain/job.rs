//! Job domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A job as reported by the backend
///
/// Uniquely identified by `job_id`. Only the server mutates jobs; the client
/// keeps a cached projection and refreshes it from full loads and deltas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub job_id: String,
    pub title: String,
    pub budget: String,
    pub status: JobStatus,
    pub job_fit: Option<f64>,
    pub last_updated_at: DateTime<Utc>,
}

/// Job processing status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    New,
    InProgress,
    Completed,
    Cancelled,
}

impl JobStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::New => "new",
            JobStatus::InProgress => "in_progress",
            JobStatus::Completed => "completed",
            JobStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
