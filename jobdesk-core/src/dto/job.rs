//! Job query DTOs

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Query string for a full page load (`GET /jobs`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPageQuery {
    pub page: u32,
    pub page_size: u32,
}

impl Default for JobPageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 50,
        }
    }
}

/// Query string for a delta load (`GET /jobs/deltas`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaQuery {
    /// RFC 3339 cursor; jobs changed strictly after it are returned
    pub since: String,
}

impl DeltaQuery {
    pub fn since(cursor: DateTime<Utc>) -> Self {
        Self {
            since: cursor.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Parse the cursor back, used by stub backends
    pub fn cursor(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.since)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}
