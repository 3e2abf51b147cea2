//! Response envelope shared by every backend endpoint
//!
//! `{ "status": "success" | "error", "data": ..., "message": ... }`
//!
//! Anything other than `"success"` is an error, whatever the HTTP status code
//! of the response that carried it.

use serde::{Deserialize, Serialize};

/// Status field of the envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
    /// Any other value, e.g. the legacy `"failure"`
    #[serde(other)]
    Unknown,
}

/// Wrapper around every response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: EnvelopeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Why an envelope could not be turned into its payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeFault {
    /// The backend reported a non-success status
    Rejected(String),
    /// Success status but no `data` field
    MissingData,
}

impl std::fmt::Display for EnvelopeFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvelopeFault::Rejected(message) => write!(f, "backend rejected request: {}", message),
            EnvelopeFault::MissingData => f.write_str("success envelope without data"),
        }
    }
}

impl<T> Envelope<T> {
    /// Build a success envelope, used by stub backends
    pub fn success(data: T) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            data: Some(data),
            message: None,
        }
    }

    /// Build an error envelope, used by stub backends
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Unwrap the payload, rejecting any non-success status
    pub fn into_data(self) -> Result<T, EnvelopeFault> {
        if self.status != EnvelopeStatus::Success {
            return Err(EnvelopeFault::Rejected(
                self.message
                    .unwrap_or_else(|| "no message provided".to_string()),
            ));
        }

        self.data.ok_or(EnvelopeFault::MissingData)
    }
}
