//! Error types for the Jobdesk client

use jobdesk_core::dto::envelope::EnvelopeFault;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the backend
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network failure, timeout, or an unreadable body
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response that did not carry an envelope
    #[error("HTTP error (status {status}): {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Raw response body
        message: String,
    },

    /// Envelope reported a non-success status, or the body was malformed
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Request rejected before it was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an HTTP error from status code and body
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Network or HTTP-level failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Http { .. })
    }

    /// Envelope or body-shape failure
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }
}

impl From<EnvelopeFault> for ClientError {
    fn from(fault: EnvelopeFault) -> Self {
        Self::Protocol(fault.to_string())
    }
}
