//! Console configuration
//!
//! Backend location plus the knobs of the polling loop and status banner.

use std::time::Duration;

use crate::status::DEFAULT_TRANSIENT_TIMEOUT;

/// Console configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL (e.g., "http://localhost:5000")
    pub api_url: String,

    /// Delay between the end of one poll cycle and the start of the next
    pub poll_interval: Duration,

    /// Consecutive cycles without activity before polling stops on its own
    pub idle_ceiling: u32,

    /// How long transient banner messages stay up
    pub status_timeout: Duration,

    /// Rows per full page load
    pub page_size: u32,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            poll_interval: Duration::from_millis(1000),
            idle_ceiling: 20,
            status_timeout: DEFAULT_TRANSIENT_TIMEOUT,
            page_size: 50,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.idle_ceiling == 0 {
            anyhow::bail!("idle_ceiling must be greater than 0");
        }

        if self.page_size == 0 {
            anyhow::bail!("page_size must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("http://localhost:5000".to_string())
    }
}
