//! API endpoint configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::ConfigError;

/// Default API base URL.
fn default_base_url() -> String {
    "https://localhost:44394/api".to_string()
}

/// Default request timeout in milliseconds.
const fn default_timeout_ms() -> u64 {
    30_000
}

/// Default number of retries for connectivity failures.
const fn default_max_retries() -> u32 {
    3
}

/// Default delay between retries in milliseconds.
const fn default_retry_delay_ms() -> u64 {
    1_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to (e.g. `https://host/api`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Extra attempts for idempotent requests that fail to connect or time out.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Pause between those attempts, in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl ApiConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    /// Check the base URL and timeout are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the base URL does not parse as
    /// an http(s) URL with a host, or the timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid_url = |reason: String| ConfigError::InvalidValue {
            field: "api.base_url".into(),
            reason,
        };
        let url = Url::parse(self.normalized_base_url())
            .map_err(|e| invalid_url(format!("'{}' is not a valid URL: {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid_url(format!("'{}' is not an http(s) URL", self.base_url)));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(invalid_url(format!("'{}' has no host", self.base_url)));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_ms".into(),
                reason: "timeout must be greater than zero".into(),
            });
        }
        Ok(())
    }
}
