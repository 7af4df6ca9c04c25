use crate::error::{ConnectorError, ConnectorResult};
use crate::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_CALL_TIMEOUT_MS: u64 = 30_000;

/// Where the verifier service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VerifierSettings {
    pub url: String,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default = "default_call_timeout_ms")]
    pub call_timeout_ms: u64,
    /// Retries on transport failures; absent means a single attempt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry: Option<RetryPolicy>,
}

fn default_connect_timeout_ms() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_MS
}

fn default_call_timeout_ms() -> u64 {
    DEFAULT_CALL_TIMEOUT_MS
}

impl VerifierSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            call_timeout_ms: DEFAULT_CALL_TIMEOUT_MS,
            retry: None,
        }
    }

    pub fn timeouts(&self) -> TimeoutConfig {
        TimeoutConfig { connect_ms: self.connect_timeout_ms, call_ms: self.call_timeout_ms }
    }

    /// Parsed base URL; only absolute http(s) URLs are accepted.
    pub fn base_url(&self) -> ConnectorResult<Url> {
        let url = Url::parse(self.url.trim()).map_err(|e| {
            ConnectorError::InvalidConfig(format!("Invalid verifier url '{}': {}", self.url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(ConnectorError::InvalidConfig(format!(
                "verifier url must be http(s): {}",
                self.url
            )));
        }
        Ok(url)
    }

    pub fn validate(&self) -> ConnectorResult<()> {
        self.base_url()?;
        self.timeouts().validate()
    }
}

/// Connect timeout for the shared client and an overall limit per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    pub connect_ms: u64,
    pub call_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { connect_ms: DEFAULT_CONNECT_TIMEOUT_MS, call_ms: DEFAULT_CALL_TIMEOUT_MS }
    }
}

impl TimeoutConfig {
    pub fn validate(&self) -> ConnectorResult<()> {
        if self.connect_ms == 0 {
            return Err(ConnectorError::InvalidConfig(
                "Connect timeout must be greater than 0".to_string(),
            ));
        }
        if self.call_ms == 0 {
            return Err(ConnectorError::InvalidConfig(
                "Call timeout must be greater than 0".to_string(),
            ));
        }
        if self.connect_ms > self.call_ms {
            return Err(ConnectorError::InvalidConfig(
                "Connect timeout cannot be greater than call timeout".to_string(),
            ));
        }
        Ok(())
    }
}
