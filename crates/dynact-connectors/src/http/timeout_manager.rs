//! Timeout handling for verifier calls

use crate::error::{ConnectorError, ConnectorResult};
use crate::http::settings::TimeoutConfig;
use reqwest::ClientBuilder;
use std::time::Duration;
use tokio::time::timeout;

#[derive(Debug, Clone)]
pub struct TimeoutManager {
    config: TimeoutConfig,
}

impl TimeoutManager {
    pub fn new(config: TimeoutConfig) -> Self {
        Self { config }
    }

    /// Only the connect timeout goes on the client; the call limit is applied
    /// per request so the client can be shared.
    pub fn apply_to_client_builder(&self, builder: ClientBuilder) -> ClientBuilder {
        builder.connect_timeout(Duration::from_millis(self.config.connect_ms))
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.config.call_ms)
    }

    /// Run `operation` (request and body read) under the call timeout.
    pub async fn execute_with_timeout<F, T>(&self, operation: F) -> ConnectorResult<T>
    where
        F: std::future::Future<Output = Result<T, reqwest::Error>>,
    {
        let call_timeout = self.call_timeout();

        match timeout(call_timeout, operation).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) if e.is_timeout() => Err(ConnectorError::Timeout(format!(
                "Request timed out after {}ms",
                call_timeout.as_millis()
            ))),
            Ok(Err(e)) if e.is_connect() => {
                Err(ConnectorError::Connection(format!("Connection failed: {}", e)))
            }
            Ok(Err(e)) => Err(ConnectorError::Http(e)),
            Err(_) => Err(ConnectorError::Timeout(format!(
                "Call exceeded {}ms",
                call_timeout.as_millis()
            ))),
        }
    }
}
