//! Retry wrapper for verifier clients
//!
//! Only transport failures are retried. A verifier that answered, even with
//! an error status or an unreadable body, is not asked again.

use async_trait::async_trait;
use dynact_core::{PropertyValues, VerificationError, VerificationResult, Verifier};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 1000,
            max_delay_ms: 30000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Backoff before retry number `attempt` (0-based), capped at `max_delay_ms`.
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let delay = self.initial_delay_ms as f64 * self.backoff_multiplier.powi(attempt as i32);
        Duration::from_millis(delay.min(self.max_delay_ms as f64) as u64)
    }
}

pub struct RetryingVerifier<V> {
    inner: V,
    policy: RetryPolicy,
    use_jitter: bool,
}

impl<V: Verifier> RetryingVerifier<V> {
    pub fn new(inner: V, policy: RetryPolicy) -> Self {
        Self { inner, policy, use_jitter: true }
    }

    pub fn with_jitter(mut self, use_jitter: bool) -> Self {
        self.use_jitter = use_jitter;
        self
    }

    fn delay(&self, attempt: u32) -> Duration {
        let base = self.policy.base_delay(attempt);
        if !self.use_jitter {
            return base;
        }
        // Full jitter
        let factor: f64 = rand::thread_rng().gen();
        Duration::from_millis((base.as_millis() as f64 * factor) as u64)
    }
}

#[async_trait]
impl<V: Verifier> Verifier for RetryingVerifier<V> {
    async fn verify(
        &self,
        connector_id: &str,
        action_id: &str,
        values: &PropertyValues,
    ) -> Result<VerificationResult, VerificationError> {
        let mut attempt = 0;
        loop {
            match self.inner.verify(connector_id, action_id, values).await {
                Err(e) if e.is_unreachable() && attempt < self.policy.max_retries => {
                    let delay = self.delay(attempt);
                    attempt += 1;
                    tracing::info!(
                        connector_id,
                        action_id,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Retrying verifier call"
                    );
                    tokio::time::sleep(delay).await;
                }
                other => return other,
            }
        }
    }
}
