pub mod calendar;
pub mod error;
pub mod http;
pub mod retry;

pub use calendar::{CalendarEventModel, CalendarEventsCustomizer};
pub use error::{ConnectorError, ConnectorResult};
pub use http::{HttpVerifier, TimeoutConfig, TimeoutManager, VerifierSettings};
pub use retry::{RetryPolicy, RetryingVerifier};

use dynact_core::Verifier;
use std::sync::Arc;

/// HTTP verifier for `settings`, wrapped for retries when a policy is set.
pub fn build_verifier(settings: &VerifierSettings) -> ConnectorResult<Arc<dyn Verifier>> {
    let http = HttpVerifier::new(settings)?;
    Ok(match &settings.retry {
        Some(policy) => Arc::new(RetryingVerifier::new(http, policy.clone())),
        None => Arc::new(http),
    })
}
