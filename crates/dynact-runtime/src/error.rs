use dynact_core::{ConfigurationError, CoreError, VerificationError};
use thiserror::Error;

pub type EnrichResult<T> = Result<T, EnrichError>;
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Failure of a single enrichment computation. No partial result exists
/// when one of these is returned.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("enrichment cancelled before the verifier answered")]
    Cancelled,
}

/// Failure resolving stored records around an enrichment.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    #[error("Connector not found: {0}")]
    ConnectorNotFound(String),

    #[error("Action '{action_id}' not found on connector '{connector_id}'")]
    ActionNotFound { connector_id: String, action_id: String },

    #[error("Store error: {0}")]
    Store(#[from] CoreError),

    #[error(transparent)]
    Enrich(#[from] EnrichError),
}

impl RuntimeError {
    /// The verifier failure behind this error, if any.
    pub fn verification(&self) -> Option<&VerificationError> {
        match self {
            RuntimeError::Enrich(EnrichError::Verification(e)) => Some(e),
            _ => None,
        }
    }
}

impl From<EnrichError> for CoreError {
    fn from(err: EnrichError) -> Self {
        match err {
            EnrichError::Verification(e) => e.into(),
            EnrichError::Configuration(e) => e.into(),
            EnrichError::Cancelled => CoreError::Other("enrichment cancelled".to_string()),
        }
    }
}

impl From<RuntimeError> for CoreError {
    fn from(err: RuntimeError) -> Self {
        match err {
            RuntimeError::Store(e) => e,
            RuntimeError::Enrich(e) => e.into(),
            other => CoreError::NotFound(other.to_string()),
        }
    }
}
