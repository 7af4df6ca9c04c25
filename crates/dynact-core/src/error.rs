use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("invalid: {0}")]
    Invalid(String),
    #[error("serde: {0}")]
    Serde(String),
    #[error("io: {0}")]
    Io(String),
    #[error("upstream: {0}")]
    Upstream(String),
    #[error("other: {0}")]
    Other(String),
}

/// Failure talking to the external verification service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// The service could not be contacted (connect failure, timeout).
    #[error("verifier unreachable: {0}")]
    Unreachable(String),

    /// The service answered with a non-success status.
    #[error("verifier rejected request with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The service answered 2xx but the body could not be understood.
    #[error("verifier returned a malformed response: {0}")]
    Malformed(String),
}

impl VerificationError {
    pub fn is_unreachable(&self) -> bool {
        matches!(self, VerificationError::Unreachable(_))
    }
}

/// Failure looking up a schema specification for a data shape type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("no schema specification for type '{0}'")]
    NotFound(String),

    #[error("schema lookup for type '{shape_type}' failed: {reason}")]
    Failed { shape_type: String, reason: String },
}

/// Template data that cannot form a valid action definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("malformed template '{action_id}': {reason}")]
    MalformedTemplate { action_id: String, reason: String },
}

impl ConfigurationError {
    pub fn malformed(action_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedTemplate { action_id: action_id.into(), reason: reason.into() }
    }
}

impl From<VerificationError> for CoreError {
    fn from(err: VerificationError) -> Self {
        CoreError::Upstream(err.to_string())
    }
}

impl From<ResolutionError> for CoreError {
    fn from(err: ResolutionError) -> Self {
        match err {
            ResolutionError::NotFound(t) => CoreError::NotFound(format!("schema for type '{}'", t)),
            other => CoreError::Other(other.to_string()),
        }
    }
}

impl From<ConfigurationError> for CoreError {
    fn from(err: ConfigurationError) -> Self {
        CoreError::Invalid(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serde(err.to_string())
    }
}
