use dynact_core::{CoreError, VerificationError};

#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

impl From<ConnectorError> for CoreError {
    fn from(err: ConnectorError) -> Self {
        match err {
            ConnectorError::Serialization(e) => CoreError::Serde(e.to_string()),
            ConnectorError::Core(e) => e,
            ConnectorError::Http(e) => CoreError::Upstream(format!("HTTP error: {}", e)),
            ConnectorError::InvalidConfig(msg) => CoreError::Invalid(msg),
            ConnectorError::Timeout(msg) => CoreError::Upstream(msg),
            ConnectorError::Connection(msg) => CoreError::Upstream(msg),
        }
    }
}

/// Transport failures become `Unreachable`; a body that cannot be decoded is
/// `Malformed`.
impl From<ConnectorError> for VerificationError {
    fn from(err: ConnectorError) -> Self {
        match err {
            ConnectorError::Timeout(msg) | ConnectorError::Connection(msg) => {
                VerificationError::Unreachable(msg)
            }
            ConnectorError::Http(e) if e.is_decode() || e.is_body() => {
                VerificationError::Malformed(e.to_string())
            }
            ConnectorError::Http(e) => VerificationError::Unreachable(e.to_string()),
            ConnectorError::Serialization(e) => VerificationError::Malformed(e.to_string()),
            other => VerificationError::Unreachable(other.to_string()),
        }
    }
}

pub type ConnectorResult<T> = Result<T, ConnectorError>;
