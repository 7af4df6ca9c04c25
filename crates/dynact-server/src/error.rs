//! Server error types

use axum::{http::StatusCode, response::Json};
use dynact_core::VerificationError;
use dynact_runtime::{EnrichError, RuntimeError};
use serde::Serialize;
use serde_json::json;

pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Verifier unreachable: {0}")]
    VerifierUnreachable(String),

    #[error("Upstream error: {message}")]
    Upstream { message: String, status: Option<u16> },

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response DTO
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
    pub metadata: super::dto::ResponseMeta,
}

#[derive(Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ServerError {
    pub fn to_http_response(&self, request_id: String) -> (StatusCode, Json<ErrorResponse>) {
        let (status, code) = match self {
            ServerError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            ServerError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ServerError::VerifierUnreachable(_) => (StatusCode::BAD_GATEWAY, "VERIFIER_UNREACHABLE"),
            ServerError::Upstream { .. } => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            ServerError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE"),
            ServerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        };
        let details = match self {
            ServerError::Upstream { status: Some(s), .. } => Some(json!({ "upstream_status": s })),
            _ => None,
        };

        let response = ErrorResponse {
            success: false,
            error: ErrorDetails { code: code.to_string(), message: self.to_string(), details },
            metadata: super::dto::ResponseMeta::new(request_id),
        };

        (status, Json(response))
    }
}

impl From<RuntimeError> for ServerError {
    fn from(err: RuntimeError) -> Self {
        match err {
            RuntimeError::ConnectionNotFound(_)
            | RuntimeError::ConnectorNotFound(_)
            | RuntimeError::ActionNotFound { .. } => ServerError::NotFound(err.to_string()),
            RuntimeError::Store(e) => ServerError::Internal(e.to_string()),
            RuntimeError::Enrich(e) => e.into(),
        }
    }
}

impl From<EnrichError> for ServerError {
    fn from(err: EnrichError) -> Self {
        match err {
            EnrichError::Verification(VerificationError::Unreachable(msg)) => {
                ServerError::VerifierUnreachable(msg)
            }
            EnrichError::Verification(VerificationError::Rejected { status, message }) => {
                ServerError::Upstream {
                    message: format!("verifier rejected the request ({}): {}", status, message),
                    status: Some(status),
                }
            }
            EnrichError::Verification(e @ VerificationError::Malformed(_)) => {
                ServerError::Upstream { message: e.to_string(), status: None }
            }
            EnrichError::Configuration(e) => ServerError::Internal(e.to_string()),
            EnrichError::Cancelled => ServerError::Unavailable("server is shutting down".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_errors_map_to_bad_gateway() {
        let unreachable: ServerError =
            EnrichError::Verification(VerificationError::Unreachable("refused".into())).into();
        let (status, body) = unreachable.to_http_response("req-1".into());
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.0.error.code, "VERIFIER_UNREACHABLE");

        let rejected: ServerError = EnrichError::Verification(VerificationError::Rejected {
            status: 401,
            message: "bad token".into(),
        })
        .into();
        let (status, body) = rejected.to_http_response("req-2".into());
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.0.error.code, "UPSTREAM_ERROR");
        assert_eq!(body.0.error.details, Some(json!({"upstream_status": 401})));
    }

    #[test]
    fn test_missing_records_map_to_not_found() {
        let err: ServerError = RuntimeError::ConnectionNotFound("9".into()).into();
        let (status, body) = err.to_http_response("req-3".into());
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.0.metadata.request_id, "req-3");
    }
}
