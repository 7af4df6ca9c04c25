use dynact_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Serialization(e) => CoreError::Serde(e.to_string()),
            StoreError::Core(e) => e,
            StoreError::NotFound(msg) => CoreError::NotFound(msg),
            StoreError::Validation(msg) => CoreError::Invalid(msg),
            StoreError::Io(e) => CoreError::Io(e.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
