//! REST API DTOs

use serde::Serialize;

/// Response envelope wrapper
#[derive(Serialize)]
pub struct ResponseEnvelope<T> {
    pub success: bool,
    pub data: T,
    pub metadata: ResponseMeta,
}

/// Response metadata
#[derive(Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ResponseMeta {
    pub fn new(request_id: String) -> Self {
        Self { request_id, execution_time_ms: None }
    }
}
