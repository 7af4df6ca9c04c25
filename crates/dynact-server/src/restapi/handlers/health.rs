//! Health check handlers

use crate::{
    dto::{ResponseEnvelope, ResponseMeta},
    middleware::RequestId,
};
use axum::{extract::Extension, response::Json};
use serde_json::json;

/// GET /api/v1/health
pub async fn health_check(
    Extension(request_id): Extension<RequestId>,
) -> Json<ResponseEnvelope<serde_json::Value>> {
    Json(ResponseEnvelope {
        success: true,
        data: json!({
            "status": "healthy",
            "service": "dynact-server",
            "version": env!("CARGO_PKG_VERSION")
        }),
        metadata: ResponseMeta::new(request_id.0),
    })
}
