//! Action enrichment handler

use crate::{error::ErrorResponse, middleware::RequestId, AppState, ServerError};
use axum::{
    body::Bytes,
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
};
use dynact_core::{ActionDefinition, PropertyValues};
use serde_json::Value as JsonValue;
use std::time::Instant;

/// POST /api/v1/connections/:connection_id/actions/:action_id
///
/// The body holds the values chosen so far as a JSON object; an empty body
/// means none. Answers with the enriched action definition itself.
pub async fn enrich_action(
    State(app_state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path((connection_id, action_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<ActionDefinition>, (StatusCode, Json<ErrorResponse>)> {
    let req_id = request_id.0;
    let start = Instant::now();

    let user_values = parse_user_values(&body).map_err(|e| e.to_http_response(req_id.clone()))?;

    let enriched = app_state
        .service
        .enrich_for_connection_with_cancel(&connection_id, &action_id, user_values, &app_state.shutdown)
        .await
        .map_err(|e| {
            let err = ServerError::from(e);
            tracing::warn!(
                request_id = %req_id,
                connection_id = %connection_id,
                action_id = %action_id,
                error = %err,
                "Enrichment request failed"
            );
            err.to_http_response(req_id.clone())
        })?;

    tracing::info!(
        request_id = %req_id,
        connection_id = %connection_id,
        action_id = %action_id,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Enrichment request served"
    );
    Ok(Json(enriched))
}

fn parse_user_values(body: &[u8]) -> Result<PropertyValues, ServerError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(PropertyValues::new());
    }
    match serde_json::from_slice::<JsonValue>(body) {
        Ok(JsonValue::Object(map)) => Ok(map.into_iter().collect()),
        Ok(_) => Err(ServerError::InvalidInput("request body must be a JSON object".to_string())),
        Err(e) => Err(ServerError::InvalidInput(format!("request body is not valid JSON: {}", e))),
    }
}
