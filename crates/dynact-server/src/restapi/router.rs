//! REST API router

use crate::{middleware::RequestIdLayer, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/connections/:connection_id/actions/:action_id",
            post(super::handlers::enrich::enrich_action),
        )
        .route("/api/v1/health", get(super::handlers::health::health_check))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(RequestIdLayer))
        .with_state(app_state)
}
