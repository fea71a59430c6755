pub mod app;
pub mod benchmarks;

use axum::{routing::get, Json, Router};
use std::sync::Arc;

use crate::models::{AppState, HealthResponse};

/// All `/api` routes.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health", get(health))
        .merge(benchmarks::routes())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
