// Copyright 2025 cvbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP API serving computer-vision benchmark records.
//!
//! # Endpoints
//!
//! - `GET /api/benchmarks` - every record selected by the loader, as a JSON array
//! - `POST /api/benchmarks/add` - append one record to its per-kind file
//! - `GET /api/health` - liveness
//! - anything else - the frontend bundle, with `index.html` as fallback
//!
//! All `/api` routes allow cross-origin requests from any origin.

#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod telemetry;

pub use crate::config::{AppConfig, LogFormat, MockDataConfig};
pub use crate::error::ApiError;
pub use crate::models::AppState;

use anyhow::Context;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Build the full router for `state`.
pub fn build_router(state: Arc<AppState>) -> Router {
    let api = routes::api_routes().layer(CorsLayer::permissive());

    Router::new()
        .merge(api)
        .fallback_service(routes::app::spa_service(&state.config.static_dir))
        .layer(axum::middleware::from_fn(
            middleware::request_context_middleware,
        ))
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    info!(
        %addr,
        data_dir = %config.data_dir.display(),
        static_dir = %config.static_dir.display(),
        fallback_file = %config.fallback_file,
        mock_data = config.mock_data.enabled,
        "Starting benchmark API"
    );

    let state = Arc::new(AppState::new(config));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Benchmark API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
