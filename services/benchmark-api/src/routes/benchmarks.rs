use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use cvbench_records::{append_record, dataset_kind, generate_mock_records, Record};
use rand::{rngs::StdRng, SeedableRng};
use std::sync::Arc;
use tracing::info;

use crate::config::MockDataConfig;
use crate::error::ApiError;
use crate::middleware::RequestContext;
use crate::models::{AppState, MessageResponse};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/benchmarks", get(list_benchmarks))
        .route("/api/benchmarks/add", post(add_benchmark))
}

async fn list_benchmarks(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
) -> Result<Json<Vec<Record>>, ApiError> {
    let loader = state.loader.clone();
    let data_dir = state.config.data_dir.clone();
    let report = tokio::task::spawn_blocking(move || loader.load(data_dir)).await?;

    let source = report.outcome.source_name();
    let skipped = report.skipped.len();
    let mut records = report.into_records();

    if records.is_empty() && state.config.mock_data.enabled {
        records = mock_batch(&state.config.mock_data);
        info!(
            request_id = %ctx.request_id,
            records = records.len(),
            "No stored records, serving generated placeholder data"
        );
    } else {
        info!(
            request_id = %ctx.request_id,
            source,
            records = records.len(),
            skipped,
            "Serving benchmark records"
        );
    }

    Ok(Json(records))
}

fn mock_batch(config: &MockDataConfig) -> Vec<Record> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generate_mock_records(&mut rng, config.count, Utc::now())
}

async fn add_benchmark(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let record: Record = serde_json::from_slice(&body)
        .map_err(|e| ApiError::InvalidInput(format!("Request body is not valid JSON: {}", e)))?;
    let kind = dataset_kind(&record)?;

    let data_dir = state.config.data_dir.clone();
    let _guard = state.append_lock.lock().await;
    let outcome = tokio::task::spawn_blocking(move || append_record(data_dir, kind, record)).await??;

    info!(
        request_id = %ctx.request_id,
        kind = %kind,
        total_records = outcome.total_records,
        recovered = outcome.recovered,
        "Benchmark record added"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("{} benchmark data added successfully", kind),
        }),
    ))
}
