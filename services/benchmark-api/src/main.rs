//! Benchmark API entry point.

use benchmark_api::{config::AppConfig, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::load()?;
    telemetry::init_tracing(config.log_format);
    benchmark_api::serve(config).await
}
