//! Wildlife Health Watch API Server
//!
//! Run with: cargo run --bin wildwatch
//!
//! Generates the session dataset once, then serves dashboard payloads until
//! interrupted. Configuration comes from `WILDWATCH_CONFIG`, the default
//! config locations, or `WILDWATCH_*` environment variables; `RUST_LOG`
//! overrides the configured log level.

use std::sync::Arc;
use wildwatch::api::{serve, AppState};
use wildwatch::config::Config;
use wildwatch::surveillance::Dataset;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();
    config.logging.init();

    tracing::info!(
        "Starting Wildlife Health Watch v{}",
        env!("CARGO_PKG_VERSION")
    );

    let generator_config = config.dataset.generator_config()?;
    let dataset = Arc::new(Dataset::generate(
        config.dataset.records,
        config.dataset.seed,
        generator_config,
    )?);
    tracing::info!("Dataset: {}", dataset.info());

    let state = AppState::new(dataset, config.api.clone());
    serve(state, &config.api).await?;

    tracing::info!("Wildlife Health Watch stopped");
    Ok(())
}
