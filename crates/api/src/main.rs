//! Disease Predictor - Main Entry Point

use anyhow::Context;
use api::{init_logging, run_server, ServiceConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::load().context("Failed to load server configuration")?;
    init_logging(&config)?;

    info!("=== Disease Predictor v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Loading artifacts from {}", config.artifact_dir.display());

    run_server(config).await?;

    Ok(())
}
