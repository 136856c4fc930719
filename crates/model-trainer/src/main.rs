//! Disease Model Trainer - Entry Point

use anyhow::{anyhow, Context};
use model_trainer::{run, TrainerConfig};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn init_logging(config: &TrainerConfig) -> anyhow::Result<()> {
    let level: Level = config
        .log_level
        .parse()
        .map_err(|_| anyhow!("Unknown log level: {}", config.log_level))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    if config.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = TrainerConfig::load().context("Failed to load trainer configuration")?;
    init_logging(&config).context("Failed to set tracing subscriber")?;

    info!("=== Disease Model Trainer v{} ===", env!("CARGO_PKG_VERSION"));

    let report = run(&config)
        .with_context(|| format!("Training on {} failed", config.dataset_path.display()))?;

    match report.test_accuracy {
        Some(accuracy) => info!(
            "Training finished: {} diseases, {} train rows, {} test rows, accuracy {:.2}%",
            report.n_classes,
            report.n_train,
            report.n_test,
            accuracy * 100.0
        ),
        None => info!(
            "Training finished: {} diseases, {} train rows, no hold-out rows",
            report.n_classes, report.n_train
        ),
    }

    Ok(())
}
