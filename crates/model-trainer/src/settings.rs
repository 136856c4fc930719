//! Trainer settings

use config::{Config, ConfigError, Environment, File};
use inference_engine::ForestParams;
use serde::Deserialize;
use std::path::PathBuf;

/// Trainer configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// CSV dataset; last column is the disease label
    pub dataset_path: PathBuf,
    /// Directory receiving the three artifacts
    pub artifact_dir: PathBuf,
    /// Fraction of rows held out for evaluation
    pub test_ratio: f64,
    /// Seed for the split and the forest
    pub seed: u64,
    /// Trees in the forest
    pub n_trees: usize,
    /// Maximum tree depth
    pub max_depth: Option<usize>,
    /// Features sampled per tree
    pub max_features: Option<usize>,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("Training.csv"),
            artifact_dir: PathBuf::from("artifacts"),
            test_ratio: 0.2,
            seed: 42,
            n_trees: 100,
            max_depth: None,
            max_features: None,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl TrainerConfig {
    /// Load from `config/trainer.*` (optional) and `DISEASE_TRAINER_*` variables
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/trainer").required(false))
            .add_source(Environment::with_prefix("DISEASE_TRAINER").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Forest parameters derived from this configuration
    pub fn forest_params(&self) -> ForestParams {
        ForestParams {
            n_trees: self.n_trees,
            max_depth: self.max_depth,
            max_features: self.max_features,
            seed: self.seed,
        }
    }
}
