//! Server settings

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Directory holding the model, encoder and symptom list
    pub artifact_dir: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Prometheus exporter address; disabled when unset
    pub metrics_addr: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:50001".to_string(),
            artifact_dir: PathBuf::from("artifacts"),
            log_level: "info".to_string(),
            log_json: false,
            metrics_addr: None,
        }
    }
}

impl ServiceConfig {
    /// Load from `config/server.*` (optional) and `DISEASE_PREDICTOR_*` variables
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/server").required(false))
            .add_source(Environment::with_prefix("DISEASE_PREDICTOR").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
