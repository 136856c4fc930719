//! Storage Layer
//!
//! Persists the three training artifacts: model blob, label encoder blob and
//! the newline-separated symptom list.

mod artifacts;

pub use artifacts::{ArtifactPaths, ArtifactStore, ENCODER_FILE, MODEL_FILE, SYMPTOMS_FILE};

use std::path::PathBuf;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Serialization error in {}: {source}", .path.display())]
    SerializationError {
        path: PathBuf,
        source: serde_json::Error,
    },
}
