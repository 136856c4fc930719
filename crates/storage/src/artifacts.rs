//! Artifact Store Implementation

use crate::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default model file name
pub const MODEL_FILE: &str = "disease_model.json";
/// Default label encoder file name
pub const ENCODER_FILE: &str = "label_encoder.json";
/// Default symptom list file name
pub const SYMPTOMS_FILE: &str = "symptoms_list.txt";

/// Locations of the three artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Serialized classifier
    pub model: PathBuf,
    /// Serialized label encoder
    pub encoder: PathBuf,
    /// Ordered symptom names, one per line
    pub symptoms: PathBuf,
}

impl ArtifactPaths {
    /// Default file names inside one directory
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            model: dir.join(MODEL_FILE),
            encoder: dir.join(ENCODER_FILE),
            symptoms: dir.join(SYMPTOMS_FILE),
        }
    }
}

/// Reads and writes training artifacts
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    paths: ArtifactPaths,
}

impl ArtifactStore {
    /// Create a store over explicit paths
    pub fn new(paths: ArtifactPaths) -> Self {
        Self { paths }
    }

    /// Create a store using the default file names in a directory
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(ArtifactPaths::in_dir(dir))
    }

    /// Artifact locations
    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    /// Persist the classifier
    pub fn save_model<T: Serialize>(&self, model: &T) -> Result<(), StorageError> {
        write_json(&self.paths.model, model)
    }

    /// Load the classifier
    pub fn load_model<T: DeserializeOwned>(&self) -> Result<T, StorageError> {
        read_json(&self.paths.model)
    }

    /// Persist the label encoder
    pub fn save_encoder<T: Serialize>(&self, encoder: &T) -> Result<(), StorageError> {
        write_json(&self.paths.encoder, encoder)
    }

    /// Load the label encoder
    pub fn load_encoder<T: DeserializeOwned>(&self) -> Result<T, StorageError> {
        read_json(&self.paths.encoder)
    }

    /// Persist symptom names joined by newlines, order preserved
    pub fn save_symptoms(&self, names: &[String]) -> Result<(), StorageError> {
        let path = &self.paths.symptoms;
        ensure_parent(path)?;
        fs::write(path, names.join("\n")).map_err(|source| StorageError::Write {
            path: path.clone(),
            source,
        })?;

        info!("Saved {} symptoms to {}", names.len(), path.display());
        Ok(())
    }

    /// Load symptom names; lines are trimmed and blank lines dropped
    pub fn load_symptoms(&self) -> Result<Vec<String>, StorageError> {
        let path = &self.paths.symptoms;
        let text = fs::read_to_string(path).map_err(|source| StorageError::Read {
            path: path.clone(),
            source,
        })?;

        let names: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        info!("Loaded {} symptoms from {}", names.len(), path.display());
        Ok(names)
    }
}

fn ensure_parent(path: &Path) -> Result<(), StorageError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| StorageError::Write {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    ensure_parent(path)?;
    let bytes = serde_json::to_vec(value).map_err(|source| StorageError::SerializationError {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, &bytes).map_err(|source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let bytes = fs::read(path).map_err(|source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    serde_json::from_slice(&bytes).map_err(|source| StorageError::SerializationError {
        path: path.to_path_buf(),
        source,
    })
}
