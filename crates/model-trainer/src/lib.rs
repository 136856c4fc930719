//! Disease Model Trainer
//!
//! Offline job that fits the disease classifier on a symptom table and writes
//! the model, label encoder and ordered symptom list for the API server.

mod settings;
mod dataset;
mod pipeline;
mod split;

pub use settings::TrainerConfig;
pub use dataset::SymptomDataset;
pub use pipeline::{run, train, TrainedModel, TrainingReport};
pub use split::{train_test_split, Split};

use inference_engine::InferenceError;
use std::path::PathBuf;
use storage::StorageError;
use thiserror::Error;

/// Errors during training
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("Dataset file not found at {}. Please ensure the file exists.", .0.display())]
    DatasetNotFound(PathBuf),
    #[error("The dataset does not contain enough columns for features and target.")]
    NotEnoughColumns,
    #[error("Invalid value '{value}' in row {row}, column '{column}'")]
    InvalidCell {
        row: usize,
        column: String,
        value: String,
    },
    #[error("Not enough rows to train: {rows} rows leave an empty training set")]
    InsufficientRows { rows: usize },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Model error: {0}")]
    Model(#[from] InferenceError),
}
