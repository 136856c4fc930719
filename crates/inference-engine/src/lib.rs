//! Disease Inference Engine
//!
//! Runs a validated symptom vector through a trained classifier and decodes
//! the winning class into a disease name with a confidence score.

mod classifier;
mod encoder;
mod engine;
mod forest;

pub use classifier::{Classifier, LabelDecoder};
pub use encoder::LabelEncoder;
pub use engine::{Diagnosis, InferenceEngine, InferenceResult};
pub use forest::{ForestParams, RandomForest};

use data_validator::ValidationError;
use thiserror::Error;

/// Errors during training or inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Training failed: {0}")]
    TrainingFailed(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },
    #[error("Class index {index} is out of range for {classes} known classes")]
    UnknownClass { index: usize, classes: usize },
    #[error("Classifier returned no class probabilities")]
    EmptyProbabilities,
}

/// Errors from the prediction path
#[derive(Debug, Error)]
pub enum PredictError {
    /// Request was malformed or does not fit the model
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Classifier or decoder failed
    #[error(transparent)]
    Inference(#[from] InferenceError),
}
