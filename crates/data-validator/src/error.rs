//! Validation Error Types

use thiserror::Error;

/// Errors raised while validating a prediction request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Request body is not a JSON object
    #[error("Invalid input format. Must be a JSON object.")]
    InvalidFormat,

    /// Symptom value could not be read as an integer
    #[error("Invalid value for symptom '{symptom}'. Must be an integer.")]
    NotInteger { symptom: String },

    /// Symptom value is an integer other than 0 or 1
    #[error("Invalid value for symptom '{symptom}'. Must be 0 or 1.")]
    NotBinary { symptom: String },

    /// Assembled vector does not fit the loaded model
    #[error("Input has {actual} features, but the model expects {expected}.")]
    FeatureCountMismatch { actual: usize, expected: usize },
}
