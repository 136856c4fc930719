//! Classifier Capabilities

use crate::InferenceError;

/// Trained model that scores a fixed-length feature vector
pub trait Classifier: Send + Sync {
    /// Number of features the model was trained on
    fn n_features(&self) -> usize;

    /// Number of classes the model can emit
    fn n_classes(&self) -> usize;

    /// Predict the most likely class index
    fn predict(&self, features: &[f64]) -> Result<usize, InferenceError>;

    /// Probability for every class, indexed by class
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError>;
}

/// Maps class indices back to human-readable labels
pub trait LabelDecoder: Send + Sync {
    /// Number of known classes
    fn n_classes(&self) -> usize;

    /// Label for a class index
    fn decode(&self, class_index: usize) -> Result<&str, InferenceError>;
}
