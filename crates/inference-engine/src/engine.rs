//! Inference Engine Implementation

use crate::classifier::{Classifier, LabelDecoder};
use crate::{InferenceError, PredictError};
use data_validator::ValidationError;
use feature_engine::{FeatureVector, SymptomSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Decoded prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    /// Predicted disease name
    pub disease: String,
    /// Highest class probability as a percentage (0 to 100)
    pub confidence: f64,
}

impl Diagnosis {
    /// Human-readable summary of the prediction
    pub fn message(&self) -> String {
        format!(
            "The predicted disease is '{}' with a confidence of {:.2}%.",
            self.disease, self.confidence
        )
    }
}

/// Result of one prediction request
#[derive(Debug, Clone)]
pub struct InferenceResult {
    /// The decoded prediction
    pub diagnosis: Diagnosis,
    /// Feature vector the classifier saw
    pub features: FeatureVector,
    /// Time spent assembling and scoring
    pub latency: Duration,
}

/// Prediction path over a loaded schema, classifier and label decoder.
///
/// All three parts are immutable once the engine is built, so a single
/// engine can serve concurrent requests without locking.
pub struct InferenceEngine {
    schema: SymptomSchema,
    classifier: Box<dyn Classifier>,
    decoder: Box<dyn LabelDecoder>,
}

impl InferenceEngine {
    /// Create an engine from loaded artifacts
    pub fn new(
        schema: SymptomSchema,
        classifier: Box<dyn Classifier>,
        decoder: Box<dyn LabelDecoder>,
    ) -> Self {
        info!(
            "Creating inference engine: symptoms={}, model_features={}, classes={}",
            schema.len(),
            classifier.n_features(),
            decoder.n_classes()
        );

        // Artifacts come from separate files; a mismatch is only reported here.
        if schema.len() != classifier.n_features() {
            warn!(
                "Symptom list has {} entries but the model expects {} features",
                schema.len(),
                classifier.n_features()
            );
        }
        if decoder.n_classes() != classifier.n_classes() {
            warn!(
                "Label decoder knows {} classes but the model emits {}",
                decoder.n_classes(),
                classifier.n_classes()
            );
        }

        Self {
            schema,
            classifier,
            decoder,
        }
    }

    /// Symptom schema served to clients
    pub fn schema(&self) -> &SymptomSchema {
        &self.schema
    }

    /// Symptom names in schema order
    pub fn symptoms(&self) -> &[String] {
        self.schema.names()
    }

    /// Number of classes the decoder can name
    pub fn class_count(&self) -> usize {
        self.decoder.n_classes()
    }

    /// Validate a JSON symptom map and predict a disease for it
    pub fn predict(&self, input: &Value) -> Result<InferenceResult, PredictError> {
        let start = Instant::now();

        let features = self.schema.assemble(input)?;
        let diagnosis = self.predict_vector(&features)?;

        let latency = start.elapsed();
        debug!(
            "Predicted {} ({:.2}%) in {:?}",
            diagnosis.disease, diagnosis.confidence, latency
        );

        Ok(InferenceResult {
            diagnosis,
            features,
            latency,
        })
    }

    /// Predict a disease for an already assembled feature vector
    pub fn predict_vector(&self, features: &FeatureVector) -> Result<Diagnosis, PredictError> {
        let expected = self.classifier.n_features();
        if features.len() != expected {
            return Err(ValidationError::FeatureCountMismatch {
                actual: features.len(),
                expected,
            }
            .into());
        }

        let class_index = self.classifier.predict(features.as_slice())?;
        let disease = self.decoder.decode(class_index)?.to_string();

        let probabilities = self.classifier.predict_proba(features.as_slice())?;
        let top = probabilities
            .iter()
            .copied()
            .fold(None, |best: Option<f64>, p| Some(best.map_or(p, |b| b.max(p))))
            .ok_or(InferenceError::EmptyProbabilities)?;

        Ok(Diagnosis {
            disease,
            confidence: top * 100.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LabelEncoder;
    use serde_json::json;

    /// Always picks one class with fixed probabilities
    struct FixedClassifier {
        n_features: usize,
        class: usize,
        probabilities: Vec<f64>,
    }

    impl Classifier for FixedClassifier {
        fn n_features(&self) -> usize {
            self.n_features
        }

        fn n_classes(&self) -> usize {
            self.probabilities.len()
        }

        fn predict(&self, _features: &[f64]) -> Result<usize, InferenceError> {
            Ok(self.class)
        }

        fn predict_proba(&self, _features: &[f64]) -> Result<Vec<f64>, InferenceError> {
            Ok(self.probabilities.clone())
        }
    }

    fn engine_with(n_features: usize, class: usize) -> InferenceEngine {
        InferenceEngine::new(
            SymptomSchema::new(vec!["fever".to_string(), "cough".to_string()]),
            Box::new(FixedClassifier {
                n_features,
                class,
                probabilities: vec![0.9, 0.1],
            }),
            Box::new(LabelEncoder::from_classes(vec![
                "flu".to_string(),
                "cold".to_string(),
            ])),
        )
    }

    #[test]
    fn test_flu_scenario() {
        let engine = engine_with(2, 0);
        let result = engine.predict(&json!({"fever": 1, "cough": 0})).unwrap();

        assert_eq!(result.features.as_slice(), &[1.0, 0.0]);
        assert_eq!(result.diagnosis.disease, "flu");
        assert_eq!(result.diagnosis.confidence, 90.0);
        assert_eq!(
            result.diagnosis.message(),
            "The predicted disease is 'flu' with a confidence of 90.00%."
        );
    }

    #[test]
    fn test_unknown_keys_still_predict() {
        let engine = engine_with(2, 0);
        let result = engine.predict(&json!({"unknown_symptom_xyz": 1})).unwrap();
        assert_eq!(result.features.as_slice(), &[0.0, 0.0]);
        assert_eq!(result.diagnosis.disease, "flu");
    }

    #[test]
    fn test_validation_errors_surface() {
        let engine = engine_with(2, 0);
        assert!(matches!(
            engine.predict(&json!(["fever"])),
            Err(PredictError::Validation(ValidationError::InvalidFormat))
        ));
        assert!(matches!(
            engine.predict(&json!({"fever": 2})),
            Err(PredictError::Validation(ValidationError::NotBinary { .. }))
        ));
    }

    #[test]
    fn test_feature_count_mismatch() {
        let engine = engine_with(3, 0);
        let err = engine.predict(&json!({"fever": 1})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Input has 2 features, but the model expects 3."
        );
        assert!(matches!(err, PredictError::Validation(_)));
    }

    #[test]
    fn test_undecodable_class_is_inference_error() {
        let engine = engine_with(2, 7);
        assert!(matches!(
            engine.predict(&json!({"fever": 1})),
            Err(PredictError::Inference(InferenceError::UnknownClass { index: 7, .. }))
        ));
    }

    #[test]
    fn test_confidence_bounds() {
        let engine = engine_with(2, 1);
        let diagnosis = engine
            .predict_vector(&FeatureVector::zeros(2))
            .unwrap();
        assert_eq!(diagnosis.disease, "cold");
        assert!((0.0..=100.0).contains(&diagnosis.confidence));
        assert_eq!(diagnosis.confidence, 100.0 * 0.9);
    }
}
