//! Symptom Schema

use crate::features::FeatureVector;
use data_validator::{validate_indicator, ValidationError};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Ordered symptom names fixed at training time.
///
/// The position of a name is the column it occupied in the training matrix
/// and the slot it fills in every inference vector. When a name appears more
/// than once, the first occurrence owns the slot.
#[derive(Debug, Clone, Default)]
pub struct SymptomSchema {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl SymptomSchema {
    /// Build a schema and its name lookup table
    pub fn new(names: Vec<String>) -> Self {
        let mut index = HashMap::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            index.entry(name.clone()).or_insert(position);
        }

        Self { names, index }
    }

    /// Symptom names in schema order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the schema has no features
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Slot index of a symptom name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Assemble a feature vector from a JSON symptom map.
    ///
    /// Keys are visited in request order and the first invalid value aborts
    /// assembly. Keys that are not in the schema are skipped.
    pub fn assemble(&self, input: &Value) -> Result<FeatureVector, ValidationError> {
        let symptoms = input.as_object().ok_or(ValidationError::InvalidFormat)?;

        let mut vector = FeatureVector::zeros(self.len());
        let mut ignored = 0usize;

        for (name, value) in symptoms {
            match self.index_of(name) {
                Some(slot) => {
                    let flag = validate_indicator(name, value)?;
                    vector.set(slot, f64::from(flag));
                }
                None => ignored += 1,
            }
        }

        debug!(
            "Assembled feature vector: dimension={}, active={}, ignored_keys={}",
            vector.len(),
            vector.active_count(),
            ignored
        );

        Ok(vector)
    }
}

impl From<Vec<String>> for SymptomSchema {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}
