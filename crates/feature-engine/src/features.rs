//! Feature Vector Assembly

use serde::{Deserialize, Serialize};

/// Dense feature vector in schema order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Raw feature values, one slot per schema symptom
    pub values: Vec<f64>,
}

impl FeatureVector {
    /// Create an all-zero vector with the given dimension
    pub fn zeros(dimension: usize) -> Self {
        Self {
            values: vec![0.0; dimension],
        }
    }

    /// Set a slot; out-of-range indices are ignored
    pub fn set(&mut self, index: usize, value: f64) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value;
        }
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the vector has no slots
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the values as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Number of non-zero slots
    pub fn active_count(&self) -> usize {
        self.values.iter().filter(|v| **v != 0.0).count()
    }
}
