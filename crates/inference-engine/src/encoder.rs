//! Label Encoding

use crate::classifier::LabelDecoder;
use crate::InferenceError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Bidirectional mapping between disease labels and class indices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    /// Labels indexed by class
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Fit on raw labels; classes are the sorted unique labels
    pub fn fit<S: AsRef<str>>(labels: &[S]) -> Self {
        let unique: BTreeSet<&str> = labels.iter().map(AsRef::as_ref).collect();
        Self {
            classes: unique.into_iter().map(str::to_string).collect(),
        }
    }

    /// Fit on raw labels and encode them in one pass
    pub fn fit_transform<S: AsRef<str>>(labels: &[S]) -> (Self, Vec<usize>) {
        let encoder = Self::fit(labels);
        let encoded = labels
            .iter()
            .filter_map(|label| encoder.transform(label.as_ref()))
            .collect();
        (encoder, encoded)
    }

    /// Use an explicit class ordering
    pub fn from_classes(classes: Vec<String>) -> Self {
        Self { classes }
    }

    /// Class index of a label
    pub fn transform(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|class| class == label)
    }

    /// Labels in class order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

impl LabelDecoder for LabelEncoder {
    fn n_classes(&self) -> usize {
        self.classes.len()
    }

    fn decode(&self, class_index: usize) -> Result<&str, InferenceError> {
        self.classes
            .get(class_index)
            .map(String::as_str)
            .ok_or(InferenceError::UnknownClass {
                index: class_index,
                classes: self.classes.len(),
            })
    }
}
