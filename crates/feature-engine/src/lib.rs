//! Feature Engineering Engine
//!
//! Turns a submitted symptom map into the dense, schema-ordered feature
//! vector the classifier was trained on.

mod features;
mod schema;

pub use features::FeatureVector;
pub use schema::SymptomSchema;
