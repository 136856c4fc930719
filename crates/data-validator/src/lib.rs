//! Request Validation
//!
//! Validates submitted symptom values and coerces them into binary indicators.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{coerce_integer, validate_indicator, Coerced};
