//! Symptom Value Coercion

use crate::error::ValidationError;
use serde_json::{Number, Value};
use std::num::IntErrorKind;
use tracing::debug;

/// Integer read from a JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coerced {
    /// Value fits in an i64
    Int(i64),
    /// Value is integral but outside the i64 range
    OutOfRange,
}

/// Coerce a JSON value into an integer.
///
/// Integers pass through, booleans map to 0/1, finite floats truncate toward
/// zero and strings are trimmed then parsed as signed decimal integers,
/// allowing `_` between digits.
/// Returns `None` for everything else.
pub fn coerce_integer(value: &Value) -> Option<Coerced> {
    match value {
        Value::Bool(flag) => Some(Coerced::Int(i64::from(*flag))),
        Value::Number(number) => coerce_number(number),
        Value::String(text) => coerce_str(text),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn coerce_number(number: &Number) -> Option<Coerced> {
    if let Some(int) = number.as_i64() {
        return Some(Coerced::Int(int));
    }
    if number.is_u64() {
        return Some(Coerced::OutOfRange);
    }

    let float = number.as_f64()?;
    if !float.is_finite() {
        return None;
    }

    let truncated = float.trunc();
    if truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Some(Coerced::Int(truncated as i64))
    } else {
        Some(Coerced::OutOfRange)
    }
}

fn coerce_str(text: &str) -> Option<Coerced> {
    let digits = strip_digit_separators(text.trim())?;
    match digits.parse::<i64>() {
        Ok(int) => Some(Coerced::Int(int)),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Some(Coerced::OutOfRange),
            _ => None,
        },
    }
}

/// Drop single `_` separators between digits (`"1_0"` reads as `"10"`).
/// Returns `None` for a leading, trailing or doubled separator.
fn strip_digit_separators(text: &str) -> Option<String> {
    if !text.contains('_') {
        return Some(text.to_string());
    }

    let unsigned = text.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(text);
    let well_placed = unsigned
        .split('_')
        .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()));
    if !well_placed {
        return None;
    }

    Some(text.replace('_', ""))
}

/// Validate a submitted symptom value as a binary indicator
pub fn validate_indicator(symptom: &str, value: &Value) -> Result<u8, ValidationError> {
    match coerce_integer(value) {
        Some(Coerced::Int(0)) => Ok(0),
        Some(Coerced::Int(1)) => Ok(1),
        Some(other) => {
            debug!("Rejected non-binary value for {}: {:?}", symptom, other);
            Err(ValidationError::NotBinary {
                symptom: symptom.to_string(),
            })
        }
        None => {
            debug!("Rejected non-integer value for {}: {}", symptom, value);
            Err(ValidationError::NotInteger {
                symptom: symptom.to_string(),
            })
        }
    }
}
