//! Structural rules: JSON validity, length, emptiness, equality and type.

use serde_json::Value;

use crate::error::ValidationError;
use crate::rules::RuleKind;
use crate::value::{as_text, length, Truthy, ValueKind};

/// Pass when the value's text parses as JSON.
pub fn valid_json(value: &Value) -> Result<(), ValidationError> {
    match serde_json::from_str::<Value>(&as_text(value)) {
        Ok(_) => Ok(()),
        Err(e) => Err(ValidationError::new(
            format!("Expected value to be valid JSON: {}", e),
            value.clone(),
            RuleKind::ValidJson,
        )
        .with_source(e)),
    }
}

/// Pass when the value's length is at most `max`.
pub fn max_length(value: &Value, max: usize) -> Result<(), ValidationError> {
    let len = length(value);
    if len <= max {
        return Ok(());
    }
    Err(ValidationError::new(
        format!("Expected length <= {}, got {}", max, len),
        value.clone(),
        RuleKind::MaxLength,
    ))
}

/// Pass when the value's length is at least `min`.
pub fn min_length(value: &Value, min: usize) -> Result<(), ValidationError> {
    let len = length(value);
    if len >= min {
        return Ok(());
    }
    Err(ValidationError::new(
        format!("Expected length >= {}, got {}", min, len),
        value.clone(),
        RuleKind::MinLength,
    ))
}

/// Pass when the value has content.
///
/// Null always fails. Strings fail when blank after trimming, arrays and
/// objects when they have no entries, and other values when falsy.
pub fn not_empty(value: &Value) -> Result<(), ValidationError> {
    let detail = match value {
        Value::Null => Some(", got null"),
        Value::String(s) if s.trim().is_empty() => Some(""),
        Value::Array(items) if items.is_empty() => Some(", got empty array"),
        Value::Object(map) if map.is_empty() => Some(", got empty object"),
        Value::Bool(_) | Value::Number(_) if !value.is_truthy() => Some(""),
        _ => None,
    };

    match detail {
        None => Ok(()),
        Some(detail) => Err(ValidationError::new(
            format!("Expected value to not be empty{}", detail),
            value.clone(),
            RuleKind::NotEmpty,
        )),
    }
}

/// Pass when the value equals `expected`.
pub fn equals(value: &Value, expected: &Value) -> Result<(), ValidationError> {
    if value == expected {
        return Ok(());
    }
    Err(ValidationError::new(
        format!("Expected value to equal {}, got {}", expected, value),
        value.clone(),
        RuleKind::Equals,
    ))
}

/// Pass when `kind` accepts the value.
pub fn is_type(value: &Value, kind: ValueKind) -> Result<(), ValidationError> {
    if kind.accepts(value) {
        return Ok(());
    }
    Err(ValidationError::new(
        format!(
            "Expected value to be of type {}, got {}",
            kind,
            ValueKind::of(value)
        ),
        value.clone(),
        RuleKind::IsType,
    ))
}
