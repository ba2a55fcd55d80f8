//! Substring and regex rules.
//!
//! These operate on the text form of the value (see [`as_text`]), so a
//! non-string value is converted before searching rather than rejected.

use serde_json::Value;

use crate::error::ValidationError;
use crate::rules::{Pattern, RuleKind};
use crate::value::as_text;

/// Pass when `needle` occurs in the value's text.
pub fn contains(value: &Value, needle: &str) -> Result<(), ValidationError> {
    if as_text(value).contains(needle) {
        return Ok(());
    }
    Err(ValidationError::new(
        format!("Expected value to contain '{}'", needle),
        value.clone(),
        RuleKind::Contains,
    ))
}

/// Pass when `needle` does not occur in the value's text.
pub fn not_contains(value: &Value, needle: &str) -> Result<(), ValidationError> {
    if !as_text(value).contains(needle) {
        return Ok(());
    }
    Err(ValidationError::new(
        format!("Expected value to not contain '{}'", needle),
        value.clone(),
        RuleKind::NotContains,
    ))
}

/// Pass when `pattern` matches anywhere in the value's text.
pub fn matches(value: &Value, pattern: &Pattern) -> Result<(), ValidationError> {
    if search(value, pattern, RuleKind::Matches)? {
        return Ok(());
    }
    Err(ValidationError::new(
        format!("Expected value to match pattern '{}'", pattern),
        value.clone(),
        RuleKind::Matches,
    ))
}

/// Pass when `pattern` matches nowhere in the value's text.
pub fn not_matches(value: &Value, pattern: &Pattern) -> Result<(), ValidationError> {
    if !search(value, pattern, RuleKind::NotMatches)? {
        return Ok(());
    }
    Err(ValidationError::new(
        format!("Expected value to not match pattern '{}'", pattern),
        value.clone(),
        RuleKind::NotMatches,
    ))
}

/// Search the value's text, reporting an uncompilable pattern as a failure of `rule`.
fn search(value: &Value, pattern: &Pattern, rule: RuleKind) -> Result<bool, ValidationError> {
    let regex = pattern.regex().map_err(|e| {
        ValidationError::new(
            format!("Invalid regex pattern '{}': {}", pattern, e),
            value.clone(),
            rule,
        )
        .with_source(e)
    })?;
    Ok(regex.is_match(&as_text(value)))
}
