//! The single failure type shared by every rule.

use serde_json::Value;
use thiserror::Error;

use crate::rules::RuleKind;

/// Boxed error carried as the cause of a rule failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Raised when a value fails a rule.
///
/// `rule` names the failing rule, `value` is the value it was evaluated
/// against. When the failure was caused by another error (an invalid regex,
/// a JSON parse error, a predicate error) it is available through
/// [`std::error::Error::source`].
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ValidationError {
    /// Human-readable description of the failure
    pub message: String,

    /// The value that failed validation
    pub value: Value,

    /// The rule that was violated
    pub rule: RuleKind,

    #[source]
    source: Option<BoxError>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>, value: Value, rule: RuleKind) -> Self {
        Self {
            message: message.into(),
            value,
            rule,
            source: None,
        }
    }

    /// Attach the error that caused this failure.
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }
}
