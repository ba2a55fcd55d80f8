//! Fluent, fail-fast assertions over a single value.
//!
//! Every rule method consumes the expectation and hands it back on success,
//! so a chain joined with `?` stops at the first failing rule:
//!
//! ```rust
//! use evalguard::expect;
//!
//! # fn main() -> Result<(), evalguard::ValidationError> {
//! let sql = expect("SELECT id FROM users WHERE active = true")
//!     .contains("SELECT")?
//!     .not_contains("DROP")?
//!     .max_length(100)?
//!     .into_value();
//! # assert_eq!(sql, "SELECT id FROM users WHERE active = true");
//! # Ok(())
//! # }
//! ```

use serde_json::Value;

use crate::config::RuleSet;
use crate::error::{BoxError, ValidationError};
use crate::rules::predicate::{self, DEFAULT_DESCRIPTION};
use crate::rules::{shape, text, Pattern, Predicate, Rule};
use crate::value::{Truthy, ValueKind};

/// Start a fluent validation of `value`.
pub fn expect(value: impl Into<Value>) -> Expectation {
    Expectation::new(value)
}

/// A value awaiting validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Expectation {
    value: Value,
}

impl Expectation {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The wrapped value, unchanged.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn contains(self, needle: impl AsRef<str>) -> Result<Self, ValidationError> {
        text::contains(&self.value, needle.as_ref())?;
        Ok(self)
    }

    pub fn not_contains(self, needle: impl AsRef<str>) -> Result<Self, ValidationError> {
        text::not_contains(&self.value, needle.as_ref())?;
        Ok(self)
    }

    /// Accepts regex source text or a precompiled `regex::Regex`.
    pub fn matches(self, pattern: impl Into<Pattern>) -> Result<Self, ValidationError> {
        text::matches(&self.value, &pattern.into())?;
        Ok(self)
    }

    pub fn not_matches(self, pattern: impl Into<Pattern>) -> Result<Self, ValidationError> {
        text::not_matches(&self.value, &pattern.into())?;
        Ok(self)
    }

    pub fn valid_json(self) -> Result<Self, ValidationError> {
        shape::valid_json(&self.value)?;
        Ok(self)
    }

    pub fn max_length(self, max: usize) -> Result<Self, ValidationError> {
        shape::max_length(&self.value, max)?;
        Ok(self)
    }

    pub fn min_length(self, min: usize) -> Result<Self, ValidationError> {
        shape::min_length(&self.value, min)?;
        Ok(self)
    }

    pub fn not_empty(self) -> Result<Self, ValidationError> {
        shape::not_empty(&self.value)?;
        Ok(self)
    }

    pub fn equals(self, expected: impl Into<Value>) -> Result<Self, ValidationError> {
        shape::equals(&self.value, &expected.into())?;
        Ok(self)
    }

    pub fn is_type(self, kind: ValueKind) -> Result<Self, ValidationError> {
        shape::is_type(&self.value, kind)?;
        Ok(self)
    }

    /// Pass when `check` returns a truthy result for the wrapped value.
    ///
    /// The closure may borrow from the caller; use
    /// [`satisfies_predicate`](Self::satisfies_predicate) for a described or
    /// fallible predicate.
    pub fn satisfies<F, T>(self, check: F) -> Result<Self, ValidationError>
    where
        F: FnOnce(&Value) -> T,
        T: Truthy,
    {
        predicate::satisfies(&self.value, DEFAULT_DESCRIPTION, |v| {
            Ok::<_, BoxError>(check(v).is_truthy())
        })?;
        Ok(self)
    }

    pub fn satisfies_predicate(self, predicate: &Predicate) -> Result<Self, ValidationError> {
        predicate.evaluate(&self.value)?;
        Ok(self)
    }

    /// Evaluate an arbitrary catalog rule.
    pub fn check(self, rule: &Rule) -> Result<Self, ValidationError> {
        rule.evaluate(&self.value)?;
        Ok(self)
    }

    /// Evaluate a whole rule set, stopping at its first failure.
    pub fn conforms_to(self, rules: &RuleSet) -> Result<Self, ValidationError> {
        rules.evaluate(&self.value)?;
        Ok(self)
    }
}
