//! Caller-defined predicates for `satisfies`.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{BoxError, ValidationError};
use crate::rules::RuleKind;
use crate::value::Truthy;

/// Description used when a predicate has none.
pub const DEFAULT_DESCRIPTION: &str = "predicate";

type PredicateFn = dyn Fn(&Value) -> Result<bool, BoxError> + Send + Sync;

/// A shareable one-argument predicate with an optional description.
///
/// The description only appears in failure messages.
#[derive(Clone)]
pub struct Predicate {
    func: Arc<PredicateFn>,
    description: Option<String>,
}

impl Predicate {
    /// Wrap an infallible predicate returning any truthy value.
    pub fn new<F, T>(func: F) -> Self
    where
        F: Fn(&Value) -> T + Send + Sync + 'static,
        T: Truthy,
    {
        Self {
            func: Arc::new(move |value| Ok(func(value).is_truthy())),
            description: None,
        }
    }

    /// Wrap a predicate that may fail. An error fails the rule and becomes
    /// the cause of the resulting [`ValidationError`].
    pub fn fallible<F, T, E>(func: F) -> Self
    where
        F: Fn(&Value) -> Result<T, E> + Send + Sync + 'static,
        T: Truthy,
        E: Into<BoxError>,
    {
        Self {
            func: Arc::new(move |value| {
                func(value)
                    .map(|outcome| outcome.is_truthy())
                    .map_err(Into::into)
            }),
            description: None,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION)
    }

    pub fn evaluate(&self, value: &Value) -> Result<(), ValidationError> {
        satisfies(value, self.description(), |v| (self.func)(v))
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("description", &self.description())
            .finish_non_exhaustive()
    }
}

/// Pass when `check` returns true for the value.
pub fn satisfies<F>(value: &Value, description: &str, check: F) -> Result<(), ValidationError>
where
    F: FnOnce(&Value) -> Result<bool, BoxError>,
{
    match check(value) {
        Ok(true) => Ok(()),
        Ok(false) => Err(ValidationError::new(
            format!("Expected value to satisfy: {}", description),
            value.clone(),
            RuleKind::Satisfies,
        )),
        Err(e) => Err(ValidationError::new(
            format!("Predicate '{}' returned an error: {}", description, e),
            value.clone(),
            RuleKind::Satisfies,
        )
        .with_source(e)),
    }
}
