//! Declarative checks on a function's return value.
//!
//! A [`Checker`] pairs a [`RuleSet`] with an optional fallback handler.
//! [`Checker::wrap`] attaches it to a function without touching the
//! function's body:
//!
//! ```rust
//! use evalguard::{check, RuleSet};
//!
//! let sql_agent = check(RuleSet::new().contains("SELECT").not_contains(["DROP", "DELETE"]))
//!     .wrap(|table: &str| format!("SELECT * FROM {}", table));
//!
//! assert_eq!(sql_agent.call("users").unwrap(), "SELECT * FROM users");
//! ```
//!
//! Functions taking several arguments receive them as a tuple.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::config::{ConfigError, RuleSet};
use crate::error::ValidationError;

type Fallback<R> = Arc<dyn Fn(ValidationError) -> R + Send + Sync>;

/// Build a checker for `rules`.
pub fn check<R>(rules: RuleSet) -> Checker<R> {
    Checker::new(rules)
}

/// Build a checker for `rules`, rejecting invalid patterns and bounds up front.
pub fn try_check<R>(rules: RuleSet) -> Result<Checker<R>, ConfigError> {
    Checker::try_new(rules)
}

/// A rule set plus what to do when a result fails it.
pub struct Checker<R> {
    rules: RuleSet,
    on_fail: Option<Fallback<R>>,
}

impl<R> Checker<R> {
    /// Patterns are compiled once here. One that does not compile fails every
    /// call instead, see [`Checker::try_new`].
    pub fn new(mut rules: RuleSet) -> Self {
        rules.precompile();
        Self {
            rules,
            on_fail: None,
        }
    }

    pub fn try_new(mut rules: RuleSet) -> Result<Self, ConfigError> {
        rules.validate()?;
        rules.compile_patterns()?;
        Ok(Self::new(rules))
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Replace failing results with `handler(error)` instead of returning the error.
    pub fn on_fail<H>(mut self, handler: H) -> Self
    where
        H: Fn(ValidationError) -> R + Send + Sync + 'static,
    {
        self.on_fail = Some(Arc::new(handler));
        self
    }

    /// Evaluate the rule set against a value, ignoring any fallback.
    pub fn evaluate(&self, value: &Value) -> Result<(), ValidationError> {
        self.rules.evaluate(value)
    }

    /// Validate a produced result.
    ///
    /// Returns the result unchanged when every rule passes. On failure, the
    /// fallback's replacement if one is installed, otherwise the error.
    pub fn validate(&self, result: R) -> Result<R, ValidationError>
    where
        R: Clone + Into<Value>,
    {
        let value: Value = result.clone().into();
        match self.rules.evaluate(&value) {
            Ok(()) => Ok(result),
            Err(err) => match &self.on_fail {
                Some(handler) => {
                    tracing::warn!(
                        rule = %err.rule,
                        message = %err.message,
                        "Validation failed, using fallback result"
                    );
                    Ok(handler(err))
                }
                None => Err(err),
            },
        }
    }

    /// Call `func` and validate what it returns.
    pub fn invoke<F>(&self, func: F) -> Result<R, ValidationError>
    where
        F: FnOnce() -> R,
        R: Clone + Into<Value>,
    {
        self.validate(func())
    }

    /// Attach the checker to `func`.
    pub fn wrap<F>(self, func: F) -> Checked<F, R> {
        Checked {
            func,
            checker: self,
        }
    }
}

impl<R> Clone for Checker<R> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
            on_fail: self.on_fail.clone(),
        }
    }
}

impl<R> fmt::Debug for Checker<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checker")
            .field("rules", &self.rules)
            .field("on_fail", &self.on_fail.is_some())
            .finish()
    }
}

/// A function whose return value is validated on every call.
pub struct Checked<F, R> {
    func: F,
    checker: Checker<R>,
}

impl<F, R> Checked<F, R> {
    /// Call the wrapped function with `args`, then validate its result.
    pub fn call<A>(&self, args: A) -> Result<R, ValidationError>
    where
        F: Fn(A) -> R,
        R: Clone + Into<Value>,
    {
        self.checker.validate((self.func)(args))
    }

    pub fn checker(&self) -> &Checker<R> {
        &self.checker
    }

    /// The unwrapped function.
    pub fn into_inner(self) -> F {
        self.func
    }
}

impl<F: Clone, R> Clone for Checked<F, R> {
    fn clone(&self) -> Self {
        Self {
            func: self.func.clone(),
            checker: self.checker.clone(),
        }
    }
}

impl<F, R> fmt::Debug for Checked<F, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checked")
            .field("checker", &self.checker)
            .finish_non_exhaustive()
    }
}
