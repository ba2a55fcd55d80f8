//! # evalguard
//!
//! Validation for the outputs of AI agents.
//!
//! Two surfaces share one catalog of rules:
//!
//! - [`expect`] wraps a value for fluent, fail-fast assertions
//! - [`check`] attaches a [`RuleSet`] to a function and validates every
//!   result it returns, optionally substituting a fallback on failure
//!
//! ## Key Guarantees
//!
//! 1. **Pure**: rules never mutate the value under test
//! 2. **One failure type**: every rule fails with a [`ValidationError`]
//!    naming the rule, the value and what was expected
//! 3. **Thread-safe**: no shared mutable state; checkers are `Send + Sync`
//!
//! ## Example
//!
//! ```rust
//! use evalguard::{check, expect, RuleSet, ValidationError};
//!
//! # fn main() -> Result<(), ValidationError> {
//! expect("SELECT * FROM users")
//!     .contains("SELECT")?
//!     .not_contains("DROP")?;
//!
//! let agent = check(RuleSet::new().contains("SELECT"))
//!     .on_fail(|_| "SELECT 1".to_string())
//!     .wrap(|prompt: &str| format!("-- {}", prompt));
//!
//! assert_eq!(agent.call("list users")?, "SELECT 1");
//! # Ok(())
//! # }
//! ```

pub mod checker;
pub mod config;
pub mod error;
pub mod expectation;
pub mod rules;
pub mod value;

// Re-export main types at crate root
pub use checker::{check, try_check, Checked, Checker};
pub use config::{ConfigError, RuleSet};
pub use error::ValidationError;
pub use expectation::{expect, Expectation};
pub use rules::{catalog, Pattern, Predicate, Rule, RuleInfo, RuleKind};
pub use value::{Truthy, ValueKind};

pub use serde_json::{json, Value};
