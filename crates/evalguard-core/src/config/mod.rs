//! Rule configuration.
//!
//! A [`RuleSet`] is built in code or loaded from a YAML/JSON document.
//! Documents are validated against an embedded JSON Schema, then checked for
//! bad patterns and contradictory bounds.

mod parser;
mod ruleset;
mod schema;

pub use parser::ConfigError;
pub use ruleset::{OneOrMany, RuleSet};
pub use schema::{validate_ruleset_schema, SchemaError};
