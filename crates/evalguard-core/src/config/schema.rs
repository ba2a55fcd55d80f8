//! JSON Schema validation for rule-set documents.
//!
//! Documents are validated against `schema/ruleset.schema.json` before they
//! are deserialized, so unknown rule names and mistyped arguments are
//! reported with their location.

use std::sync::OnceLock;
use thiserror::Error;

const RULESET_SCHEMA_JSON: &str = include_str!("../../schema/ruleset.schema.json");

static VALIDATOR: OnceLock<Result<jsonschema::Validator, SchemaError>> = OnceLock::new();

/// The embedded schema itself could not be used.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Rule-set schema is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Failed to compile rule-set schema: {0}")]
    Compile(String),
}

fn compile() -> Result<jsonschema::Validator, SchemaError> {
    let schema: serde_json::Value = serde_json::from_str(RULESET_SCHEMA_JSON)?;
    jsonschema::options()
        .build(&schema)
        .map_err(|e| SchemaError::Compile(e.to_string()))
}

/// The compiled validator, built on first use.
fn validator() -> Result<&'static jsonschema::Validator, &'static SchemaError> {
    VALIDATOR.get_or_init(compile).as_ref()
}

/// Validate a rule-set document against the schema.
///
/// Returns every violation, each suffixed with its location in the document.
pub fn validate_ruleset_schema(document: &serde_json::Value) -> Result<(), Vec<String>> {
    let validator = validator().map_err(|e| vec![e.to_string()])?;

    let errors: Vec<String> = validator
        .iter_errors(document)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
