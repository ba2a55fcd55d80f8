//! Rule-set parsing from YAML/JSON.

use std::fs;
use std::path::Path;

use thiserror::Error;

use super::ruleset::RuleSet;
use super::schema::validate_ruleset_schema;
use crate::rules::{Pattern, RuleKind};

/// Errors that can occur when loading rule sets.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read rule set file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Rule set does not match schema: {}", .0.join("; "))]
    SchemaError(Vec<String>),

    #[error("Invalid {rule} pattern '{pattern}': {source}")]
    InvalidPattern {
        rule: RuleKind,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Rule set validation failed: {0}")]
    ValidationError(String),
}

impl RuleSet {
    /// Parse a rule set from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let document: serde_json::Value = serde_yaml::from_str(yaml)?;
        Self::from_document(document)
    }

    /// Parse a rule set from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let document: serde_json::Value = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Parse a rule set from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a rule set from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    fn from_document(document: serde_json::Value) -> Result<Self, ConfigError> {
        validate_ruleset_schema(&document).map_err(ConfigError::SchemaError)?;

        let mut rules: RuleSet = serde_json::from_value(document)?;
        rules.validate()?;
        rules.compile_patterns()?;

        tracing::debug!(rules = rules.rules().len(), "Loaded rule set");
        Ok(rules)
    }

    /// Check the configured rules for contradictions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(ConfigError::ValidationError(format!(
                    "min_length {} exceeds max_length {}",
                    min, max
                )));
            }
        }

        Ok(())
    }

    /// Compile every pattern up front so a bad one is reported at load time.
    pub fn compile_patterns(&mut self) -> Result<(), ConfigError> {
        compile_all(&mut self.matches, RuleKind::Matches)?;
        compile_all(&mut self.not_matches, RuleKind::NotMatches)?;
        Ok(())
    }
}

fn compile_all(patterns: &mut Vec<Pattern>, rule: RuleKind) -> Result<(), ConfigError> {
    let compiled = std::mem::take(patterns)
        .into_iter()
        .map(|pattern| {
            let source = pattern.as_str().to_string();
            pattern
                .compiled()
                .map_err(|source_err| ConfigError::InvalidPattern {
                    rule,
                    pattern: source,
                    source: source_err,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    *patterns = compiled;
    Ok(())
}
