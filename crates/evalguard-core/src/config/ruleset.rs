//! The rule configuration record.

use serde::de::Deserializer;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ValidationError;
use crate::rules::{Pattern, Predicate, Rule, RuleKind};
use crate::value::{Truthy, ValueKind};

/// A fixed set of rules evaluated together.
///
/// Each field is one catalog rule; an empty list, `false` or `None` means the
/// rule is not configured. [`RuleSet::evaluate`] runs configured rules in
/// catalog order (list entries in the order given) and stops at the first
/// failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSet {
    /// Substrings that must be present
    #[serde(default, deserialize_with = "one_or_many")]
    pub contains: Vec<String>,

    /// Substrings that must be absent
    #[serde(default, deserialize_with = "one_or_many")]
    pub not_contains: Vec<String>,

    /// Patterns that must match
    #[serde(default, deserialize_with = "one_or_many")]
    pub matches: Vec<Pattern>,

    /// Patterns that must not match
    #[serde(default, deserialize_with = "one_or_many")]
    pub not_matches: Vec<Pattern>,

    #[serde(default)]
    pub valid_json: bool,

    #[serde(default)]
    pub max_length: Option<usize>,

    #[serde(default)]
    pub min_length: Option<usize>,

    #[serde(default)]
    pub not_empty: bool,

    /// Present even when the expected value is `null`
    #[serde(default, deserialize_with = "some_value")]
    pub equals: Option<Value>,

    #[serde(default)]
    pub is_type: Option<ValueKind>,

    /// Code-only; documents cannot carry predicates
    #[serde(skip)]
    pub satisfies: Option<Predicate>,
}

/// Arguments accepted where either one item or a list is allowed.
pub trait OneOrMany<T> {
    fn into_list(self) -> Vec<T>;
}

impl OneOrMany<String> for &str {
    fn into_list(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl OneOrMany<String> for String {
    fn into_list(self) -> Vec<String> {
        vec![self]
    }
}

impl OneOrMany<Pattern> for &str {
    fn into_list(self) -> Vec<Pattern> {
        vec![self.into()]
    }
}

impl OneOrMany<Pattern> for String {
    fn into_list(self) -> Vec<Pattern> {
        vec![self.into()]
    }
}

impl OneOrMany<Pattern> for regex::Regex {
    fn into_list(self) -> Vec<Pattern> {
        vec![self.into()]
    }
}

impl OneOrMany<Pattern> for &regex::Regex {
    fn into_list(self) -> Vec<Pattern> {
        vec![self.into()]
    }
}

impl<T, U: Into<T>> OneOrMany<T> for Vec<U> {
    fn into_list(self) -> Vec<T> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T, U: Into<T>, const N: usize> OneOrMany<T> for [U; N] {
    fn into_list(self) -> Vec<T> {
        self.into_iter().map(Into::into).collect()
    }
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Either<T> {
        One(T),
        Many(Vec<T>),
    }

    Ok(match Either::deserialize(deserializer)? {
        Either::One(item) => vec![item],
        Either::Many(items) => items,
    })
}

fn some_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(mut self, needles: impl OneOrMany<String>) -> Self {
        self.contains.extend(needles.into_list());
        self
    }

    pub fn not_contains(mut self, needles: impl OneOrMany<String>) -> Self {
        self.not_contains.extend(needles.into_list());
        self
    }

    pub fn matches(mut self, patterns: impl OneOrMany<Pattern>) -> Self {
        self.matches.extend(patterns.into_list());
        self
    }

    pub fn not_matches(mut self, patterns: impl OneOrMany<Pattern>) -> Self {
        self.not_matches.extend(patterns.into_list());
        self
    }

    pub fn valid_json(mut self) -> Self {
        self.valid_json = true;
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn not_empty(mut self) -> Self {
        self.not_empty = true;
        self
    }

    pub fn equals(mut self, expected: impl Into<Value>) -> Self {
        self.equals = Some(expected.into());
        self
    }

    pub fn is_type(mut self, kind: ValueKind) -> Self {
        self.is_type = Some(kind);
        self
    }

    /// Require `check` to return a truthy result.
    pub fn satisfies<F, T>(self, check: F) -> Self
    where
        F: Fn(&Value) -> T + Send + Sync + 'static,
        T: Truthy,
    {
        self.satisfies_predicate(Predicate::new(check))
    }

    pub fn satisfies_predicate(mut self, predicate: Predicate) -> Self {
        self.satisfies = Some(predicate);
        self
    }

    /// Compile source patterns in place.
    ///
    /// Invalid patterns are left as source text and still fail when evaluated;
    /// use [`RuleSet::compile_patterns`] to reject them instead.
    pub fn precompile(&mut self) {
        for pattern in self.matches.iter_mut().chain(self.not_matches.iter_mut()) {
            if let Pattern::Source(source) = pattern {
                if let Ok(regex) = regex::Regex::new(source) {
                    *pattern = Pattern::Compiled(regex);
                }
            }
        }
    }

    /// Configured rules in evaluation order.
    pub fn rules(&self) -> Vec<Rule> {
        let mut rules = Vec::new();
        rules.extend(self.contains.iter().cloned().map(Rule::Contains));
        rules.extend(self.not_contains.iter().cloned().map(Rule::NotContains));
        rules.extend(self.matches.iter().cloned().map(Rule::Matches));
        rules.extend(self.not_matches.iter().cloned().map(Rule::NotMatches));
        if self.valid_json {
            rules.push(Rule::ValidJson);
        }
        rules.extend(self.max_length.map(Rule::MaxLength));
        rules.extend(self.min_length.map(Rule::MinLength));
        if self.not_empty {
            rules.push(Rule::NotEmpty);
        }
        rules.extend(self.equals.clone().map(Rule::Equals));
        rules.extend(self.is_type.map(Rule::IsType));
        rules.extend(self.satisfies.clone().map(Rule::Satisfies));
        rules
    }

    /// Kinds of the configured rules, without repeats, in evaluation order.
    pub fn kinds(&self) -> Vec<RuleKind> {
        let mut kinds: Vec<RuleKind> = self.rules().iter().map(Rule::kind).collect();
        kinds.dedup();
        kinds
    }

    pub fn is_empty(&self) -> bool {
        self.rules().is_empty()
    }

    /// Evaluate every configured rule against `value`, stopping at the first failure.
    pub fn evaluate(&self, value: &Value) -> Result<(), ValidationError> {
        for rule in self.rules() {
            if let Err(err) = rule.evaluate(value) {
                tracing::debug!(rule = %err.rule, message = %err.message, "Rule set failed");
                return Err(err);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_empty_rule_set_passes_everything() {
        let rules = RuleSet::new();
        assert!(rules.is_empty());
        assert!(rules.evaluate(&json!("anything")).is_ok());
        assert!(rules.evaluate(&Value::Null).is_ok());
    }

    #[test]
    fn test_one_or_many_arguments() {
        let rules = RuleSet::new()
            .contains("SELECT")
            .contains(vec!["FROM", "WHERE"])
            .not_contains(["DROP", "DELETE"])
            .matches(r"\d+")
            .not_matches(Regex::new("TRUNCATE").unwrap());
        assert_eq!(rules.contains, vec!["SELECT", "FROM", "WHERE"]);
        assert_eq!(rules.not_contains.len(), 2);
        assert_eq!(rules.matches, vec![Pattern::from(r"\d+")]);
        assert!(rules.not_matches[0].is_compiled());
    }

    #[test]
    fn test_evaluation_order() {
        let rules = RuleSet::new()
            .satisfies(|_: &Value| true)
            .is_type(ValueKind::String)
            .equals("x")
            .not_empty()
            .min_length(1)
            .max_length(10)
            .valid_json()
            .not_matches("z")
            .matches("x")
            .not_contains("y")
            .contains("x");

        assert_eq!(
            rules.kinds(),
            vec![
                RuleKind::Contains,
                RuleKind::NotContains,
                RuleKind::Matches,
                RuleKind::NotMatches,
                RuleKind::ValidJson,
                RuleKind::MaxLength,
                RuleKind::MinLength,
                RuleKind::NotEmpty,
                RuleKind::Equals,
                RuleKind::IsType,
                RuleKind::Satisfies,
            ]
        );
    }

    #[test]
    fn test_stops_at_first_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let rules = RuleSet::new()
            .contains("SELECT")
            .not_contains("DROP")
            .satisfies(move |_: &Value| {
                counter.fetch_add(1, Ordering::SeqCst);
                true
            });

        let err = rules.evaluate(&json!("DROP TABLE t")).unwrap_err();
        assert_eq!(err.rule, RuleKind::Contains);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let err = rules.evaluate(&json!("SELECT 1; DROP TABLE t")).unwrap_err();
        assert_eq!(err.rule, RuleKind::NotContains);
        assert_eq!(err.message, "Expected value to not contain 'DROP'");

        assert!(rules.evaluate(&json!("SELECT 1")).is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_list_entries_are_independent() {
        let rules = RuleSet::new().matches(vec!["SELECT", "FROM"]);
        assert!(rules.evaluate(&json!("SELECT * FROM users")).is_ok());

        let err = rules.evaluate(&json!("SELECT 1")).unwrap_err();
        assert_eq!(err.message, "Expected value to match pattern 'FROM'");
    }

    #[test]
    fn test_borrowed_regex_argument() {
        let pattern = Regex::new(r"^SELECT").unwrap();
        let rules = RuleSet::new().matches(&pattern).not_matches(vec![&pattern]);
        assert!(rules.matches[0].is_compiled());
        assert_eq!(rules.not_matches, vec![Pattern::from("^SELECT")]);
    }

    #[test]
    fn test_precompile_keeps_invalid_patterns() {
        let mut rules = RuleSet::new().matches(r"\d+").not_matches("(unclosed");
        rules.precompile();
        assert!(rules.matches[0].is_compiled());
        assert!(!rules.not_matches[0].is_compiled());

        let err = rules.evaluate(&json!("42")).unwrap_err();
        assert_eq!(err.rule, RuleKind::NotMatches);
        assert!(err.message.starts_with("Invalid regex pattern"));
    }

    #[test]
    fn test_empty_lists_pass() {
        let rules = RuleSet::new()
            .contains(Vec::<String>::new())
            .not_contains(Vec::<&str>::new());
        assert!(rules.evaluate(&json!("anything")).is_ok());
    }
}
