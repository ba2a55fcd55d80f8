//! The rule catalog.
//!
//! Each rule is a pure check over `(value, argument)` that either passes or
//! fails with a [`ValidationError`]. The functions live in three groups:
//!
//! - [`text`]: substring and regex rules over the text form of a value
//! - [`shape`]: JSON validity, length bounds, emptiness, equality, type
//! - [`predicate`]: caller-defined predicates
//!
//! [`Rule`] binds a rule to its argument so it can be stored and evaluated
//! later. [`catalog`] lists every rule in the order a [`RuleSet`] evaluates
//! them.
//!
//! [`RuleSet`]: crate::config::RuleSet

pub mod predicate;
pub mod shape;
pub mod text;

mod pattern;

pub use pattern::Pattern;
pub use predicate::Predicate;

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::value::ValueKind;

/// Identifier of a catalog rule.
///
/// Variants are declared in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Contains,
    NotContains,
    Matches,
    NotMatches,
    ValidJson,
    MaxLength,
    MinLength,
    NotEmpty,
    Equals,
    IsType,
    Satisfies,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::NotContains => "not_contains",
            Self::Matches => "matches",
            Self::NotMatches => "not_matches",
            Self::ValidJson => "valid_json",
            Self::MaxLength => "max_length",
            Self::MinLength => "min_length",
            Self::NotEmpty => "not_empty",
            Self::Equals => "equals",
            Self::IsType => "is_type",
            Self::Satisfies => "satisfies",
        }
    }

    /// Catalog entry describing this rule.
    pub fn info(&self) -> &'static RuleInfo {
        // The catalog holds one entry per variant, in declaration order.
        &CATALOG[*self as usize]
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<&str> for RuleKind {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Error returned when parsing an unknown rule name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown rule: {0}")]
pub struct UnknownRule(pub String);

impl FromStr for RuleKind {
    type Err = UnknownRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATALOG
            .iter()
            .find(|info| info.kind.as_str() == s)
            .map(|info| info.kind)
            .ok_or_else(|| UnknownRule(s.to_string()))
    }
}

/// Static description of a catalog rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInfo {
    pub kind: RuleKind,

    /// Shape of the argument the rule takes
    pub argument: &'static str,

    /// When the rule passes
    pub passes_when: &'static str,
}

lazy_static! {
    static ref CATALOG: Vec<RuleInfo> = vec![
        RuleInfo {
            kind: RuleKind::Contains,
            argument: "substring",
            passes_when: "the substring occurs in the value's text",
        },
        RuleInfo {
            kind: RuleKind::NotContains,
            argument: "substring",
            passes_when: "the substring does not occur in the value's text",
        },
        RuleInfo {
            kind: RuleKind::Matches,
            argument: "regex pattern",
            passes_when: "the pattern matches somewhere in the value's text",
        },
        RuleInfo {
            kind: RuleKind::NotMatches,
            argument: "regex pattern",
            passes_when: "the pattern matches nowhere in the value's text",
        },
        RuleInfo {
            kind: RuleKind::ValidJson,
            argument: "none",
            passes_when: "the value's text parses as JSON",
        },
        RuleInfo {
            kind: RuleKind::MaxLength,
            argument: "integer",
            passes_when: "length <= n",
        },
        RuleInfo {
            kind: RuleKind::MinLength,
            argument: "integer",
            passes_when: "length >= n",
        },
        RuleInfo {
            kind: RuleKind::NotEmpty,
            argument: "none",
            passes_when: "the value is not null, blank, empty or falsy",
        },
        RuleInfo {
            kind: RuleKind::Equals,
            argument: "any value",
            passes_when: "the value equals the argument",
        },
        RuleInfo {
            kind: RuleKind::IsType,
            argument: "value kind",
            passes_when: "the value is an instance of the kind",
        },
        RuleInfo {
            kind: RuleKind::Satisfies,
            argument: "predicate with optional description",
            passes_when: "the predicate returns a truthy result",
        },
    ];
}

/// Every catalog rule, in evaluation order.
pub fn catalog() -> &'static [RuleInfo] {
    &CATALOG
}

/// A catalog rule bound to its argument.
#[derive(Debug, Clone)]
pub enum Rule {
    Contains(String),
    NotContains(String),
    Matches(Pattern),
    NotMatches(Pattern),
    ValidJson,
    MaxLength(usize),
    MinLength(usize),
    NotEmpty,
    Equals(Value),
    IsType(ValueKind),
    Satisfies(Predicate),
}

impl Rule {
    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Contains(_) => RuleKind::Contains,
            Self::NotContains(_) => RuleKind::NotContains,
            Self::Matches(_) => RuleKind::Matches,
            Self::NotMatches(_) => RuleKind::NotMatches,
            Self::ValidJson => RuleKind::ValidJson,
            Self::MaxLength(_) => RuleKind::MaxLength,
            Self::MinLength(_) => RuleKind::MinLength,
            Self::NotEmpty => RuleKind::NotEmpty,
            Self::Equals(_) => RuleKind::Equals,
            Self::IsType(_) => RuleKind::IsType,
            Self::Satisfies(_) => RuleKind::Satisfies,
        }
    }

    /// Evaluate the rule against `value`.
    pub fn evaluate(&self, value: &Value) -> Result<(), ValidationError> {
        match self {
            Self::Contains(needle) => text::contains(value, needle),
            Self::NotContains(needle) => text::not_contains(value, needle),
            Self::Matches(pattern) => text::matches(value, pattern),
            Self::NotMatches(pattern) => text::not_matches(value, pattern),
            Self::ValidJson => shape::valid_json(value),
            Self::MaxLength(n) => shape::max_length(value, *n),
            Self::MinLength(n) => shape::min_length(value, *n),
            Self::NotEmpty => shape::not_empty(value),
            Self::Equals(expected) => shape::equals(value, expected),
            Self::IsType(kind) => shape::is_type(value, *kind),
            Self::Satisfies(predicate) => predicate.evaluate(value),
        }
    }
}
