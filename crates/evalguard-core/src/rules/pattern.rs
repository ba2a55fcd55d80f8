//! Regex arguments for `matches` / `not_matches`.

use std::borrow::Cow;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A regex pattern, either as source text or precompiled.
///
/// Source patterns are compiled on every evaluation. Rule sets loaded from
/// documents compile theirs up front, see [`Pattern::compiled`].
#[derive(Debug, Clone)]
pub enum Pattern {
    Source(String),
    Compiled(Regex),
}

impl Pattern {
    /// The pattern's source text.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Source(source) => source,
            Self::Compiled(regex) => regex.as_str(),
        }
    }

    /// Compile the pattern, borrowing it when already compiled.
    pub fn regex(&self) -> Result<Cow<'_, Regex>, regex::Error> {
        match self {
            Self::Source(source) => Regex::new(source).map(Cow::Owned),
            Self::Compiled(regex) => Ok(Cow::Borrowed(regex)),
        }
    }

    /// Convert into the compiled form.
    pub fn compiled(self) -> Result<Self, regex::Error> {
        match self {
            Self::Source(source) => Regex::new(&source).map(Self::Compiled),
            compiled => Ok(compiled),
        }
    }

    pub fn is_compiled(&self) -> bool {
        matches!(self, Self::Compiled(_))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl From<&str> for Pattern {
    fn from(source: &str) -> Self {
        Self::Source(source.to_string())
    }
}

impl From<String> for Pattern {
    fn from(source: String) -> Self {
        Self::Source(source)
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self::Compiled(regex)
    }
}

impl From<&Regex> for Pattern {
    fn from(regex: &Regex) -> Self {
        Self::Compiled(regex.clone())
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::Source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_and_compiled_agree() {
        let source = Pattern::from(r"user_\d+");
        let compiled = Pattern::from(Regex::new(r"user_\d+").unwrap());
        assert_eq!(source, compiled);
        assert!(source.regex().unwrap().is_match("user_42"));
        assert!(compiled.regex().unwrap().is_match("user_42"));
    }

    #[test]
    fn test_compiled_conversion() {
        let pattern = Pattern::from(r"\d{4}").compiled().unwrap();
        assert!(pattern.is_compiled());
        assert_eq!(pattern.as_str(), r"\d{4}");

        assert!(Pattern::from("[invalid").compiled().is_err());
    }
}
