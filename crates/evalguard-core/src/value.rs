//! Subject model for validation.
//!
//! Every value under test is a `serde_json::Value`. Text rules see the value
//! through [`as_text`], length rules through [`length`], and `is_type` through
//! [`ValueKind`].

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Text form of a value used by substring, regex and JSON rules.
///
/// Strings are used as-is, null becomes the empty string, and everything else
/// is rendered as compact JSON (`42`, `true`, `[1,2]`).
pub fn as_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed(""),
        other => Cow::Owned(other.to_string()),
    }
}

/// Length of a value as seen by `max_length` / `min_length`.
///
/// Strings count Unicode scalar values, arrays count elements and objects
/// count entries. Scalars fall back to the length of their text form.
pub fn length(value: &Value) -> usize {
    match value {
        Value::String(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        Value::Null => 0,
        other => as_text(other).chars().count(),
    }
}

/// Type or capability descriptor accepted by `is_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    Float,
    /// Any number, integer or float
    Number,
    String,
    Array,
    Object,
    /// Arrays and objects
    Collection,
    Any,
}

impl ValueKind {
    /// The most specific kind describing `value`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(n) if n.is_f64() => Self::Float,
            Value::Number(_) => Self::Integer,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Whether `value` is an instance of this kind.
    ///
    /// Broader kinds accept their specializations: `Number` accepts integers
    /// and floats, `Collection` accepts arrays and objects.
    pub fn accepts(&self, value: &Value) -> bool {
        let actual = Self::of(value);
        match self {
            Self::Any => true,
            Self::Number => matches!(actual, Self::Integer | Self::Float),
            Self::Collection => matches!(actual, Self::Array | Self::Object),
            kind => *kind == actual,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
            Self::Collection => "collection",
            Self::Any => "any",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values usable as a boolean outcome.
///
/// Predicates passed to `satisfies` may return anything implementing this
/// trait. Empty and zero values are falsy.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl Truthy for Value {
    fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
        }
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

impl Truthy for &str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Truthy for Vec<T> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

macro_rules! impl_truthy_for_numbers {
    ($($t:ty),*) => {
        $(
            impl Truthy for $t {
                fn is_truthy(&self) -> bool {
                    *self != 0 as $t
                }
            }
        )*
    };
}

impl_truthy_for_numbers!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
