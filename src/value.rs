//! Typed configuration values and the text-to-value coercion rules.
//!
//! Text sources (the INI dialect) arrive as raw strings and go through
//! [`coerce_group`]: the text is split on `,` and every piece is classified by
//! [`coerce_token`] as boolean, integer, float, or string, in that order. A
//! single piece is returned bare; two or more become a [`Value::Tuple`].
//!
//! Structured sources (TOML, JSON, YAML) already carry types, so their leaves
//! are converted directly and never pass through coercion. They can also
//! produce [`Value::List`], [`Value::Null`], and nested [`Value::Section`]s,
//! which the text path never does.

use std::fmt;

use serde::Serialize;

use crate::section::Section;

/// A configuration value.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// Comma-separated group from a text source. Always two or more elements.
    Tuple(Vec<Value>),
    /// Already-typed sequence from a structured source. Any length.
    List(Vec<Value>),
    /// Explicit null from a structured source.
    Null,
    /// Nested child section.
    Section(Section),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Elements of either sequence shape: a coerced tuple or a structured list.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(items) | Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_section(&self) -> Option<&Section> {
        match self {
            Value::Section(section) => Some(section),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short lowercase name of the variant (`"tuple"`, `"section"`, ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Tuple(_) => "tuple",
            Value::List(_) => "list",
            Value::Null => "null",
            Value::Section(_) => "section",
        }
    }
}

/// Classify a single text token.
///
/// Surrounding whitespace is trimmed. Only the exact spellings `True` and
/// `False` are booleans. Then a base-10 integer with optional sign, then any
/// float, and finally the trimmed text itself. Never fails.
pub fn coerce_token(text: &str) -> Value {
    let token = text.trim();

    match token {
        "True" => return Value::Boolean(true),
        "False" => return Value::Boolean(false),
        _ => {}
    }
    if let Ok(i) = token.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = token.parse::<f64>() {
        return Value::Float(f);
    }
    Value::String(token.to_string())
}

/// Split `text` on `,` and coerce every piece.
///
/// One piece is returned unwrapped; several become a [`Value::Tuple`] in
/// source order. There is no escape for a literal comma.
pub fn coerce_group(text: &str) -> Value {
    let mut items: Vec<Value> = text.split(',').map(coerce_token).collect();
    if items.len() == 1 {
        items.remove(0)
    } else {
        Value::Tuple(items)
    }
}

impl PartialEq for Value {
    /// Structural equality. NaN floats compare equal to each other.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) | (Value::List(a), Value::List(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Section(a), Value::Section(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    /// Renders scalars and tuples in the INI spelling they would be coerced from.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(true) => f.write_str("True"),
            Value::Boolean(false) => f.write_str("False"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::String(s) => f.write_str(s),
            Value::Tuple(items) => write_joined(f, items),
            Value::List(items) => {
                f.write_str("[")?;
                write_joined(f, items)?;
                f.write_str("]")
            }
            Value::Null => f.write_str("null"),
            Value::Section(section) => write!(f, "{section}"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Section> for Value {
    fn from(section: Section) -> Self {
        Value::Section(section)
    }
}
