//! Mirroring already-typed nested mappings into sections.
//!
//! TOML, JSON and YAML readers hand back a tree of mappings and typed
//! scalars. [`mirror`] walks that tree in source order: every nested mapping
//! becomes a child [`Section`] stored under its key, and every other value is
//! stored as a [`RawValue::Typed`] entry, so it skips text coercion entirely.
//!
//! The readers produce owned trees, so a source cannot contain a cycle.

use tracing::trace;

use crate::error::ConfigError;
use crate::section::{RawValue, Section};
use crate::value::Value;

/// A node of a nested mapping produced by some external reader.
///
/// Errors are plain reasons; [`mirror`] attaches the dotted key path.
pub trait TreeSource {
    /// Children of a mapping node in source order, or `None` if this node is
    /// not a mapping.
    fn children(&self) -> Result<Option<Vec<(String, &Self)>>, String>;

    /// Convert a non-mapping node into a value.
    fn leaf(&self) -> Result<Value, String>;

    /// Whether this node is an explicit null (an empty document, say).
    fn is_null(&self) -> bool {
        false
    }
}

/// Mirror the mapping `source` into `target`.
///
/// Fails with [`ConfigError::InvalidSource`] if `source` is not a mapping or
/// contains a value the section model cannot hold.
pub fn mirror<T: TreeSource>(source: &T, target: &mut Section) -> Result<(), ConfigError> {
    match source.children() {
        Ok(Some(children)) => mirror_children(children, "", target),
        Ok(None) => Err(ConfigError::InvalidSource {
            key: "<root>".into(),
            reason: "top level of a structured source must be a mapping".into(),
        }),
        Err(reason) => Err(ConfigError::InvalidSource {
            key: "<root>".into(),
            reason,
        }),
    }
}

fn mirror_children<T: TreeSource>(
    children: Vec<(String, &T)>,
    prefix: &str,
    target: &mut Section,
) -> Result<(), ConfigError> {
    for (key, node) in children {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        let invalid = |reason: String| ConfigError::InvalidSource {
            key: path.clone(),
            reason,
        };

        match node.children().map_err(invalid)? {
            Some(grandchildren) => {
                trace!(section = %path, "mirroring nested mapping");
                mirror_children(grandchildren, &path, target.add_section(&key))?;
            }
            None => {
                let value = node.leaf().map_err(invalid)?;
                target.add_entry(&key, RawValue::Typed(value));
            }
        }
    }
    Ok(())
}

fn sequence<T: TreeSource>(items: &[T]) -> Result<Value, String> {
    items
        .iter()
        .map(|item| match item.children() {
            Ok(Some(_)) => Err("a sequence may only hold scalars and sequences".to_string()),
            Ok(None) => item.leaf(),
            Err(reason) => Err(reason),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Value::List)
}

impl TreeSource for toml::Value {
    fn children(&self) -> Result<Option<Vec<(String, &Self)>>, String> {
        Ok(match self {
            toml::Value::Table(table) => Some(table.iter().map(|(k, v)| (k.clone(), v)).collect()),
            _ => None,
        })
    }

    fn leaf(&self) -> Result<Value, String> {
        match self {
            toml::Value::String(s) => Ok(Value::String(s.clone())),
            toml::Value::Integer(i) => Ok(Value::Integer(*i)),
            toml::Value::Float(f) => Ok(Value::Float(*f)),
            toml::Value::Boolean(b) => Ok(Value::Boolean(*b)),
            toml::Value::Datetime(dt) => Ok(Value::String(dt.to_string())),
            toml::Value::Array(items) => sequence(items),
            toml::Value::Table(_) => Err("expected a scalar, found a table".into()),
        }
    }
}

impl TreeSource for serde_json::Value {
    fn children(&self) -> Result<Option<Vec<(String, &Self)>>, String> {
        Ok(match self {
            serde_json::Value::Object(map) => {
                Some(map.iter().map(|(k, v)| (k.clone(), v)).collect())
            }
            _ => None,
        })
    }

    fn leaf(&self) -> Result<Value, String> {
        match self {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Boolean(*b)),
            serde_json::Value::Number(n) => Ok(match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Value::Integer(i),
                (None, Some(f)) => Value::Float(f),
                (None, None) => Value::String(n.to_string()),
            }),
            serde_json::Value::String(s) => Ok(Value::String(s.clone())),
            serde_json::Value::Array(items) => sequence(items),
            serde_json::Value::Object(_) => Err("expected a scalar, found an object".into()),
        }
    }

    fn is_null(&self) -> bool {
        serde_json::Value::is_null(self)
    }
}

#[cfg(feature = "yaml")]
impl TreeSource for serde_yaml::Value {
    fn children(&self) -> Result<Option<Vec<(String, &Self)>>, String> {
        match self {
            serde_yaml::Value::Mapping(map) => map
                .iter()
                .map(|(k, v)| yaml_key(k).map(|key| (key, v)))
                .collect::<Result<Vec<_>, String>>()
                .map(Some),
            serde_yaml::Value::Tagged(tagged) => tagged.value.children(),
            _ => Ok(None),
        }
    }

    fn leaf(&self) -> Result<Value, String> {
        match self {
            serde_yaml::Value::Null => Ok(Value::Null),
            serde_yaml::Value::Bool(b) => Ok(Value::Boolean(*b)),
            serde_yaml::Value::Number(n) => Ok(match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Value::Integer(i),
                (None, Some(f)) => Value::Float(f),
                (None, None) => Value::String(n.to_string()),
            }),
            serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
            serde_yaml::Value::Sequence(items) => sequence(items),
            serde_yaml::Value::Tagged(tagged) => tagged.value.leaf(),
            serde_yaml::Value::Mapping(_) => Err("expected a scalar, found a mapping".into()),
        }
    }

    fn is_null(&self) -> bool {
        serde_yaml::Value::is_null(self)
    }
}

/// YAML allows scalar keys of any type; they are stringified.
#[cfg(feature = "yaml")]
fn yaml_key(key: &serde_yaml::Value) -> Result<String, String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => yaml_key(&tagged.value),
        serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => {
            Err("mapping keys must be scalars".to_string())
        }
    }
}
