//! The dual-container section: an ordered list of bare flag values plus an
//! ordered map of keyed values.
//!
//! Lookups never use failure to choose a container. [`Section::lookup`]
//! reports where a key was found with a [`Lookup`] tag, and only
//! [`Section::require`] turns a miss into [`ConfigError::MissingKey`].

use std::fmt;

use serde::ser::{Serialize, SerializeTuple, Serializer};

use crate::error::ConfigError;
use crate::types::Key;
use crate::value::{Value, coerce_group};

/// A value on its way into a section.
///
/// The variant decides whether coercion runs: text from the INI dialect is
/// split and classified, values from a structured source are stored as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue<'a> {
    Text(&'a str),
    Typed(Value),
}

impl RawValue<'_> {
    pub fn resolve(self) -> Value {
        match self {
            RawValue::Text(text) => coerce_group(text),
            RawValue::Typed(value) => value,
        }
    }
}

/// A named grouping of flag values and keyed values.
#[derive(Debug, Clone, Default)]
pub struct Section {
    flags: Vec<Value>,
    entries: Vec<(String, Value)>,
}

/// Where a lookup landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    /// A top-level section of a [`Config`](crate::Config).
    Section(&'a Section),
    /// A keyed value.
    Entry(&'a Value),
    /// A flag value, addressed by position.
    Flag(&'a Value),
    Missing,
}

impl<'a> Lookup<'a> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Lookup::Missing)
    }

    /// The value found, if the lookup landed on an entry or a flag.
    pub fn value(&self) -> Option<&'a Value> {
        match *self {
            Lookup::Entry(value) | Lookup::Flag(value) => Some(value),
            Lookup::Section(_) | Lookup::Missing => None,
        }
    }

    /// The section found, whether top-level or nested inside an entry.
    pub fn section(&self) -> Option<&'a Section> {
        match *self {
            Lookup::Section(section) => Some(section),
            Lookup::Entry(Value::Section(section)) => Some(section),
            _ => None,
        }
    }

    /// Continue the lookup inside the section found. Anything that is not a
    /// section yields [`Lookup::Missing`].
    pub fn lookup<'k>(&self, key: impl Into<Key<'k>>) -> Lookup<'a> {
        match self.section() {
            Some(section) => section.lookup(key),
            None => Lookup::Missing,
        }
    }
}

/// Shape of a section's contents, as reported by [`Section::get_values`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SectionValues<'a> {
    Both {
        flags: &'a [Value],
        entries: &'a [(String, Value)],
    },
    Flags(&'a [Value]),
    Entries(&'a [(String, Value)]),
    Empty,
}

/// One item of section iteration: flags come first, then entry keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Member<'a> {
    Flag(&'a Value),
    Key(&'a str),
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flags(&self) -> &[Value] {
        &self.flags
    }

    pub fn flag(&self, index: usize) -> Option<&Value> {
        self.flags.get(index)
    }

    /// Keyed values in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty() && self.entries.is_empty()
    }

    /// Flags first, then entry keys.
    pub fn iter(&self) -> impl Iterator<Item = Member<'_>> {
        self.flags
            .iter()
            .map(Member::Flag)
            .chain(self.entries.iter().map(|(k, _)| Member::Key(k.as_str())))
    }

    /// Lenient keyed lookup. Flags are not consulted.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    /// A nested child section stored under `key`.
    pub fn section(&self, key: &str) -> Option<&Section> {
        self.get(key).and_then(Value::as_section)
    }

    /// Two-step lookup: entries first, then flags for positional keys.
    ///
    /// A [`Key::Index`] also matches an entry whose key is its decimal
    /// spelling, so `lookup(1)` finds an entry named `"1"` before flag 1.
    pub fn lookup<'k>(&self, key: impl Into<Key<'k>>) -> Lookup<'_> {
        match key.into() {
            Key::Name(name) => match self.get(name) {
                Some(value) => Lookup::Entry(value),
                None => Lookup::Missing,
            },
            Key::Index(index) => {
                if let Some(value) = self.get(&index.to_string()) {
                    Lookup::Entry(value)
                } else if let Some(value) = self.flags.get(index) {
                    Lookup::Flag(value)
                } else {
                    Lookup::Missing
                }
            }
        }
    }

    /// Strict lookup: a miss is [`ConfigError::MissingKey`].
    pub fn require<'k>(&self, key: impl Into<Key<'k>>) -> Result<Lookup<'_>, ConfigError> {
        let key = key.into();
        match self.lookup(key) {
            Lookup::Missing => Err(ConfigError::MissingKey(key.to_string())),
            found => Ok(found),
        }
    }

    /// Flags and entries together when both are present, whichever one is
    /// present otherwise, and [`SectionValues::Empty`] for an empty section.
    pub fn get_values(&self) -> SectionValues<'_> {
        match (self.flags.is_empty(), self.entries.is_empty()) {
            (false, false) => SectionValues::Both {
                flags: &self.flags,
                entries: &self.entries,
            },
            (false, true) => SectionValues::Flags(&self.flags),
            (true, false) => SectionValues::Entries(&self.entries),
            (true, true) => SectionValues::Empty,
        }
    }

    pub fn add_flag(&mut self, raw: RawValue<'_>) {
        self.flags.push(raw.resolve());
    }

    pub fn add_entry(&mut self, key: &str, raw: RawValue<'_>) {
        self.insert(key, raw.resolve());
    }

    /// Create an empty child section under `key`, replacing whatever was there.
    pub fn add_section(&mut self, key: &str) -> &mut Section {
        let index = match self.position(key) {
            Some(i) => {
                self.entries[i].1 = Value::Section(Section::new());
                i
            }
            None => {
                self.entries.push((key.to_string(), Value::Section(Section::new())));
                self.entries.len() - 1
            }
        };
        match &mut self.entries[index].1 {
            Value::Section(child) => child,
            _ => unreachable!("slot was just filled with a section"),
        }
    }

    /// Store `value` under `key`. An existing value is replaced and returned.
    pub fn insert(&mut self, key: &str, value: Value) -> Option<Value> {
        match self.position(key) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.entries.push((key.to_string(), value));
                None
            }
        }
    }

    /// Replace the flag at `index`, returning the previous value.
    pub fn set_flag(&mut self, index: usize, value: Value) -> Result<Value, ConfigError> {
        match self.flags.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(ConfigError::MissingKey(index.to_string())),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl PartialEq for Section {
    /// Flags compare in order; entries compare as a map.
    fn eq(&self, other: &Self) -> bool {
        self.flags == other.flags
            && self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|o| o == v))
    }
}

impl<'a> IntoIterator for &'a Section {
    type Item = Member<'a>;
    type IntoIter = Box<dyn Iterator<Item = Member<'a>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

struct EntriesRef<'a>(&'a [(String, Value)]);

impl Serialize for EntriesRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

impl Serialize for SectionValues<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            SectionValues::Both { flags, entries } => {
                let mut pair = serializer.serialize_tuple(2)?;
                pair.serialize_element(flags)?;
                pair.serialize_element(&EntriesRef(entries))?;
                pair.end()
            }
            SectionValues::Flags(flags) => flags.serialize(serializer),
            SectionValues::Entries(entries) => EntriesRef(entries).serialize(serializer),
            SectionValues::Empty => serializer.serialize_none(),
        }
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.get_values().serialize(serializer)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
