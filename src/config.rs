//! The [`Config`] facade over a tree of named sections.
//!
//! A config always holds a section named `root`, created first. INI headers add
//! further top-level sections next to it; structured sources mirror their
//! nested mappings into `root` itself, so their sections live one level down.
//! Lookups check top-level section names first and fall through to `root`.

use std::fmt;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use serde::ser::{Serialize, Serializer};

use crate::error::ConfigError;
use crate::ini;
use crate::loader;
use crate::section::{Lookup, Section, SectionValues};
use crate::structured::{self, TreeSource};
use crate::types::{Key, LoaderKind};
use crate::value::Value;

/// Name of the section that is always present.
pub const ROOT: &str = "root";

/// A loaded configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Top-level sections in creation order. `root` is always first.
    sections: Vec<(String, Section)>,
    /// Absolute path of the file this config was loaded from, if any.
    source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// An empty config holding only the `root` section.
    pub fn new() -> Self {
        Self {
            sections: vec![(ROOT.to_string(), Section::new())],
            source: None,
        }
    }

    /// Parse INI text held in memory.
    pub fn from_ini_str(text: &str) -> Self {
        ini::load_ini_str(text)
    }

    /// Parse INI lines from a reader, draining it.
    pub fn from_ini_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        ini::load_ini(reader)
    }

    /// Mirror an already-parsed nested mapping into `root`.
    ///
    /// A null source (an empty YAML document, say) yields an empty config.
    pub fn from_tree<T: TreeSource>(source: &T) -> Result<Self, ConfigError> {
        let mut config = Self::new();
        if !source.is_null() {
            structured::mirror(source, config.root_mut())?;
        }
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        loader::parse_structured(LoaderKind::Toml, text, Path::new("<string>"))
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        loader::parse_structured(LoaderKind::Json, text, Path::new("<string>"))
    }

    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        loader::parse_structured(LoaderKind::Yaml, text, Path::new("<string>"))
    }

    /// Absolute path of the source file, when loaded through [`load`](crate::load).
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub(crate) fn with_source(mut self, path: &Path) -> Self {
        self.source = Some(std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()));
        self
    }

    pub fn root(&self) -> &Section {
        &self.sections[0].1
    }

    pub fn root_mut(&mut self) -> &mut Section {
        &mut self.sections[0].1
    }

    /// A top-level section by name. `root` included.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.position(name).map(|i| &self.sections[i].1)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// The top-level section `name`, created empty if it does not exist yet.
    pub fn ensure_section(&mut self, name: &str) -> &mut Section {
        let index = match self.position(name) {
            Some(i) => i,
            None => {
                self.sections.push((name.to_string(), Section::new()));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index].1
    }

    /// Top-level sections in creation order, `root` first.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(name, s)| (name.as_str(), s))
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Snapshot of every top-level section's [`Section::get_values`] shape.
    pub fn get_all(&self) -> Vec<(&str, SectionValues<'_>)> {
        self.sections
            .iter()
            .map(|(name, s)| (name.as_str(), s.get_values()))
            .collect()
    }

    /// Lenient lookup: a top-level section named `key`, else the entry `key`
    /// in `root`. Never fails; a miss is [`Lookup::Missing`].
    pub fn get(&self, key: &str) -> Lookup<'_> {
        if let Some(section) = self.section(key) {
            return Lookup::Section(section);
        }
        match self.root().get(key) {
            Some(value) => Lookup::Entry(value),
            None => Lookup::Missing,
        }
    }

    /// Strict-path lookup without the error: names check top-level sections,
    /// then `root` entries; indexes go to `root` (entry `"i"`, then flag `i`).
    pub fn lookup<'k>(&self, key: impl Into<Key<'k>>) -> Lookup<'_> {
        match key.into() {
            Key::Name(name) => match self.section(name) {
                Some(section) => Lookup::Section(section),
                None => self.root().lookup(name),
            },
            index @ Key::Index(_) => self.root().lookup(index),
        }
    }

    /// Indexing-style lookup: a miss is [`ConfigError::MissingKey`].
    pub fn require<'k>(&self, key: impl Into<Key<'k>>) -> Result<Lookup<'_>, ConfigError> {
        let key = key.into();
        match self.lookup(key) {
            Lookup::Missing => Err(ConfigError::MissingKey(key.to_string())),
            found => Ok(found),
        }
    }

    /// Store `value` under `key` in `root`, returning any previous value.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Option<Value> {
        self.root_mut().insert(key, value.into())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.sections.iter().position(|(n, _)| n == name)
    }
}

impl PartialEq for Config {
    /// Same section names with structurally equal sections, in any order. The
    /// source path is not compared.
    fn eq(&self, other: &Self) -> bool {
        self.sections.len() == other.sections.len()
            && self
                .sections
                .iter()
                .all(|(name, s)| other.section(name).is_some_and(|o| o == s))
    }
}

impl Serialize for Config {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.get_all())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
