//! Load human-written configuration into typed sections.
//!
//! Sectionconf reads an INI dialect and structured sources (TOML, JSON, YAML)
//! into one in-memory shape: a tree of [`Section`]s, each holding an ordered
//! list of bare *flag* values and an ordered map of keyed values.
//!
//! ```ignore
//! let config = sectionconf::load("sample.conf", LoaderKind::Ini)?;
//! let foo = config.require("general")?.lookup("foo");
//! assert_eq!(foo.value(), Some(&Value::from("baz")));
//! ```
//!
//! # The INI dialect
//!
//! ```text
//! ; comments start with a semicolon
//! path = /usr/local/bin        <- key-value item in `root`
//! verbose                      <- bare flag in `root`
//!
//! [list_section]               <- opens a section
//! 1.5                          <- Float(1.5)
//! a,3                          <- Tuple([String("a"), Integer(3)])
//!
//! [mixed]
//! boolean = True               <- Boolean(true)
//! list = 1.1,2.2               <- Tuple([Float(1.1), Float(2.2)])
//! ```
//!
//! Lines are classified one at a time: blank, comment, `[header]`,
//! `key = value`, and anything else is a flag. Nothing is ever rejected.
//! Lines before the first header belong to the always-present `root` section.
//! A repeated key overwrites the earlier value.
//!
//! # Type inference
//!
//! Every value from text is split on `,` and each piece is classified in
//! order: exactly `True`/`False` → boolean, base-10 integer, float, and
//! otherwise the trimmed string. One piece stays a bare scalar; several become
//! a [`Value::Tuple`]. See [`coerce_token`] and [`coerce_group`].
//!
//! # Structured sources
//!
//! TOML, JSON and YAML documents already carry types, so nothing is coerced.
//! Their nested mappings become nested sections inside `root`, to any depth,
//! and their arrays become [`Value::List`]. Any other reader can take part by
//! implementing [`TreeSource`] and calling [`Config::from_tree`].
//!
//! # Lookups
//!
//! [`Config::get`] is lenient and returns [`Lookup::Missing`] on a miss.
//! [`Config::require`] is strict and fails with [`ConfigError::MissingKey`].
//! Both check top-level section names first and then fall through to `root`.
//! Positional keys (`require(0usize)`) address flags.
//!
//! # Loading files
//!
//! [`load`] (or the [`Loader`] builder) opens a file with a chosen
//! [`LoaderKind`]. If that loader fails, the others are tried; a missing file
//! is always reported as [`ConfigError::SourceNotFound`] and never masked.
//!
//! Load progress is reported through `tracing` at debug and trace level. The
//! library installs no subscriber.

pub mod error;
pub mod types;

mod config;
mod ini;
mod loader;
mod section;
mod structured;
mod value;

#[cfg(test)]
mod fixtures;

pub use config::{Config, ROOT};
pub use error::ConfigError;
pub use ini::{Line, classify, load_ini, load_ini_str};
pub use loader::{Loader, load};
pub use section::{Lookup, Member, RawValue, Section, SectionValues};
pub use structured::{TreeSource, mirror};
pub use types::{Key, LoaderKind};
pub use value::{Value, coerce_group, coerce_token};
