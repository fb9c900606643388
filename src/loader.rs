//! Load entry point: read a source file with a chosen loader kind.
//!
//! The chosen kind is tried first. If it fails for any reason other than the
//! file being absent, the remaining kinds are tried in
//! [`LoaderKind::FALLBACK_ORDER`] and the first success wins. If every kind
//! fails, the error from the chosen kind is returned. A missing file is always
//! reported as [`ConfigError::SourceNotFound`] and never triggers fallback.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Config;
use crate::error::ConfigError;
use crate::ini;
use crate::types::LoaderKind;

/// Load `path` with the given loader kind, falling back to the others on
/// non-missing-file failures.
///
/// ```ignore
/// let config = sectionconf::load("sample.conf", LoaderKind::Ini)?;
/// let foo = config.require("general")?.lookup("foo");
/// ```
pub fn load(path: impl AsRef<Path>, kind: LoaderKind) -> Result<Config, ConfigError> {
    Loader::new().kind(kind).load(path)
}

/// Builder for a single load.
#[derive(Debug, Clone)]
pub struct Loader {
    kind: Option<LoaderKind>,
    fallback: bool,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    pub fn new() -> Self {
        Self {
            kind: None,
            fallback: true,
        }
    }

    /// Use this loader kind (default: guessed from the file extension, see
    /// [`LoaderKind::from_path`]).
    pub fn kind(mut self, kind: LoaderKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Enable or disable fallback to other loader kinds (default: `true`).
    pub fn fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    fn effective_kind(&self, path: &Path) -> LoaderKind {
        self.kind.unwrap_or_else(|| LoaderKind::from_path(path))
    }

    /// Load and parse `path`.
    pub fn load(self, path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let kind = self.effective_kind(path);
        if !kind.is_available() {
            return Err(ConfigError::UnsupportedLoader(kind.name().to_string()));
        }

        debug!(path = %path.display(), loader = %kind, "loading config source");
        let err = match load_with(kind, path) {
            Ok(config) => return Ok(config.with_source(path)),
            Err(err) if err.is_not_found() || !self.fallback => return Err(err),
            Err(err) => err,
        };

        for other in LoaderKind::FALLBACK_ORDER {
            if other == kind || !other.is_available() {
                continue;
            }
            debug!(
                path = %path.display(),
                failed = %kind,
                loader = %other,
                error = %err,
                "trying fallback loader"
            );
            match load_with(other, path) {
                Ok(config) => return Ok(config.with_source(path)),
                Err(e) if e.is_not_found() => return Err(e),
                Err(_) => continue,
            }
        }
        Err(err)
    }
}

/// Run exactly one loader kind against `path`.
fn load_with(kind: LoaderKind, path: &Path) -> Result<Config, ConfigError> {
    match kind {
        LoaderKind::Ini => {
            let file = File::open(path).map_err(|e| ConfigError::from_io(path, e))?;
            ini::load_ini(BufReader::new(file)).map_err(|e| ConfigError::from_io(path, e))
        }
        LoaderKind::Toml | LoaderKind::Json | LoaderKind::Yaml => {
            let content =
                std::fs::read_to_string(path).map_err(|e| ConfigError::from_io(path, e))?;
            parse_structured(kind, &content, path)
        }
    }
}

/// Parse structured text of the given kind and mirror it into a [`Config`].
///
/// `path` only labels errors. INI text is accepted too, for uniformity.
pub(crate) fn parse_structured(
    kind: LoaderKind,
    content: &str,
    path: &Path,
) -> Result<Config, ConfigError> {
    let parse_error = |reason: String| ConfigError::Parse {
        path: PathBuf::from(path),
        reason,
    };

    match kind {
        LoaderKind::Ini => Ok(ini::load_ini_str(content)),
        LoaderKind::Toml => {
            let table: toml::Table =
                toml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
            Config::from_tree(&toml::Value::Table(table))
        }
        LoaderKind::Json => {
            let value: serde_json::Value =
                serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?;
            Config::from_tree(&value)
        }
        #[cfg(feature = "yaml")]
        LoaderKind::Yaml => {
            let value: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
            Config::from_tree(&value)
        }
        #[cfg(not(feature = "yaml"))]
        LoaderKind::Yaml => Err(ConfigError::UnsupportedLoader(kind.name().to_string())),
    }
}
