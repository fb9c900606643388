use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Key not found: {0}")]
    MissingKey(String),

    #[error("Unsupported loader '{0}' (expected one of: ini, toml, json, yaml)")]
    UnsupportedLoader(String),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("Invalid value for '{key}': {reason}")]
    InvalidSource { key: String, reason: String },
}

impl ConfigError {
    /// Classify an I/O failure on `path`, keeping "not found" distinct from
    /// every other read error.
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::SourceNotFound { path }
        } else {
            ConfigError::Io { path, source }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::SourceNotFound { .. })
    }
}
