use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigError;

/// Which reader turns a source file into a [`Config`](crate::Config).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoaderKind {
    /// Line-oriented INI dialect: `[section]`, `key = value`, bare flags, `;` comments.
    Ini,
    /// TOML document, mirrored as a nested mapping.
    Toml,
    /// JSON object, mirrored as a nested mapping.
    Json,
    /// YAML mapping, mirrored as a nested mapping. Requires the `yaml` feature.
    Yaml,
}

impl LoaderKind {
    pub const ALL: [LoaderKind; 4] = [
        LoaderKind::Ini,
        LoaderKind::Toml,
        LoaderKind::Json,
        LoaderKind::Yaml,
    ];

    /// Order of fallback attempts. INI accepts any text, so it goes last.
    pub const FALLBACK_ORDER: [LoaderKind; 4] = [
        LoaderKind::Toml,
        LoaderKind::Json,
        LoaderKind::Yaml,
        LoaderKind::Ini,
    ];

    /// Whether this build can read the kind. YAML needs the `yaml` feature.
    pub fn is_available(self) -> bool {
        match self {
            LoaderKind::Yaml => cfg!(feature = "yaml"),
            LoaderKind::Ini | LoaderKind::Toml | LoaderKind::Json => true,
        }
    }

    /// Guess the kind from a file extension. Unknown or missing extensions
    /// default to [`LoaderKind::Ini`].
    pub fn from_path(path: &Path) -> LoaderKind {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
            .unwrap_or(LoaderKind::Ini)
    }

    pub fn name(self) -> &'static str {
        match self {
            LoaderKind::Ini => "ini",
            LoaderKind::Toml => "toml",
            LoaderKind::Json => "json",
            LoaderKind::Yaml => "yaml",
        }
    }
}

impl FromStr for LoaderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ini" | "conf" | "cfg" => Ok(LoaderKind::Ini),
            "toml" => Ok(LoaderKind::Toml),
            "json" => Ok(LoaderKind::Json),
            "yaml" | "yml" => Ok(LoaderKind::Yaml),
            _ => Err(ConfigError::UnsupportedLoader(s.to_string())),
        }
    }
}

impl fmt::Display for LoaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A strict lookup key: an entry name, or a position in the flag list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    Name(&'a str),
    Index(usize),
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(name: &'a str) -> Self {
        Key::Name(name)
    }
}

impl<'a> From<&'a String> for Key<'a> {
    fn from(name: &'a String) -> Self {
        Key::Name(name.as_str())
    }
}

impl From<usize> for Key<'_> {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => f.write_str(name),
            Key::Index(index) => write!(f, "{index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_kinds() {
        assert_eq!("ini".parse::<LoaderKind>().unwrap(), LoaderKind::Ini);
        assert_eq!("conf".parse::<LoaderKind>().unwrap(), LoaderKind::Ini);
        assert_eq!("TOML".parse::<LoaderKind>().unwrap(), LoaderKind::Toml);
        assert_eq!("json".parse::<LoaderKind>().unwrap(), LoaderKind::Json);
        assert_eq!("yml".parse::<LoaderKind>().unwrap(), LoaderKind::Yaml);
    }

    #[test]
    fn parse_unknown_kind_is_unsupported() {
        let err = "xml".parse::<LoaderKind>().unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedLoader(name) if name == "xml"));
    }

    #[test]
    fn from_path_uses_extension() {
        assert_eq!(LoaderKind::from_path(Path::new("app.yml")), LoaderKind::Yaml);
        assert_eq!(LoaderKind::from_path(Path::new("app.json")), LoaderKind::Json);
        assert_eq!(LoaderKind::from_path(Path::new("a/b/app.toml")), LoaderKind::Toml);
    }

    #[test]
    fn from_path_defaults_to_ini() {
        assert_eq!(LoaderKind::from_path(Path::new("sample.conf")), LoaderKind::Ini);
        assert_eq!(LoaderKind::from_path(Path::new("settings")), LoaderKind::Ini);
        assert_eq!(LoaderKind::from_path(Path::new("notes.txt")), LoaderKind::Ini);
    }

    #[test]
    fn key_conversions() {
        assert_eq!(Key::from("host"), Key::Name("host"));
        assert_eq!(Key::from(2usize), Key::Index(2));
        assert_eq!(Key::Index(3).to_string(), "3");
    }
}
