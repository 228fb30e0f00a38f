//! Application layout read from `inspector.toml`.

use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

use inspector_records::schema::{DEFAULT_ENUM_NAMESPACE, DEFAULT_MODEL_NAMESPACE};
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "inspector.toml";

const DEFAULT_ENTRY: &str = "target/release/inspect";
const DEFAULT_EXTENSION: &str = "rs";
const DEFAULT_MODELS_PATH: &str = "src/models";
const DEFAULT_ENUMS_PATH: &str = "src/enums";
const DEFAULT_MODEL_EXCLUDES: [&str; 4] = ["overrides", "scopes", "traits", "concerns"];

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read {}: {source}", path.display()),
            Self::Parse { path, message } => {
                write!(f, "invalid {}: {message}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { .. } => None,
        }
    }
}

/// Where one category of types lives and how its names are qualified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLayout {
    /// Directory relative to the application root.
    pub path: PathBuf,
    pub namespace: String,
    /// Subdirectory names skipped while scanning.
    pub exclude: Vec<String>,
}

/// Resolved application layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Extractor entry point, relative to the application root.
    pub entry: PathBuf,
    /// Extension of type-definition files.
    pub extension: String,
    pub models: CatalogLayout,
    pub enums: CatalogLayout,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from(ConfigFile::default())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    entry: Option<PathBuf>,
    extension: Option<String>,
    models: SectionFile,
    enums: SectionFile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SectionFile {
    path: Option<PathBuf>,
    namespace: Option<String>,
    exclude: Option<Vec<String>>,
}

impl SectionFile {
    fn resolve(self, path: &str, namespace: &str, exclude: &[&str]) -> CatalogLayout {
        CatalogLayout {
            path: self.path.unwrap_or_else(|| PathBuf::from(path)),
            namespace: self.namespace.unwrap_or_else(|| namespace.to_string()),
            exclude: self
                .exclude
                .unwrap_or_else(|| exclude.iter().map(|name| (*name).to_string()).collect()),
        }
    }
}

impl From<ConfigFile> for AppConfig {
    fn from(file: ConfigFile) -> Self {
        Self {
            entry: file.entry.unwrap_or_else(|| PathBuf::from(DEFAULT_ENTRY)),
            extension: file
                .extension
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
            models: file.models.resolve(
                DEFAULT_MODELS_PATH,
                DEFAULT_MODEL_NAMESPACE,
                &DEFAULT_MODEL_EXCLUDES,
            ),
            enums: file
                .enums
                .resolve(DEFAULT_ENUMS_PATH, DEFAULT_ENUM_NAMESPACE, &[]),
        }
    }
}

impl AppConfig {
    /// Loads `inspector.toml` from the application root, or defaults when absent.
    ///
    /// # Errors
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Self::parse(&contents).map_err(|message| ConfigError::Parse { path, message })
    }

    /// Parses layout settings from TOML text.
    ///
    /// # Errors
    /// Returns the parser message if the text is not a valid layout file.
    pub fn parse(contents: &str) -> Result<Self, String> {
        let file: ConfigFile = toml::from_str(contents).map_err(|err| err.to_string())?;
        Ok(Self::from(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_conventional_layout() {
        let config = AppConfig::default();
        assert_eq!(config.entry, PathBuf::from("target/release/inspect"));
        assert_eq!(config.extension, "rs");
        assert_eq!(config.models.path, PathBuf::from("src/models"));
        assert_eq!(config.models.namespace, "app::models");
        assert_eq!(
            config.models.exclude,
            vec!["overrides", "scopes", "traits", "concerns"]
        );
        assert_eq!(config.enums.namespace, "app::enums");
        assert!(config.enums.exclude.is_empty());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = AppConfig::parse(
            r#"
entry = "bin/inspect"

[models]
namespace = "shop::models"
"#,
        )
        .expect("layout should parse");

        assert_eq!(config.entry, PathBuf::from("bin/inspect"));
        assert_eq!(config.models.namespace, "shop::models");
        assert_eq!(config.models.path, PathBuf::from("src/models"));
        assert_eq!(config.models.exclude.len(), 4);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(AppConfig::parse("modles = 1").is_err());
    }
}
