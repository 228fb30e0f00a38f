//! Live application state the introspectors run against.

use std::error::Error;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};

use crate::config::{AppConfig, ConfigError};
use crate::registry::TypeRegistry;
use crate::schema::{SchemaBackend, StaticSchema};

/// Environment variable designating the application root.
pub const APP_PATH_ENV: &str = "INSPECTOR_APP_PATH";

#[derive(Debug)]
pub enum BootstrapError {
    ApplicationNotFound(PathBuf),
    Config(ConfigError),
    Failed(String),
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApplicationNotFound(root) => {
                write!(f, "Application not found at: {}", root.display())
            }
            Self::Config(err) => write!(f, "{err}"),
            Self::Failed(message) => write!(f, "bootstrap failed: {message}"),
        }
    }
}

impl Error for BootstrapError {}

impl From<ConfigError> for BootstrapError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// A fully initialized application: layout, type registry and schema access.
///
/// A missing schema backend means the database is unreachable.
#[derive(Debug)]
pub struct Application<S = StaticSchema> {
    root: PathBuf,
    config: AppConfig,
    registry: TypeRegistry,
    schema: Option<S>,
}

impl<S: SchemaBackend> Application<S> {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, config: AppConfig, registry: TypeRegistry) -> Self {
        Self {
            root: root.into(),
            config,
            registry,
            schema: None,
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: S) -> Self {
        self.schema = Some(schema);
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub const fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn schema(&self) -> Option<&S> {
        self.schema.as_ref()
    }

    #[must_use]
    pub fn models_root(&self) -> PathBuf {
        self.root.join(&self.config.models.path)
    }

    #[must_use]
    pub fn enums_root(&self) -> PathBuf {
        self.root.join(&self.config.enums.path)
    }
}

/// Initializes the target application.
///
/// Every call produces fresh state; nothing is shared between boots.
pub trait Bootstrap: Send + Sync {
    type Schema: SchemaBackend;

    fn boot(
        &self,
    ) -> impl Future<Output = Result<Application<Self::Schema>, BootstrapError>> + Send;
}

/// Resolves the application root from [`APP_PATH_ENV`], falling back to `default`.
#[must_use]
pub fn app_root_from_env(default: impl Into<PathBuf>) -> PathBuf {
    std::env::var_os(APP_PATH_ENV)
        .filter(|value| !value.is_empty())
        .map_or_else(|| default.into(), PathBuf::from)
}
