use clap::{Parser, builder::BoolishValueParser};
use inspector_core::BootstrapError;
use inspector_core::config::{AppConfig, CONFIG_FILE_NAME, ConfigError as LayoutError};
use inspector_mcp::backend::DEFAULT_MAX_OUTPUT_BYTES;
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4020";
const DEFAULT_LOG_FILTER: &str = "warn";
const PROJECT_MARKER: &str = "Cargo.toml";

#[derive(Parser, Debug)]
#[command(name = "inspector-mcpd", version, about = "app-inspector MCP daemon.")]
struct CliArgs {
    /// Root of the application to inspect.
    #[arg(long, env = "INSPECTOR_APP_PATH")]
    app_path: Option<PathBuf>,

    /// Extractor binary, relative to the application root. Defaults to the
    /// `entry` declared in the application's layout file.
    #[arg(long, env = "INSPECTOR_ENTRY")]
    entry: Option<PathBuf>,

    #[arg(
        long,
        env = "INSPECTOR_MCP_HTTP",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    http: bool,

    #[arg(long, env = "INSPECTOR_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    http_addr: SocketAddr,

    #[arg(
        long,
        env = "INSPECTOR_MAX_OUTPUT_BYTES",
        default_value_t = DEFAULT_MAX_OUTPUT_BYTES
    )]
    max_output_bytes: usize,

    /// Log filter directives, written to stderr.
    #[arg(long, env = "INSPECTOR_LOG", default_value = DEFAULT_LOG_FILTER)]
    log: String,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
pub struct InspectorConfig {
    pub app_root: PathBuf,
    pub entry: PathBuf,
    pub http: bool,
    pub http_addr: SocketAddr,
    pub max_output_bytes: usize,
    pub log: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSetting { name: &'static str, value: String },
    Layout(LayoutError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
            Self::Layout(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Layout(err) => Some(err),
            Self::InvalidSetting { .. } => None,
        }
    }
}

impl From<LayoutError> for ConfigError {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl InspectorConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }

    /// Absolute path of the extractor binary.
    pub fn entry_path(&self) -> PathBuf {
        self.app_root.join(&self.entry)
    }

    /// Fails when the extractor binary is missing, reporting the application root.
    pub fn ensure_entry(&self) -> Result<(), BootstrapError> {
        let entry = self.entry_path();
        if entry.is_file() {
            return Ok(());
        }
        tracing::error!(entry = %entry.display(), "extractor entry point missing");
        Err(BootstrapError::ApplicationNotFound(self.app_root.clone()))
    }
}

impl TryFrom<CliArgs> for InspectorConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let cwd = std::env::current_dir().ok();
        let exe = std::env::current_exe().ok();
        let app_root = discover_root(args.app_path, cwd.as_deref(), exe.as_deref());

        let entry = match args.entry.filter(|entry| !entry.as_os_str().is_empty()) {
            Some(entry) => entry,
            None => AppConfig::load(&app_root)?.entry,
        };

        if args.max_output_bytes == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "INSPECTOR_MAX_OUTPUT_BYTES",
                value: args.max_output_bytes.to_string(),
            });
        }

        Ok(Self {
            app_root,
            entry,
            http: args.http,
            http_addr: args.http_addr,
            max_output_bytes: args.max_output_bytes,
            log: args.log,
        })
    }
}

/// Picks the application root.
///
/// An explicit path wins. Otherwise the working directory is used when it
/// looks like an application, falling back to two levels above the
/// executable's directory.
fn discover_root(explicit: Option<PathBuf>, cwd: Option<&Path>, exe: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit.filter(|path| !path.as_os_str().is_empty()) {
        return path;
    }
    if let Some(cwd) = cwd.filter(|dir| looks_like_app(dir)) {
        return cwd.to_path_buf();
    }
    exe.and_then(Path::parent)
        .map_or_else(|| PathBuf::from("."), |dir| dir.join("..").join(".."))
}

/// A project manifest plus the configured models directory.
fn looks_like_app(dir: &Path) -> bool {
    if !dir.join(PROJECT_MARKER).is_file() {
        return false;
    }
    let layout = if dir.join(CONFIG_FILE_NAME).is_file() {
        AppConfig::load(dir).ok()
    } else {
        Some(AppConfig::default())
    };
    layout.is_some_and(|config| dir.join(config.models.path).is_dir())
}
