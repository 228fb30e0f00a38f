//! Execution backends that run one extractor command per tool call.
//!
//! Every invocation boots the target application from scratch. Nothing is
//! cached between calls.

use std::error::Error;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use inspector_core::control::execute;
use inspector_core::runtime::{APP_PATH_ENV, Bootstrap, BootstrapError};
use inspector_core::Category;
use serde_json::Value;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

/// Default cap on extractor output.
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

/// One extractor command: `<category> <command> [argument]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub category: Category,
    pub command: &'static str,
    pub argument: Option<String>,
}

impl Invocation {
    #[must_use]
    pub const fn new(category: Category, command: &'static str) -> Self {
        Self {
            category,
            command,
            argument: None,
        }
    }

    #[must_use]
    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.argument = Some(argument.into());
        self
    }

    /// Leaves the argument out when absent, so the extractor reports it missing.
    #[must_use]
    pub fn with_optional_argument(mut self, argument: Option<String>) -> Self {
        self.argument = argument;
        self
    }

    /// Command line arguments passed to the extractor.
    #[must_use]
    pub fn args(&self) -> Vec<&str> {
        let mut args = vec![self.category.plural(), self.command];
        if let Some(argument) = &self.argument {
            args.push(argument);
        }
        args
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.category.plural(), self.command)?;
        if let Some(argument) = &self.argument {
            write!(f, " {argument:?}")?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum BackendError {
    Spawn { entry: PathBuf, source: std::io::Error },
    Io(std::io::Error),
    OutputTooLarge { limit: usize },
    Exited { status: ExitStatus },
    Decode(String),
    Bootstrap(BootstrapError),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn { entry, source } => {
                write!(f, "failed to start {}: {source}", entry.display())
            }
            Self::Io(err) => write!(f, "extractor i/o failed: {err}"),
            Self::OutputTooLarge { limit } => {
                write!(f, "extractor output exceeded {limit} bytes")
            }
            Self::Exited { status } => write!(f, "extractor exited with {status}"),
            Self::Decode(message) => write!(f, "extractor returned invalid JSON: {message}"),
            Self::Bootstrap(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BackendError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Spawn { source, .. } | Self::Io(source) => Some(source),
            Self::Bootstrap(err) => Some(err),
            Self::OutputTooLarge { .. } | Self::Exited { .. } | Self::Decode(_) => None,
        }
    }
}

impl From<BootstrapError> for BackendError {
    fn from(err: BootstrapError) -> Self {
        Self::Bootstrap(err)
    }
}

/// Runs extractor commands and returns their JSON result.
pub trait Backend: Send + Sync + 'static {
    fn invoke(
        &self,
        invocation: Invocation,
    ) -> impl Future<Output = Result<Value, BackendError>> + Send;
}

/// Spawns the application's extractor binary once per call.
#[derive(Debug, Clone)]
pub struct ProcessBackend {
    root: PathBuf,
    entry: PathBuf,
    max_output_bytes: usize,
}

impl ProcessBackend {
    /// `entry` is resolved against `root` when relative.
    pub fn new(root: impl Into<PathBuf>, entry: impl AsRef<Path>) -> Self {
        let root = root.into();
        let entry = root.join(entry);
        Self {
            root,
            entry,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
        }
    }

    #[must_use]
    pub const fn with_max_output_bytes(mut self, max_output_bytes: usize) -> Self {
        self.max_output_bytes = max_output_bytes;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn entry(&self) -> &Path {
        &self.entry
    }
}

impl Backend for ProcessBackend {
    async fn invoke(&self, invocation: Invocation) -> Result<Value, BackendError> {
        tracing::debug!(%invocation, entry = %self.entry.display(), "spawning extractor");
        let mut child = Command::new(&self.entry)
            .args(invocation.args())
            .current_dir(&self.root)
            .env(APP_PATH_ENV, &self.root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| BackendError::Spawn {
                entry: self.entry.clone(),
                source,
            })?;

        let Some(stdout) = child.stdout.take() else {
            return Err(BackendError::Io(std::io::Error::other("extractor stdout not captured")));
        };
        let limit = self.max_output_bytes;
        let mut output = Vec::new();
        stdout
            .take(u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1))
            .read_to_end(&mut output)
            .await
            .map_err(BackendError::Io)?;
        if output.len() > limit {
            return Err(BackendError::OutputTooLarge { limit });
        }

        let status = child.wait().await.map_err(BackendError::Io)?;
        match serde_json::from_slice::<Value>(&output) {
            Ok(payload) => {
                if !status.success() {
                    tracing::warn!(%invocation, %status, "extractor reported failure");
                }
                Ok(payload)
            }
            Err(_) if !status.success() => Err(BackendError::Exited { status }),
            Err(err) => Err(BackendError::Decode(err.to_string())),
        }
    }
}

/// Boots the application inside the server process, fresh for every call.
#[derive(Debug, Clone)]
pub struct InProcessBackend<B> {
    bootstrap: B,
}

impl<B: Bootstrap> InProcessBackend<B> {
    #[must_use]
    pub const fn new(bootstrap: B) -> Self {
        Self { bootstrap }
    }
}

impl<B: Bootstrap + 'static> Backend for InProcessBackend<B> {
    async fn invoke(&self, invocation: Invocation) -> Result<Value, BackendError> {
        let payload = execute(
            &self.bootstrap,
            Some(invocation.category.plural()),
            Some(invocation.command),
            invocation.argument.as_deref(),
        )
        .await?;
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_args_follow_extractor_order() {
        let list = Invocation::new(Category::Enum, "list");
        assert_eq!(list.args(), vec!["enums", "list"]);

        let schema = Invocation::new(Category::Model, "schema").with_argument("Accounts/IraAccount");
        assert_eq!(schema.args(), vec!["models", "schema", "Accounts/IraAccount"]);
        assert_eq!(schema.to_string(), "models schema \"Accounts/IraAccount\"");
    }

    #[test]
    fn empty_argument_is_forwarded() {
        let search = Invocation::new(Category::Model, "search").with_argument("");
        assert_eq!(search.args(), vec!["models", "search", ""]);
    }

    #[test]
    fn absent_argument_is_left_out() {
        let details = Invocation::new(Category::Enum, "details").with_optional_argument(None);
        assert_eq!(details.args(), vec!["enums", "details"]);
        assert_eq!(details, Invocation::new(Category::Enum, "details"));
    }

    #[test]
    fn relative_entry_resolves_against_root() {
        let backend = ProcessBackend::new("/srv/app", "target/release/inspect");
        assert_eq!(backend.entry(), Path::new("/srv/app/target/release/inspect"));
        assert_eq!(backend.root(), Path::new("/srv/app"));
    }
}
