//! Extractor entry point for a target application's inspection binary.
//!
//! ```no_run
//! # use inspector_core::runtime::Bootstrap;
//! # async fn demo(app: impl Bootstrap) -> std::process::ExitCode {
//! inspector_core::cli::run(app).await
//! # }
//! ```

use std::ffi::OsString;
use std::process::ExitCode;

use clap::Parser;
use inspector_records::schema::FIELD_ERROR;
use serde_json::{Value, json};

use crate::control::{Preflight, execute};
use crate::runtime::{Bootstrap, BootstrapError};

/// `<category> <command> [argument]`
#[derive(Debug, Parser)]
#[command(
    name = "inspect",
    about = "Prints model and enum metadata as JSON.",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct ExtractorArgs {
    /// `models` or `enums`.
    #[arg(allow_hyphen_values = true)]
    category: Option<String>,
    #[arg(allow_hyphen_values = true)]
    command: Option<String>,
    #[arg(allow_hyphen_values = true)]
    argument: Option<String>,
}

/// Runs one command from the process arguments and prints its result.
pub async fn run<B: Bootstrap>(bootstrap: B) -> ExitCode {
    run_with_args(&bootstrap, std::env::args_os()).await
}

/// Runs one command from `args`, whose first item is the program name.
pub async fn run_with_args<B, I, T>(bootstrap: &B, args: I) -> ExitCode
where
    B: Bootstrap,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match evaluate(bootstrap, args).await {
        Ok(payload) => {
            print_json(&payload);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "application failed to boot");
            print_json(&json!({ FIELD_ERROR: err.to_string() }));
            ExitCode::FAILURE
        }
    }
}

/// Parses `args` and produces the payload a run would print.
///
/// # Errors
/// Returns `BootstrapError` if the application could not be booted.
pub async fn evaluate<B, I, T>(bootstrap: &B, args: I) -> Result<Value, BootstrapError>
where
    B: Bootstrap,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let Ok(args) = ExtractorArgs::try_parse_from(args) else {
        return Ok(Preflight::Help(None).to_payload());
    };
    execute(
        bootstrap,
        args.category.as_deref(),
        args.command.as_deref(),
        args.argument.as_deref(),
    )
    .await
}

fn print_json(payload: &Value) {
    match serde_json::to_string_pretty(payload) {
        Ok(text) => println!("{text}"),
        Err(err) => println!("{{\"error\":\"failed to encode result: {err}\"}}"),
    }
}
