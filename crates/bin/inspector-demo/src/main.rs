use std::process::ExitCode;

use inspector_demo::DemoApp;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries the JSON payload.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("INSPECTOR_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    inspector_core::cli::run(DemoApp::from_env()).await
}
