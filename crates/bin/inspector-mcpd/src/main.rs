//! Daemon entry point for the app-inspector MCP server.
//!
//! Resolves the target application from arguments and the environment,
//! verifies its extractor exists, and serves the MCP protocol over stdio or
//! streamable HTTP.

mod config;

use std::process::ExitCode;
use std::sync::Arc;

use inspector_mcp::backend::ProcessBackend;
use inspector_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use crate::config::InspectorConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match InspectorConfig::from_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("inspector-mcpd: {err}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.log);

    if let Err(err) = config.ensure_entry() {
        println!("{}", json!({ "error": err.to_string() }));
        return ExitCode::FAILURE;
    }

    let backend = Arc::new(
        ProcessBackend::new(&config.app_root, &config.entry)
            .with_max_output_bytes(config.max_output_bytes),
    );
    tracing::info!(root = %config.app_root.display(), http = config.http, "starting MCP server");

    let served = if config.http {
        serve_streamable_http(backend, McpHttpServerConfig::new(config.http_addr)).await
    } else {
        serve_stdio(backend).await
    };
    match served {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "MCP server stopped");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout belongs to the protocol.
fn init_tracing(directives: &str) {
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
