//! Transports for the inspector tool server.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use rmcp::serve_server;
use rmcp::transport::io::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig,
    StreamableHttpService,
    session::local::LocalSessionManager,
};

use crate::InspectorMcp;
use crate::backend::Backend;

pub const DEFAULT_HTTP_PORT: u16 = 4020;
pub const MCP_PATH: &str = "/mcp";
pub const HEALTH_PATH: &str = "/health";

type ServeResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Streamable HTTP settings.
#[derive(Debug, Clone)]
pub struct McpHttpServerConfig {
    pub addr: SocketAddr,
    pub stateful_mode: bool,
    pub sse_keep_alive: Option<Duration>,
}

impl McpHttpServerConfig {
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            stateful_mode: true,
            sse_keep_alive: Some(Duration::from_secs(15)),
        }
    }

    /// Stateless mode answers every request without a session.
    #[must_use]
    pub const fn stateless(mut self) -> Self {
        self.stateful_mode = false;
        self
    }

    fn transport(&self) -> StreamableHttpServerConfig {
        StreamableHttpServerConfig {
            sse_keep_alive: self.sse_keep_alive,
            stateful_mode: self.stateful_mode,
            ..StreamableHttpServerConfig::default()
        }
    }
}

impl Default for McpHttpServerConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_HTTP_PORT)))
    }
}

/// Runs one tool server on stdin/stdout until the client disconnects.
///
/// # Errors
/// Returns any transport or server error.
pub async fn serve_stdio<B: Backend>(backend: Arc<B>) -> ServeResult {
    let running = serve_server(InspectorMcp::with_backend(backend), stdio()).await?;
    let reason = running.waiting().await?;
    tracing::debug!(?reason, "stdio session ended");
    Ok(())
}

/// Routes `/mcp` to per-session tool servers sharing one backend, plus a
/// plain `/health` check.
#[must_use]
pub fn router<B: Backend>(backend: Arc<B>, config: &McpHttpServerConfig) -> Router {
    let sessions = StreamableHttpService::new(
        move || Ok(InspectorMcp::with_backend(Arc::clone(&backend))),
        Arc::new(LocalSessionManager::default()),
        config.transport(),
    );
    Router::new()
        .route(HEALTH_PATH, get(|| async { "ok" }))
        .nest_service(MCP_PATH, sessions)
}

/// Serves [`router`] on the configured address until ctrl-c.
///
/// # Errors
/// Returns any bind or server error.
pub async fn serve_streamable_http<B: Backend>(
    backend: Arc<B>,
    config: McpHttpServerConfig,
) -> ServeResult {
    let app = router(backend, &config);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %listener.local_addr()?, path = MCP_PATH, "serving streamable HTTP");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %err, "ctrl-c handler unavailable");
                std::future::pending::<()>().await;
            }
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_stateful_loopback() {
        let config = McpHttpServerConfig::default();
        assert_eq!(config.addr.to_string(), "127.0.0.1:4020");
        assert!(config.stateful_mode);
        assert!(!config.stateless().transport().stateful_mode);
    }
}
