//! MCP server implementation for app-inspector.
//!
//! This crate exposes model and enum introspection as rmcp tools. Each call is
//! forwarded to a [`backend::Backend`], which runs one extractor command
//! against a freshly booted application and returns its JSON result.

mod helpers;
mod tools;
pub mod backend;
pub mod server;

use std::sync::Arc;

use rmcp::{
    ErrorData,
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool,
    tool_handler,
    tool_router,
};
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use serde_json::Value;

use crate::backend::{Backend, Invocation};

const SERVER_INSTRUCTIONS: &str = r"app-inspector exposes the data models and enums of an application as structured JSON.

Workflow:
1. Discover what exists:
   - `list_models` returns every concrete model as `{name, class}` with a `total`.
   - `list_enums` returns every enum with its `backingType` and `caseCount`.
   - `search_models` / `search_enums` filter those lists by a case-insensitive substring.
2. Inspect one type, using the `name` from a listing (e.g. `User` or `Accounts/IraAccount`):
   - `get_model_schema` returns table, primary key, columns with types, casts,
     fillable/guarded/hidden attributes, relationships and traits.
   - `get_enum_details` returns cases with values and attributes, own methods, traits and interfaces.
   - `get_enum_values` returns only the case values (a mapping when backed, case names otherwise).

Notes:
- Every call inspects the live application; results are never cached.
- Failures come back as `{error}` payloads, with the requested `model` or `enum` echoed when one was given.
- Column types that cannot be read are reported as `unknown`.
- Use `help` for the command list. `health` returns `ok`.";

/// MCP server wrapper around an extractor backend and tool routers.
pub struct InspectorMcp<B> {
    tool_router: ToolRouter<Self>,
    backend: Arc<B>,
}

impl<B> Clone for InspectorMcp<B> {
    fn clone(&self) -> Self {
        Self {
            tool_router: self.tool_router.clone(),
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: Backend> InspectorMcp<B> {
    /// Creates a new server owning its backend.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_backend(Arc::new(backend))
    }

    /// Creates a new server using a shared backend handle.
    #[must_use]
    pub fn with_backend(backend: Arc<B>) -> Self {
        let tool_router = Self::tool_router_core()
            + Self::tool_router_models()
            + Self::tool_router_enums()
            + Self::tool_router_context();
        Self {
            tool_router,
            backend,
        }
    }

    /// Runs one extractor command, folding backend failures into `{error}`.
    pub async fn invoke(&self, invocation: Invocation) -> Value {
        match self.backend.invoke(invocation.clone()).await {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(%invocation, error = %err, "extractor call failed");
                helpers::error_payload(&err)
            }
        }
    }

    pub(crate) async fn run(&self, invocation: Invocation) -> Result<CallToolResult, ErrorData> {
        let payload = self.invoke(invocation).await;
        Ok(CallToolResult::success(vec![helpers::json_text(&payload)?]))
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl<B: Backend> InspectorMcp<B> {
    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

#[tool_handler]
impl<B: Backend> ServerHandler for InspectorMcp<B> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
