use rmcp::{
    ErrorData,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::InspectorMcp;
use crate::backend::Backend;

/// Payload listing the MCP commands.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct HelpCommands {
    pub commands: Vec<String>,
}

impl Default for HelpCommands {
    fn default() -> Self {
        Self {
            commands: vec![
                "help - List MCP commands.".to_string(),
                "health - Health check.".to_string(),
                "list_models - List all models with their qualified names.".to_string(),
                "get_model_schema - Table, columns, casts, attributes and relationships of one model."
                    .to_string(),
                "search_models - Filter models by name.".to_string(),
                "list_enums - List all enums with backing type and case count.".to_string(),
                "get_enum_details - Cases, attributes, methods, traits and interfaces of one enum."
                    .to_string(),
                "get_enum_values - Case values of one enum.".to_string(),
                "search_enums - Filter enums by name.".to_string(),
            ],
        }
    }
}

#[tool_router(router = tool_router_context, vis = "pub")]
impl<B: Backend> InspectorMcp<B> {
    #[tool(description = "List the MCP commands offered by this server.")]
    async fn help(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::json(HelpCommands::default())?]))
    }
}
