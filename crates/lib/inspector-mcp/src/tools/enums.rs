use inspector_core::Category;
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::InspectorMcp;
use crate::backend::{Backend, Invocation};

/// Parameters naming one enum.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct EnumParams {
    /// Enum name as listed, e.g. `AccountType` or `Billing/Currency`.
    #[serde(rename = "enum")]
    #[schemars(required)]
    pub name: Option<String>,
}

/// Parameters for searching enums by name.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchEnumsParams {
    /// Case-insensitive substring matched against enum names.
    #[schemars(required)]
    pub query: Option<String>,
}

#[tool_router(router = tool_router_enums, vis = "pub")]
impl<B: Backend> InspectorMcp<B> {
    #[tool(description = "List all enums in the application with their backing type and case count.")]
    async fn list_enums(&self) -> Result<CallToolResult, ErrorData> {
        self.run(Invocation::new(Category::Enum, "list")).await
    }

    #[tool(description = "Get full details for an enum: cases with values and attributes, methods, traits and interfaces.")]
    async fn get_enum_details(
        &self,
        Parameters(params): Parameters<EnumParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let invocation =
            Invocation::new(Category::Enum, "details").with_optional_argument(params.name);
        self.run(invocation).await
    }

    #[tool(description = "Get just the case names and values for an enum. Quick lookup for valid values.")]
    async fn get_enum_values(
        &self,
        Parameters(params): Parameters<EnumParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let invocation =
            Invocation::new(Category::Enum, "values").with_optional_argument(params.name);
        self.run(invocation).await
    }

    #[tool(description = "Search enums by name (case-insensitive substring match).")]
    async fn search_enums(
        &self,
        Parameters(params): Parameters<SearchEnumsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let invocation =
            Invocation::new(Category::Enum, "search").with_optional_argument(params.query);
        self.run(invocation).await
    }
}
