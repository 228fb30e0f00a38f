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

/// Parameters for fetching one model's schema.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ModelSchemaParams {
    /// Model name as listed, e.g. `User` or `Accounts/IraAccount`.
    #[schemars(required)]
    pub model: Option<String>,
}

/// Parameters for searching models by name.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchModelsParams {
    /// Case-insensitive substring matched against model names.
    #[schemars(required)]
    pub query: Option<String>,
}

#[tool_router(router = tool_router_models, vis = "pub")]
impl<B: Backend> InspectorMcp<B> {
    #[tool(description = "List all data models in the application with their fully qualified names.")]
    async fn list_models(&self) -> Result<CallToolResult, ErrorData> {
        self.run(Invocation::new(Category::Model, "list")).await
    }

    #[tool(description = "Get the complete schema for a model: table, primary key, columns with types, casts, fillable/guarded/hidden attributes, relationships and traits.")]
    async fn get_model_schema(
        &self,
        Parameters(params): Parameters<ModelSchemaParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let invocation =
            Invocation::new(Category::Model, "schema").with_optional_argument(params.model);
        self.run(invocation).await
    }

    #[tool(description = "Search models by name (case-insensitive substring match).")]
    async fn search_models(
        &self,
        Parameters(params): Parameters<SearchModelsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let invocation =
            Invocation::new(Category::Model, "search").with_optional_argument(params.query);
        self.run(invocation).await
    }
}
