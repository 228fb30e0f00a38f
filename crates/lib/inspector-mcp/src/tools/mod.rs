//! MCP tool modules.
//!
//! Tools are grouped by category: data models, enums, and contextual help.

pub mod enums;
pub mod models;
mod context;
