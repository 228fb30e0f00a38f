use std::borrow::Cow;

use inspector_records::schema::FIELD_ERROR;
use rmcp::ErrorData;
use rmcp::model::{Content, ErrorCode};
use serde_json::{Value, json};

use crate::backend::BackendError;

pub fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

/// Folds a backend failure into the `{error}` payload callers expect.
pub fn error_payload(err: &BackendError) -> Value {
    json!({ FIELD_ERROR: err.to_string() })
}

/// Pretty-printed JSON text content.
pub fn json_text(payload: &Value) -> Result<Content, ErrorData> {
    serde_json::to_string_pretty(payload)
        .map(Content::text)
        .map_err(|err| mcp_err(ErrorCode::INTERNAL_ERROR, format!("failed to encode result: {err}")))
}
