use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use inspector_records::schema::FIELD_ERROR;
use serde_json::{Map, Value};

use crate::registry::Category;

/// Per-operation failure, reported to the caller as an error payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectError {
    NotFound { category: Category, name: String },
    MissingCatalog { category: Category, path: PathBuf },
    Failed {
        category: Category,
        name: String,
        message: String,
    },
    Encode(String),
}

impl InspectError {
    #[must_use]
    pub fn failed(category: Category, name: &str, message: impl Into<String>) -> Self {
        Self::Failed {
            category,
            name: name.to_string(),
            message: message.into(),
        }
    }

    /// Error payload: `{error}` plus the requested name when there is one.
    #[must_use]
    pub fn to_payload(&self) -> Value {
        let mut payload = Map::new();
        payload.insert(FIELD_ERROR.to_string(), Value::String(self.to_string()));
        match self {
            Self::NotFound { category, name } | Self::Failed { category, name, .. } => {
                payload.insert(category.field().to_string(), Value::String(name.clone()));
            }
            Self::MissingCatalog { .. } | Self::Encode(_) => {}
        }
        Value::Object(payload)
    }
}

impl fmt::Display for InspectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { category, name } => {
                write!(f, "{} '{name}' not found", category.label())
            }
            Self::MissingCatalog { category, path } => {
                write!(f, "No {category} directory found at {}", path.display())
            }
            Self::Failed { message, .. } => f.write_str(message),
            Self::Encode(message) => write!(f, "failed to encode result: {message}"),
        }
    }
}

impl Error for InspectError {}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn not_found_payload_echoes_name_only() {
        let err = InspectError::NotFound {
            category: Category::Model,
            name: "DoesNotExist".to_string(),
        };
        assert_eq!(
            err.to_payload(),
            json!({ "error": "Model 'DoesNotExist' not found", "model": "DoesNotExist" })
        );
    }

    #[test]
    fn failure_payload_carries_message() {
        let err = InspectError::failed(Category::Enum, "Status", "case Draft has no value");
        assert_eq!(
            err.to_payload(),
            json!({ "error": "case Draft has no value", "enum": "Status" })
        );
    }
}
