use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;
use surrealdb::{Connection, Surreal};

use super::{SchemaBackend, SchemaError, SchemaResult};

/// Clauses that may follow the type expression in a field definition.
const FIELD_CLAUSES: [&str; 9] = [
    "DEFAULT",
    "VALUE",
    "ASSERT",
    "READONLY",
    "PERMISSIONS",
    "COMMENT",
    "REFERENCE",
    "COMPUTED",
    "FLEXIBLE",
];

#[derive(Debug, Default, Deserialize)]
struct DbInfo {
    #[serde(default)]
    tables: IndexMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct TableInfo {
    #[serde(default)]
    fields: IndexMap<String, String>,
}

/// Schema backend reading table and field definitions from `SurrealDB`.
pub struct SurrealSchema<C: Connection> {
    db: Arc<Surreal<C>>,
}

impl<C: Connection> Clone for SurrealSchema<C> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

impl<C: Connection> SurrealSchema<C> {
    #[must_use]
    pub fn new(db: Surreal<C>) -> Self {
        Self { db: Arc::new(db) }
    }

    #[must_use]
    pub const fn from_arc(db: Arc<Surreal<C>>) -> Self {
        Self { db }
    }

    async fn db_info(&self) -> SchemaResult<DbInfo> {
        let mut response = self.db.query("INFO FOR DB;").await?;
        let info: Option<serde_json::Value> = response.take(0)?;
        Ok(decode_info::<DbInfo>(info)?.unwrap_or_default())
    }

    async fn table_info(&self, table: &str) -> SchemaResult<TableInfo> {
        ensure_identifier(table)?;
        let query = format!("INFO FOR TABLE {table};");
        let mut response = self.db.query(query).await?;
        let info: Option<serde_json::Value> = response.take(0)?;
        decode_info::<TableInfo>(info)?.ok_or_else(|| SchemaError::UnknownTable(table.to_string()))
    }
}

impl<C: Connection> SchemaBackend for SurrealSchema<C> {
    async fn has_table(&self, table: &str) -> SchemaResult<bool> {
        Ok(self.db_info().await?.tables.contains_key(table))
    }

    async fn column_listing(&self, table: &str) -> SchemaResult<Vec<String>> {
        let info = self.table_info(table).await?;
        Ok(info
            .fields
            .into_keys()
            .filter(|name| is_top_level_field(name))
            .collect())
    }

    async fn column_type(&self, table: &str, column: &str) -> SchemaResult<String> {
        let info = self.table_info(table).await?;
        let Some(definition) = info.fields.get(column) else {
            return Err(SchemaError::UnknownColumn {
                table: table.to_string(),
                column: column.to_string(),
            });
        };
        field_type(definition).ok_or_else(|| SchemaError::UntypedColumn {
            table: table.to_string(),
            column: column.to_string(),
        })
    }
}

fn decode_info<T: serde::de::DeserializeOwned>(
    value: Option<serde_json::Value>,
) -> SchemaResult<Option<T>> {
    value
        .map(serde_json::from_value)
        .transpose()
        .map_err(|err| SchemaError::Unavailable(err.to_string()))
}

fn ensure_identifier(name: &str) -> SchemaResult<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|ch| ch.is_ascii_alphabetic() || ch == '_');
    if valid_start && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
        Ok(())
    } else {
        Err(SchemaError::InvalidIdentifier(name.to_string()))
    }
}

/// Nested paths such as `address.city` or `tags[*]` describe parts of a column.
fn is_top_level_field(name: &str) -> bool {
    !name.contains('.') && !name.contains('[')
}

/// Extracts the type expression from a `DEFINE FIELD ... TYPE <type> ...` statement.
fn field_type(definition: &str) -> Option<String> {
    let start = definition.find(" TYPE ")? + " TYPE ".len();
    let rest = &definition[start..];
    let end = FIELD_CLAUSES
        .iter()
        .filter_map(|clause| rest.find(&format!(" {clause}")))
        .min()
        .unwrap_or(rest.len());
    let ty = rest[..end].trim().trim_end_matches(';').trim();
    if ty.is_empty() {
        None
    } else {
        Some(ty.to_string())
    }
}
