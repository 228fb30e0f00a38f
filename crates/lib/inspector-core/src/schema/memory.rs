use indexmap::IndexMap;

use super::{SchemaBackend, SchemaError, SchemaResult};

/// Schema held in memory, for applications that declare their tables statically.
#[derive(Debug, Clone)]
pub struct StaticSchema {
    reachable: bool,
    tables: IndexMap<String, IndexMap<String, Option<String>>>,
}

impl Default for StaticSchema {
    fn default() -> Self {
        Self {
            reachable: true,
            tables: IndexMap::new(),
        }
    }
}

impl StaticSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A schema whose every lookup fails as if the database were down.
    #[must_use]
    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            tables: IndexMap::new(),
        }
    }

    /// Adds a table; a `None` column type makes that column's type lookup fail.
    #[must_use]
    pub fn with_table<I, N, T>(mut self, table: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = (N, Option<T>)>,
        N: Into<String>,
        T: Into<String>,
    {
        let columns = columns
            .into_iter()
            .map(|(name, ty)| (name.into(), ty.map(Into::into)))
            .collect();
        self.tables.insert(table.into(), columns);
        self
    }

    fn ensure_reachable(&self) -> SchemaResult<()> {
        if self.reachable {
            Ok(())
        } else {
            Err(SchemaError::Unavailable("connection refused".to_string()))
        }
    }

    fn table(&self, table: &str) -> SchemaResult<&IndexMap<String, Option<String>>> {
        self.ensure_reachable()?;
        self.tables
            .get(table)
            .ok_or_else(|| SchemaError::UnknownTable(table.to_string()))
    }
}

impl SchemaBackend for StaticSchema {
    async fn has_table(&self, table: &str) -> SchemaResult<bool> {
        self.ensure_reachable()?;
        Ok(self.tables.contains_key(table))
    }

    async fn column_listing(&self, table: &str) -> SchemaResult<Vec<String>> {
        Ok(self.table(table)?.keys().cloned().collect())
    }

    async fn column_type(&self, table: &str, column: &str) -> SchemaResult<String> {
        match self.table(table)?.get(column) {
            Some(Some(ty)) => Ok(ty.clone()),
            Some(None) => Err(SchemaError::UntypedColumn {
                table: table.to_string(),
                column: column.to_string(),
            }),
            None => Err(SchemaError::UnknownColumn {
                table: table.to_string(),
                column: column.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> StaticSchema {
        StaticSchema::new().with_table(
            "users",
            [("id", Some("integer")), ("email", Some("varchar")), ("meta", None)],
        )
    }

    #[tokio::test]
    async fn lists_columns_in_declaration_order() {
        let schema = schema();
        assert!(schema.has_table("users").await.expect("reachable"));
        assert!(!schema.has_table("posts").await.expect("reachable"));
        assert_eq!(
            schema.column_listing("users").await.expect("table exists"),
            vec!["id", "email", "meta"]
        );
    }

    #[tokio::test]
    async fn untyped_column_fails_lookup() {
        let schema = schema();
        assert_eq!(
            schema.column_type("users", "email").await.expect("typed"),
            "varchar"
        );
        assert!(matches!(
            schema.column_type("users", "meta").await,
            Err(SchemaError::UntypedColumn { .. })
        ));
    }

    #[tokio::test]
    async fn unreachable_schema_fails_every_lookup() {
        let schema = StaticSchema::unreachable();
        assert!(schema.has_table("users").await.is_err());
    }
}
