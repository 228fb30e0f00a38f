//! Database schema access used to describe model columns.
//!
//! A backend answers three questions: does a table exist, which columns does
//! it have, and what is one column's declared type. Failures on the last one
//! degrade that column to `unknown`; the backend does not distinguish an
//! unsupported user-defined type from unreachable column metadata.

pub mod memory;
pub mod surreal;

use std::error::Error;
use std::fmt;
use std::future::Future;

pub use memory::StaticSchema;
pub use surreal::SurrealSchema;

#[derive(Debug)]
pub enum SchemaError {
    Surreal(Box<surrealdb::Error>),
    Unavailable(String),
    InvalidIdentifier(String),
    UnknownTable(String),
    UnknownColumn { table: String, column: String },
    UntypedColumn { table: String, column: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surreal(err) => write!(f, "SurrealDB error: {err}"),
            Self::Unavailable(message) => write!(f, "schema unavailable: {message}"),
            Self::InvalidIdentifier(name) => write!(f, "invalid identifier: {name}"),
            Self::UnknownTable(table) => write!(f, "unknown table: {table}"),
            Self::UnknownColumn { table, column } => {
                write!(f, "unknown column: {table}.{column}")
            }
            Self::UntypedColumn { table, column } => {
                write!(f, "column {table}.{column} has no declared type")
            }
        }
    }
}

impl Error for SchemaError {}

impl From<surrealdb::Error> for SchemaError {
    fn from(err: surrealdb::Error) -> Self {
        Self::Surreal(Box::new(err))
    }
}

pub type SchemaResult<T> = Result<T, SchemaError>;

/// Read-only access to the application's table definitions.
pub trait SchemaBackend: Send + Sync {
    fn has_table(&self, table: &str) -> impl Future<Output = SchemaResult<bool>> + Send;

    /// Column names of an existing table.
    fn column_listing(&self, table: &str)
    -> impl Future<Output = SchemaResult<Vec<String>>> + Send;

    fn column_type(
        &self,
        table: &str,
        column: &str,
    ) -> impl Future<Output = SchemaResult<String>> + Send;
}
