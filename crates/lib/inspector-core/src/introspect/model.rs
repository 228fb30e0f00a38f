//! Schema records for data-model types.

use indexmap::IndexMap;
use inspector_records::schema::{UNKNOWN_COLUMN_TYPE, basename};
use inspector_records::{CatalogEntry, ColumnInfo, KeyType, ModelSchemaRecord, RelationshipInfo};

use super::{Extraction, resolve};
use crate::catalog::CatalogScanner;
use crate::describe::Model;
use crate::error::InspectError;
use crate::registry::{Category, ModelBinding};
use crate::runtime::Application;
use crate::schema::SchemaBackend;
use crate::search::filter_catalog;

/// Everything read from a freshly constructed model instance.
#[derive(Debug, Clone)]
pub struct ModelSnapshot {
    pub table: String,
    pub key_name: String,
    pub key_type: KeyType,
    pub incrementing: bool,
    pub timestamps: bool,
    pub casts: IndexMap<String, String>,
    pub fillable: Vec<String>,
    pub guarded: Vec<String>,
    pub hidden: Vec<String>,
    pub relationships: Extraction<(String, RelationshipInfo)>,
    pub mixins: Vec<String>,
}

pub(crate) fn snapshot_of<T: Model>() -> ModelSnapshot {
    let instance = T::default();
    let key_name = instance.key_name();
    let key_type = instance.key_type();
    let incrementing = instance.incrementing();

    // Incrementing keys are cast to their key type ahead of declared casts.
    let mut casts = IndexMap::new();
    if incrementing {
        casts.insert(key_name.clone(), key_type.to_string());
    }
    casts.extend(instance.casts());

    ModelSnapshot {
        table: instance.table(),
        key_name,
        key_type,
        incrementing,
        timestamps: instance.timestamps(),
        casts,
        fillable: instance.fillable(),
        guarded: instance.guarded(),
        hidden: instance.hidden(),
        relationships: relationships_of(&instance),
        mixins: mixin_names(T::mixins()),
    }
}

fn relationships_of<T: Model>(instance: &T) -> Extraction<(String, RelationshipInfo)> {
    let mut extraction = Extraction::default();
    for method in T::methods() {
        let Some(declared) = method.relationship_kind() else {
            continue;
        };
        match method.resolve(instance) {
            Ok(relation) if relation.kind != declared => extraction.skip(
                method.name,
                format!("declared {declared} but resolved {}", relation.kind),
            ),
            Ok(relation) => extraction.take((
                method.name.to_string(),
                RelationshipInfo {
                    kind: declared,
                    related_qualified_name: relation.related,
                },
            )),
            Err(err) => extraction.skip(method.name, err),
        }
    }
    extraction
}

/// Basic names of mixins, first occurrence wins.
pub(crate) fn mixin_names(paths: Vec<&'static str>) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(paths.len());
    for path in paths {
        let name = basename(path);
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Lists, searches and describes the application's models.
pub struct ModelIntrospector<'a, S> {
    app: &'a Application<S>,
}

impl<'a, S: SchemaBackend> ModelIntrospector<'a, S> {
    #[must_use]
    pub const fn new(app: &'a Application<S>) -> Self {
        Self { app }
    }

    /// Concrete models found under the models directory, sorted by display name.
    ///
    /// # Errors
    /// Returns `InspectError::MissingCatalog` if the models directory does not exist.
    pub fn list(&self) -> Result<Vec<CatalogEntry>, InspectError> {
        let config = self.app.config();
        let root = self.app.models_root();
        CatalogScanner::for_layout(&root, &config.models, &config.extension)
            .scan(self.app.registry(), Category::Model)
            .ok_or_else(|| InspectError::MissingCatalog {
                category: Category::Model,
                path: root.clone(),
            })
    }

    /// Catalog entries whose display name contains `query`, ignoring case.
    ///
    /// # Errors
    /// Returns `InspectError::MissingCatalog` if the models directory does not exist.
    pub fn search(&self, query: &str) -> Result<Vec<CatalogEntry>, InspectError> {
        Ok(filter_catalog(self.list()?, query))
    }

    /// Resolves a display or namespaced name to a registered model.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<(String, ModelBinding)> {
        let registry = self.app.registry();
        resolve(&self.app.config().models.namespace, name, |candidate| {
            registry.model(candidate)
        })
    }

    /// Builds the schema record for one model.
    ///
    /// # Errors
    /// Returns `InspectError::NotFound` for unknown names and
    /// `InspectError::Failed` if the record cannot be assembled.
    pub async fn schema(&self, name: &str) -> Result<ModelSchemaRecord, InspectError> {
        let Some((qualified_name, binding)) = self.resolve(name) else {
            return Err(InspectError::NotFound {
                category: Category::Model,
                name: name.to_string(),
            });
        };
        if binding.is_abstract() {
            return Err(InspectError::failed(
                Category::Model,
                name,
                format!("Cannot instantiate abstract model {qualified_name}"),
            ));
        }

        let snapshot = binding.snapshot();
        let columns = self
            .columns(&snapshot.table)
            .await
            .map_err(|message| InspectError::failed(Category::Model, name, message))?;
        snapshot
            .relationships
            .report(&qualified_name, "relationships");

        Ok(ModelSchemaRecord {
            name: name.to_string(),
            qualified_name,
            table_name: snapshot.table,
            primary_key_name: snapshot.key_name,
            primary_key_type: snapshot.key_type,
            is_auto_incrementing: snapshot.incrementing,
            uses_timestamps: snapshot.timestamps,
            columns,
            casts: snapshot.casts,
            fillable_attributes: snapshot.fillable,
            guarded_attributes: snapshot.guarded,
            hidden_attributes: snapshot.hidden,
            relationships: snapshot.relationships.into_items().into_iter().collect(),
            mixins: snapshot.mixins,
        })
    }

    /// Columns of `table` with their declared types.
    ///
    /// An unreachable database or a missing table yields no columns. A column
    /// whose type cannot be read is reported as `unknown`.
    async fn columns(&self, table: &str) -> Result<IndexMap<String, ColumnInfo>, String> {
        let mut columns = IndexMap::new();
        let Some(schema) = self.app.schema() else {
            return Ok(columns);
        };

        match schema.has_table(table).await {
            Ok(true) => {}
            Ok(false) => return Ok(columns),
            Err(err) => {
                tracing::warn!(table, error = %err, "schema unreachable, columns omitted");
                return Ok(columns);
            }
        }

        let listing = schema
            .column_listing(table)
            .await
            .map_err(|err| err.to_string())?;
        for column in listing {
            let column_type = match schema.column_type(table, &column).await {
                Ok(column_type) => column_type,
                Err(err) => {
                    tracing::warn!(table, column = %column, error = %err, "column type unknown");
                    UNKNOWN_COLUMN_TYPE.to_string()
                }
            };
            columns.insert(column, ColumnInfo { column_type });
        }
        Ok(columns)
    }
}
