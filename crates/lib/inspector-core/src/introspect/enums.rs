//! Records and value projections for enumerated types.

use indexmap::IndexMap;
use inspector_records::{
    AnnotationRecord,
    BackingType,
    BackingValue,
    EnumCase,
    EnumRecord,
    EnumSummary,
    EnumValueSet,
    EnumValues,
    MethodInfo,
    ParameterInfo,
};
use serde_json::Value;

use super::model::mixin_names;
use super::{Extraction, resolve};
use crate::catalog::CatalogScanner;
use crate::describe::{CaseDef, Enumeration, MethodDef, Origin, ParamDef};
use crate::error::InspectError;
use crate::registry::{Category, EnumBinding};
use crate::runtime::Application;
use crate::schema::SchemaBackend;
use crate::search::filter_catalog;

/// Everything an enum reports about itself.
#[derive(Debug)]
pub struct EnumManifest {
    pub backing: Option<BackingType>,
    pub cases: Vec<CaseDef>,
    pub methods: Vec<MethodDef>,
    pub mixins: Vec<&'static str>,
    pub interfaces: Vec<&'static str>,
}

pub(crate) fn manifest_of<E: Enumeration>() -> EnumManifest {
    EnumManifest {
        backing: E::backing(),
        cases: E::cases(),
        methods: E::methods(),
        mixins: E::mixins(),
        interfaces: E::interfaces(),
    }
}

/// Lists, searches and describes the application's enums.
pub struct EnumIntrospector<'a, S> {
    app: &'a Application<S>,
}

impl<'a, S: SchemaBackend> EnumIntrospector<'a, S> {
    #[must_use]
    pub const fn new(app: &'a Application<S>) -> Self {
        Self { app }
    }

    /// Enums found under the enums directory, sorted by display name.
    ///
    /// # Errors
    /// Returns `InspectError::MissingCatalog` if the enums directory does not exist.
    pub fn list(&self) -> Result<Vec<EnumSummary>, InspectError> {
        let config = self.app.config();
        let root = self.app.enums_root();
        let entries = CatalogScanner::for_layout(&root, &config.enums, &config.extension)
            .scan(self.app.registry(), Category::Enum)
            .ok_or_else(|| InspectError::MissingCatalog {
                category: Category::Enum,
                path: root.clone(),
            })?;

        let registry = self.app.registry();
        Ok(entries
            .into_iter()
            .filter_map(|entry| {
                let manifest = registry.enumeration(&entry.qualified_name).ok()?.manifest();
                Some(EnumSummary {
                    entry,
                    backing_type: manifest.backing,
                    case_count: manifest.cases.len(),
                })
            })
            .collect())
    }

    /// Catalog entries whose display name contains `query`, ignoring case.
    ///
    /// # Errors
    /// Returns `InspectError::MissingCatalog` if the enums directory does not exist.
    pub fn search(&self, query: &str) -> Result<Vec<EnumSummary>, InspectError> {
        Ok(filter_catalog(self.list()?, query))
    }

    /// Resolves a display or namespaced name to a registered enum.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<(String, EnumBinding)> {
        let registry = self.app.registry();
        resolve(&self.app.config().enums.namespace, name, |candidate| {
            registry.enumeration(candidate)
        })
    }

    fn manifest(&self, name: &str) -> Result<(String, EnumManifest), InspectError> {
        self.resolve(name)
            .map(|(qualified_name, binding)| (qualified_name, binding.manifest()))
            .ok_or_else(|| InspectError::NotFound {
                category: Category::Enum,
                name: name.to_string(),
            })
    }

    /// Builds the full record for one enum.
    ///
    /// # Errors
    /// Returns `InspectError::NotFound` for unknown names and
    /// `InspectError::Failed` if a case is inconsistent with the backing type.
    pub fn details(&self, name: &str) -> Result<EnumRecord, InspectError> {
        let (qualified_name, manifest) = self.manifest(name)?;

        let mut cases = Vec::with_capacity(manifest.cases.len());
        for case in &manifest.cases {
            let value = case_value(manifest.backing, case)
                .map_err(|message| InspectError::failed(Category::Enum, name, message))?;
            let annotations = annotations_of(case);
            annotations.report(&qualified_name, case.name);
            cases.push(EnumCase {
                name: case.name.to_string(),
                value,
                annotations: annotations.into_items(),
            });
        }

        let methods = manifest
            .methods
            .iter()
            .filter(|method| method.origin == Origin::Own)
            .map(method_info)
            .collect();

        Ok(EnumRecord {
            name: name.to_string(),
            qualified_name,
            backing_type: manifest.backing,
            cases,
            methods,
            mixins: mixin_names(manifest.mixins),
            implemented_capabilities: mixin_names(manifest.interfaces),
        })
    }

    /// Case values: a name-to-value mapping when backed, case names otherwise.
    ///
    /// # Errors
    /// Returns `InspectError::NotFound` for unknown names and
    /// `InspectError::Failed` if a case is inconsistent with the backing type.
    pub fn values(&self, name: &str) -> Result<EnumValues, InspectError> {
        let (qualified_name, manifest) = self.manifest(name)?;

        let values = if manifest.backing.is_some() {
            let mut values = IndexMap::with_capacity(manifest.cases.len());
            for case in &manifest.cases {
                let value = case_value(manifest.backing, case)
                    .map_err(|message| InspectError::failed(Category::Enum, name, message))?;
                if let Some(value) = value {
                    values.insert(case.name.to_string(), value);
                }
            }
            EnumValueSet::Backed(values)
        } else {
            EnumValueSet::Pure(
                manifest
                    .cases
                    .iter()
                    .map(|case| case.name.to_string())
                    .collect(),
            )
        };

        Ok(EnumValues {
            name: name.to_string(),
            qualified_name,
            backing_type: manifest.backing,
            values,
        })
    }
}

/// Backing value of a case, present iff the enum is backed.
fn case_value(
    backing: Option<BackingType>,
    case: &CaseDef,
) -> Result<Option<BackingValue>, String> {
    let Some(backing) = backing else {
        return Ok(None);
    };
    match &case.value {
        Some(value) if value.backing_type() == backing => Ok(Some(value.clone())),
        Some(value) => Err(format!(
            "Case {} has a {} value but the enum is backed by {backing}",
            case.name,
            value.backing_type()
        )),
        None => Err(format!("Case {} has no {backing} backing value", case.name)),
    }
}

fn annotations_of(case: &CaseDef) -> Extraction<AnnotationRecord> {
    let mut extraction = Extraction::default();
    for annotation in &case.annotations {
        match annotation.instantiate() {
            Ok(Value::Object(mut properties)) => {
                if properties.remove("name").is_some() {
                    tracing::debug!(
                        annotation = annotation.name,
                        "dropped property shadowing the annotation name"
                    );
                }
                extraction.take(AnnotationRecord {
                    name: annotation.name.to_string(),
                    properties,
                });
            }
            Ok(Value::Null) => extraction.take(AnnotationRecord {
                name: annotation.name.to_string(),
                properties: serde_json::Map::new(),
            }),
            Ok(other) => extraction.skip(
                annotation.name,
                format!("annotation produced {other} instead of an object"),
            ),
            Err(err) => extraction.skip(annotation.name, err),
        }
    }
    extraction
}

fn method_info(method: &MethodDef) -> MethodInfo {
    MethodInfo {
        name: method.name.to_string(),
        is_static: method.is_static,
        parameters: method.params.iter().map(parameter_info).collect(),
        return_type: method.returns.as_ref().map(ToString::to_string),
    }
}

fn parameter_info(param: &ParamDef) -> ParameterInfo {
    ParameterInfo {
        name: param.name.to_string(),
        type_name: param.ty.as_ref().map(ToString::to_string),
        default_value: if param.optional {
            param.default.clone()
        } else {
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::describe::{AnnotationDef, AnnotationError, TypeExpr};

    #[test]
    fn pure_enums_never_expose_values() {
        let case = CaseDef::backed("Draft", "draft");
        assert_eq!(case_value(None, &case), Ok(None));
    }

    #[test]
    fn backed_case_must_match_backing_type() {
        let case = CaseDef::backed("Draft", "draft");
        assert_eq!(
            case_value(Some(BackingType::String), &case),
            Ok(Some(BackingValue::from("draft")))
        );
        assert!(case_value(Some(BackingType::Int), &case).is_err());
        assert!(case_value(Some(BackingType::Int), &CaseDef::pure("Draft")).is_err());
    }

    #[test]
    fn failing_annotations_are_skipped() {
        let case = CaseDef::pure("Checking")
            .annotated(AnnotationDef::with("Label", || Ok(json!({ "text": "Checking" }))))
            .annotated(AnnotationDef::with("Broken", || {
                Err(AnnotationError::new("missing argument"))
            }))
            .annotated(AnnotationDef::with("Scalar", || Ok(json!(3))));

        let extraction = annotations_of(&case);
        let names: Vec<&str> = extraction
            .items()
            .iter()
            .map(|record| record.name.as_str())
            .collect();
        assert_eq!(names, vec!["Label"]);
        assert_eq!(extraction.skipped().len(), 2);
    }

    #[test]
    fn parameter_default_requires_optional_flag() {
        let mut param = ParamDef::new("short")
            .typed(TypeExpr::Union(vec!["bool", "null"]))
            .with_default(Value::Null);
        let info = parameter_info(&param);
        assert_eq!(info.type_name.as_deref(), Some("bool|null"));
        assert_eq!(info.default_value, Some(Value::Null));

        param.optional = false;
        assert_eq!(parameter_info(&param).default_value, None);
    }
}
