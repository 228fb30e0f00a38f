use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A discoverable type within a catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(rename = "class")]
    pub qualified_name: String,
}

/// Catalog entry for an enumerated type, with its case summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnumSummary {
    #[serde(flatten)]
    pub entry: CatalogEntry,
    pub backing_type: Option<BackingType>,
    pub case_count: usize,
}

/// Access to the name a catalog is sorted and searched by.
pub trait Cataloged {
    fn display_name(&self) -> &str;
}

impl Cataloged for CatalogEntry {
    fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl Cataloged for EnumSummary {
    fn display_name(&self) -> &str {
        &self.entry.display_name
    }
}

/// Model catalog payload returned by `list` and `search`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelCatalog {
    pub models: Vec<CatalogEntry>,
    pub total: usize,
}

impl ModelCatalog {
    #[must_use]
    pub fn new(models: Vec<CatalogEntry>) -> Self {
        let total = models.len();
        Self { models, total }
    }
}

/// Enum catalog payload returned by `list` and `search`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnumCatalog {
    pub enums: Vec<EnumSummary>,
    pub total: usize,
}

impl EnumCatalog {
    #[must_use]
    pub fn new(enums: Vec<EnumSummary>) -> Self {
        let total = enums.len();
        Self { enums, total }
    }
}

/// Primary key type of a data model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum KeyType {
    Int,
    String,
    Other(String),
}

impl KeyType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Int => "int",
            Self::String => "string",
            Self::Other(other) => other,
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<KeyType> for String {
    fn from(value: KeyType) -> Self {
        value.as_str().to_string()
    }
}

impl From<String> for KeyType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "int" | "integer" => Self::Int,
            "string" => Self::String,
            _ => Self::Other(value),
        }
    }
}

/// The closed set of relationship kinds a model member can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationshipKind {
    HasOne,
    HasMany,
    BelongsTo,
    BelongsToMany,
    HasOneThrough,
    HasManyThrough,
    MorphOne,
    MorphMany,
    MorphTo,
    MorphToMany,
}

impl RelationshipKind {
    pub const ALL: [Self; 10] = [
        Self::HasOne,
        Self::HasMany,
        Self::BelongsTo,
        Self::BelongsToMany,
        Self::HasOneThrough,
        Self::HasManyThrough,
        Self::MorphOne,
        Self::MorphMany,
        Self::MorphTo,
        Self::MorphToMany,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HasOne => "hasOne",
            Self::HasMany => "hasMany",
            Self::BelongsTo => "belongsTo",
            Self::BelongsToMany => "belongsToMany",
            Self::HasOneThrough => "hasOneThrough",
            Self::HasManyThrough => "hasManyThrough",
            Self::MorphOne => "morphOne",
            Self::MorphMany => "morphMany",
            Self::MorphTo => "morphTo",
            Self::MorphToMany => "morphToMany",
        }
    }

    /// Whether the relationship is mediated by an intermediate table.
    #[must_use]
    pub const fn is_through(self) -> bool {
        matches!(self, Self::HasOneThrough | Self::HasManyThrough)
    }

    #[must_use]
    pub const fn is_polymorphic(self) -> bool {
        matches!(
            self,
            Self::MorphOne | Self::MorphMany | Self::MorphTo | Self::MorphToMany
        )
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of a single table column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnInfo {
    #[serde(rename = "type")]
    pub column_type: String,
}

/// A resolved relationship member of a model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelationshipInfo {
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
    #[serde(rename = "related")]
    pub related_qualified_name: String,
}

/// Normalized schema of one data-model type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelSchemaRecord {
    #[serde(rename = "model")]
    pub name: String,
    #[serde(rename = "class")]
    pub qualified_name: String,
    #[serde(rename = "table")]
    pub table_name: String,
    #[serde(rename = "primaryKey")]
    pub primary_key_name: String,
    #[serde(rename = "keyType")]
    pub primary_key_type: KeyType,
    #[serde(rename = "incrementing")]
    pub is_auto_incrementing: bool,
    #[serde(rename = "timestamps")]
    pub uses_timestamps: bool,
    pub columns: IndexMap<String, ColumnInfo>,
    pub casts: IndexMap<String, String>,
    #[serde(rename = "fillable")]
    pub fillable_attributes: Vec<String>,
    #[serde(rename = "guarded")]
    pub guarded_attributes: Vec<String>,
    #[serde(rename = "hidden")]
    pub hidden_attributes: Vec<String>,
    pub relationships: IndexMap<String, RelationshipInfo>,
    #[serde(rename = "traits")]
    pub mixins: Vec<String>,
}

/// Primitive type backing an enum's cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackingType {
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "string")]
    String,
}

impl BackingType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::String => "string",
        }
    }
}

impl fmt::Display for BackingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar value of a backed enum case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BackingValue {
    Int(i64),
    String(String),
}

impl BackingValue {
    #[must_use]
    pub const fn backing_type(&self) -> BackingType {
        match self {
            Self::Int(_) => BackingType::Int,
            Self::String(_) => BackingType::String,
        }
    }
}

impl From<i64> for BackingValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for BackingValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for BackingValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// An instantiated case-level annotation with its flattened properties.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnotationRecord {
    pub name: String,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnumCase {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<BackingValue>,
    #[serde(
        rename = "attributes",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub annotations: Vec<AnnotationRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterInfo {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(rename = "default", default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MethodInfo {
    pub name: String,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub parameters: Vec<ParameterInfo>,
    #[serde(rename = "returnType")]
    pub return_type: Option<String>,
}

/// Normalized description of one enumerated type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnumRecord {
    #[serde(rename = "enum")]
    pub name: String,
    #[serde(rename = "class")]
    pub qualified_name: String,
    #[serde(rename = "backingType")]
    pub backing_type: Option<BackingType>,
    pub cases: Vec<EnumCase>,
    pub methods: Vec<MethodInfo>,
    #[serde(rename = "traits")]
    pub mixins: Vec<String>,
    #[serde(rename = "interfaces")]
    pub implemented_capabilities: Vec<String>,
}

/// Case values of an enum: a name-to-value mapping when backed, names only otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum EnumValueSet {
    Backed(IndexMap<String, BackingValue>),
    Pure(Vec<String>),
}

/// Narrow projection of an enum onto its case values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnumValues {
    #[serde(rename = "enum")]
    pub name: String,
    #[serde(rename = "class")]
    pub qualified_name: String,
    #[serde(rename = "backingType")]
    pub backing_type: Option<BackingType>,
    pub values: EnumValueSet,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn key_type_uses_short_wire_names() {
        assert_eq!(serde_json::to_value(KeyType::Int).unwrap(), json!("int"));
        assert_eq!(
            serde_json::from_value::<KeyType>(json!("uuid")).unwrap(),
            KeyType::Other("uuid".to_string())
        );
    }

    #[test]
    fn relationship_kinds_serialize_camel_case() {
        let names: Vec<Value> = RelationshipKind::ALL
            .iter()
            .map(|kind| serde_json::to_value(kind).unwrap())
            .collect();
        let expected: Vec<Value> = RelationshipKind::ALL
            .iter()
            .map(|kind| json!(kind.as_str()))
            .collect();
        assert_eq!(names, expected);
        assert_eq!(
            serde_json::to_value(RelationshipKind::BelongsToMany).unwrap(),
            json!("belongsToMany")
        );
    }

    #[test]
    fn pure_case_omits_value_and_attributes() {
        let case = EnumCase {
            name: "Draft".to_string(),
            value: None,
            annotations: Vec::new(),
        };
        assert_eq!(serde_json::to_value(case).unwrap(), json!({ "name": "Draft" }));
    }

    #[test]
    fn annotation_properties_are_flattened() {
        let mut properties = Map::new();
        properties.insert("label".to_string(), json!("Checking"));
        let case = EnumCase {
            name: "Checking".to_string(),
            value: Some(BackingValue::from("checking")),
            annotations: vec![AnnotationRecord {
                name: "Label".to_string(),
                properties,
            }],
        };
        assert_eq!(
            serde_json::to_value(case).unwrap(),
            json!({
                "name": "Checking",
                "value": "checking",
                "attributes": [{ "name": "Label", "label": "Checking" }]
            })
        );
    }

    #[test]
    fn enum_summary_flattens_catalog_entry() {
        let summary = EnumSummary {
            entry: CatalogEntry {
                display_name: "AccountType".to_string(),
                qualified_name: "app::enums::AccountType".to_string(),
            },
            backing_type: Some(BackingType::String),
            case_count: 3,
        };
        assert_eq!(
            serde_json::to_value(summary).unwrap(),
            json!({
                "name": "AccountType",
                "class": "app::enums::AccountType",
                "backingType": "string",
                "caseCount": 3
            })
        );
    }

    #[test]
    fn method_without_return_type_reports_null() {
        let method = MethodInfo {
            name: "label".to_string(),
            is_static: false,
            parameters: Vec::new(),
            return_type: None,
        };
        assert_eq!(
            serde_json::to_value(method).unwrap(),
            json!({ "name": "label", "static": false, "parameters": [], "returnType": null })
        );
    }
}
