//! Registry of inspectable types keyed by qualified name.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

use crate::describe::{Enumeration, Model};
use crate::introspect::enums::{EnumManifest, manifest_of};
use crate::introspect::model::{ModelSnapshot, snapshot_of};

/// The two categories of inspectable types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Model,
    Enum,
}

impl Category {
    /// Capitalized label used in messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Model => "Model",
            Self::Enum => "Enum",
        }
    }

    /// Payload field echoing a requested name.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::Model => inspector_records::schema::FIELD_MODEL,
            Self::Enum => inspector_records::schema::FIELD_ENUM,
        }
    }

    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Model => "models",
            Self::Enum => "enums",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "models" | "model" => Ok(Self::Model),
            "enums" | "enum" => Ok(Self::Enum),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// Failure loading a registered type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    NotRegistered(String),
    WrongCategory { name: String, expected: Category },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRegistered(name) => write!(f, "type not registered: {name}"),
            Self::WrongCategory { name, expected } => {
                write!(f, "{name} is not a {} type", expected.label().to_lowercase())
            }
        }
    }
}

impl Error for LoadError {}

/// Type-erased binding for a registered model.
#[derive(Clone, Copy)]
pub struct ModelBinding {
    is_abstract: bool,
    snapshot: fn() -> ModelSnapshot,
}

impl ModelBinding {
    fn of<T: Model>() -> Self {
        Self {
            is_abstract: T::ABSTRACT,
            snapshot: snapshot_of::<T>,
        }
    }

    #[must_use]
    pub const fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Instantiates the model and evaluates its manifest.
    pub(crate) fn snapshot(&self) -> ModelSnapshot {
        (self.snapshot)()
    }
}

/// Type-erased binding for a registered enum.
#[derive(Clone, Copy)]
pub struct EnumBinding {
    manifest: fn() -> EnumManifest,
}

impl EnumBinding {
    fn of<E: Enumeration>() -> Self {
        Self {
            manifest: manifest_of::<E>,
        }
    }

    pub(crate) fn manifest(&self) -> EnumManifest {
        (self.manifest)()
    }
}

#[derive(Clone, Copy)]
pub enum RegisteredType {
    Model(ModelBinding),
    Enum(EnumBinding),
}

impl RegisteredType {
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::Model(_) => Category::Model,
            Self::Enum(_) => Category::Enum,
        }
    }
}

/// The loader the catalog scanner and introspectors resolve names against.
#[derive(Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, RegisteredType>,
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a model under its qualified name, replacing any previous entry.
    #[must_use]
    pub fn with_model<T: Model>(mut self, qualified_name: impl Into<String>) -> Self {
        self.insert(qualified_name.into(), RegisteredType::Model(ModelBinding::of::<T>()));
        self
    }

    /// Registers an enum under its qualified name, replacing any previous entry.
    #[must_use]
    pub fn with_enum<E: Enumeration>(mut self, qualified_name: impl Into<String>) -> Self {
        self.insert(qualified_name.into(), RegisteredType::Enum(EnumBinding::of::<E>()));
        self
    }

    fn insert(&mut self, qualified_name: String, binding: RegisteredType) {
        if self.types.insert(qualified_name.clone(), binding).is_some() {
            tracing::warn!(name = %qualified_name, "replaced existing type registration");
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Looks up any registered type.
    ///
    /// # Errors
    /// Returns `LoadError::NotRegistered` if nothing is registered under the name.
    pub fn load(&self, qualified_name: &str) -> Result<RegisteredType, LoadError> {
        self.types
            .get(qualified_name)
            .copied()
            .ok_or_else(|| LoadError::NotRegistered(qualified_name.to_string()))
    }

    /// Looks up a registered model.
    ///
    /// # Errors
    /// Returns `LoadError` if the name is unknown or bound to an enum.
    pub fn model(&self, qualified_name: &str) -> Result<ModelBinding, LoadError> {
        match self.load(qualified_name)? {
            RegisteredType::Model(binding) => Ok(binding),
            RegisteredType::Enum(_) => Err(LoadError::WrongCategory {
                name: qualified_name.to_string(),
                expected: Category::Model,
            }),
        }
    }

    /// Looks up a registered enum.
    ///
    /// # Errors
    /// Returns `LoadError` if the name is unknown or bound to a model.
    pub fn enumeration(&self, qualified_name: &str) -> Result<EnumBinding, LoadError> {
        match self.load(qualified_name)? {
            RegisteredType::Enum(binding) => Ok(binding),
            RegisteredType::Model(_) => Err(LoadError::WrongCategory {
                name: qualified_name.to_string(),
                expected: Category::Enum,
            }),
        }
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("TypeRegistry").field("types", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use inspector_records::BackingType;

    use super::*;
    use crate::describe::{CaseDef, Describable};

    #[derive(Default)]
    struct Invoice;

    impl Describable for Invoice {}

    impl Model for Invoice {
        fn table(&self) -> String {
            "invoices".to_string()
        }
    }

    struct Currency;

    impl Describable for Currency {}

    impl Enumeration for Currency {
        fn backing() -> Option<BackingType> {
            Some(BackingType::String)
        }

        fn cases() -> Vec<CaseDef> {
            vec![CaseDef::backed("Usd", "usd")]
        }
    }

    fn registry() -> TypeRegistry {
        TypeRegistry::new()
            .with_model::<Invoice>("app::models::Invoice")
            .with_enum::<Currency>("app::enums::Currency")
    }

    #[test]
    fn lookups_respect_category() {
        let registry = registry();
        assert!(registry.model("app::models::Invoice").is_ok());
        assert!(registry.enumeration("app::enums::Currency").is_ok());
        assert_eq!(
            registry.model("app::enums::Currency").err(),
            Some(LoadError::WrongCategory {
                name: "app::enums::Currency".to_string(),
                expected: Category::Model,
            })
        );
        assert_eq!(
            registry.enumeration("app::enums::Missing").err(),
            Some(LoadError::NotRegistered("app::enums::Missing".to_string()))
        );
    }

    #[test]
    fn category_parses_plural_and_singular() {
        assert_eq!("models".parse::<Category>(), Ok(Category::Model));
        assert_eq!("enum".parse::<Category>(), Ok(Category::Enum));
        assert!("widgets".parse::<Category>().is_err());
    }
}
