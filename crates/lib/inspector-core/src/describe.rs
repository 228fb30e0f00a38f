//! Self-descriptive manifests for inspectable types.
//!
//! Application types opt into introspection by implementing [`Model`] or
//! [`Enumeration`]. Both report their structure explicitly instead of being
//! discovered by reflecting over arbitrary values.

use std::{error::Error, fmt};

use indexmap::IndexMap;
use inspector_records::{BackingType, BackingValue, KeyType, RelationshipKind};
use serde::Serialize;
use serde_json::Value;

/// Capability shared by every inspectable type.
pub trait Describable: 'static {
    /// Composition mixins applied to the type, as namespaced paths.
    fn mixins() -> Vec<&'static str> {
        Vec::new()
    }
}

/// A data-model type bound to a table.
///
/// Instances are created with [`Default`] and queried for their persistence
/// configuration, mirroring how a freshly constructed model reports its
/// binding.
pub trait Model: Describable + Default {
    /// Abstract base models are never listed and cannot be instantiated.
    const ABSTRACT: bool = false;

    fn table(&self) -> String;

    fn key_name(&self) -> String {
        "id".to_string()
    }

    fn key_type(&self) -> KeyType {
        KeyType::Int
    }

    fn incrementing(&self) -> bool {
        true
    }

    fn timestamps(&self) -> bool {
        true
    }

    /// Declared attribute casts, in declaration order.
    fn casts(&self) -> IndexMap<String, String> {
        IndexMap::new()
    }

    fn fillable(&self) -> Vec<String> {
        Vec::new()
    }

    fn guarded(&self) -> Vec<String> {
        vec!["*".to_string()]
    }

    fn hidden(&self) -> Vec<String> {
        Vec::new()
    }

    /// Public members of the model, including inherited and mixed-in ones.
    fn methods() -> Vec<ModelMethod<Self>> {
        Vec::new()
    }
}

/// An enumerated type with an optional primitive backing.
pub trait Enumeration: Describable {
    fn backing() -> Option<BackingType>;

    /// Cases in declaration order.
    fn cases() -> Vec<CaseDef>;

    /// Public members, including those re-exposed from mixins.
    fn methods() -> Vec<MethodDef> {
        Vec::new()
    }

    /// Capability interfaces the enum implements, as namespaced paths.
    fn interfaces() -> Vec<&'static str> {
        Vec::new()
    }
}

/// Where a member is declared relative to the type exposing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Own,
    Inherited,
    Mixin(&'static str),
}

/// Declared type of a parameter or return value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Named(&'static str),
    Union(Vec<&'static str>),
    Intersection(Vec<&'static str>),
}

impl TypeExpr {
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Named(name) => (*name).to_string(),
            Self::Union(names) => names.join("|"),
            Self::Intersection(names) => names.join("&"),
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Declared return of a model member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Returns {
    Relation(RelationshipKind),
    Type(TypeExpr),
}

/// A live relationship produced by evaluating a relationship member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub kind: RelationshipKind,
    pub related: String,
}

impl Relation {
    #[must_use]
    pub fn new(kind: RelationshipKind, related: impl Into<String>) -> Self {
        Self {
            kind,
            related: related.into(),
        }
    }
}

/// Failure evaluating a relationship member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationError {
    message: String,
}

impl RelationError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for RelationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for RelationError {}

pub type RelationResolver<T> = fn(&T) -> Result<Relation, RelationError>;

/// A public member of a model.
pub struct ModelMethod<T> {
    pub name: &'static str,
    pub origin: Origin,
    pub arity: usize,
    pub returns: Option<Returns>,
    resolver: Option<RelationResolver<T>>,
}

impl<T> ModelMethod<T> {
    /// A zero-argument relationship member declared on the model itself.
    #[must_use]
    pub const fn relation(
        name: &'static str,
        kind: RelationshipKind,
        resolver: RelationResolver<T>,
    ) -> Self {
        Self {
            name,
            origin: Origin::Own,
            arity: 0,
            returns: Some(Returns::Relation(kind)),
            resolver: Some(resolver),
        }
    }

    /// Any other member.
    #[must_use]
    pub fn plain(name: &'static str, returns: Option<TypeExpr>) -> Self {
        Self {
            name,
            origin: Origin::Own,
            arity: 0,
            returns: returns.map(Returns::Type),
            resolver: None,
        }
    }

    #[must_use]
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = arity;
        self
    }

    /// Declared relationship kind, when the member may produce a relationship.
    ///
    /// Only zero-argument members declared on the model itself qualify.
    #[must_use]
    pub const fn relationship_kind(&self) -> Option<RelationshipKind> {
        match (&self.returns, self.origin, self.arity) {
            (Some(Returns::Relation(kind)), Origin::Own, 0) => Some(*kind),
            _ => None,
        }
    }

    /// Evaluates the member against an instance.
    ///
    /// # Errors
    /// Returns `RelationError` if the member has no resolver or its resolver fails.
    pub fn resolve(&self, instance: &T) -> Result<Relation, RelationError> {
        let Some(resolver) = self.resolver else {
            return Err(RelationError::new(format!(
                "member {} declares a relationship without a resolver",
                self.name
            )));
        };
        resolver(instance)
    }
}

/// Failure instantiating a case annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationError {
    message: String,
}

impl AnnotationError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for AnnotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for AnnotationError {}

type Instantiate = Box<dyn Fn() -> Result<Value, AnnotationError> + Send + Sync>;

/// A case-level annotation, instantiated on demand.
pub struct AnnotationDef {
    pub name: &'static str,
    instantiate: Instantiate,
}

impl AnnotationDef {
    /// Annotation whose properties are the serialized fields of `value`.
    #[must_use]
    pub fn new<A>(name: &'static str, value: A) -> Self
    where
        A: Serialize + Send + Sync + 'static,
    {
        Self {
            name,
            instantiate: Box::new(move || {
                serde_json::to_value(&value).map_err(|err| AnnotationError::new(err.to_string()))
            }),
        }
    }

    /// Annotation produced by a fallible constructor.
    #[must_use]
    pub fn with<F>(name: &'static str, instantiate: F) -> Self
    where
        F: Fn() -> Result<Value, AnnotationError> + Send + Sync + 'static,
    {
        Self {
            name,
            instantiate: Box::new(instantiate),
        }
    }

    /// Instantiates the annotation.
    ///
    /// # Errors
    /// Returns `AnnotationError` if construction or serialization fails.
    pub fn instantiate(&self) -> Result<Value, AnnotationError> {
        (self.instantiate)()
    }
}

impl fmt::Debug for AnnotationDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationDef")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// One enum case.
#[derive(Debug)]
pub struct CaseDef {
    pub name: &'static str,
    pub value: Option<BackingValue>,
    pub annotations: Vec<AnnotationDef>,
}

impl CaseDef {
    #[must_use]
    pub const fn pure(name: &'static str) -> Self {
        Self {
            name,
            value: None,
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub fn backed(name: &'static str, value: impl Into<BackingValue>) -> Self {
        Self {
            name,
            value: Some(value.into()),
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub fn annotated(mut self, annotation: AnnotationDef) -> Self {
        self.annotations.push(annotation);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamDef {
    pub name: &'static str,
    pub ty: Option<TypeExpr>,
    pub optional: bool,
    pub default: Option<Value>,
}

impl ParamDef {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            ty: None,
            optional: false,
            default: None,
        }
    }

    #[must_use]
    pub fn typed(mut self, ty: TypeExpr) -> Self {
        self.ty = Some(ty);
        self
    }

    /// Optional parameter without a statically known default.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.optional = true;
        self.default = Some(default);
        self
    }
}

/// A public member of an enum.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
    pub name: &'static str,
    pub origin: Origin,
    pub is_static: bool,
    pub params: Vec<ParamDef>,
    pub returns: Option<TypeExpr>,
}

impl MethodDef {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            origin: Origin::Own,
            is_static: false,
            params: Vec::new(),
            returns: None,
        }
    }

    #[must_use]
    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[must_use]
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub fn param(mut self, param: ParamDef) -> Self {
        self.params.push(param);
        self
    }

    #[must_use]
    pub fn returning(mut self, returns: TypeExpr) -> Self {
        self.returns = Some(returns);
        self
    }
}
