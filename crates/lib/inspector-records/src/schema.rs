pub const NAMESPACE_SEPARATOR: &str = "::";
pub const DISPLAY_SEPARATOR: char = '/';

pub const DEFAULT_MODEL_NAMESPACE: &str = "app::models";
pub const DEFAULT_ENUM_NAMESPACE: &str = "app::enums";

pub const UNKNOWN_COLUMN_TYPE: &str = "unknown";

pub const FIELD_ERROR: &str = "error";
pub const FIELD_MODEL: &str = "model";
pub const FIELD_ENUM: &str = "enum";

/// Builds a qualified name from a namespace and a `/`-delimited display name.
#[must_use]
pub fn qualify(namespace: &str, display_name: &str) -> String {
    let path = display_name.replace(DISPLAY_SEPARATOR, NAMESPACE_SEPARATOR);
    format!("{namespace}{NAMESPACE_SEPARATOR}{path}")
}

/// Qualified names tried, in order, when resolving a caller-supplied name.
///
/// The first keeps the name verbatim, the second translates `/` path
/// separators into namespace separators.
#[must_use]
pub fn candidate_names(namespace: &str, name: &str) -> [String; 2] {
    [
        format!("{namespace}{NAMESPACE_SEPARATOR}{name}"),
        qualify(namespace, name),
    ]
}

/// Last segment of a namespaced path.
#[must_use]
pub fn basename(path: &str) -> &str {
    path.rsplit(NAMESPACE_SEPARATOR).next().unwrap_or(path)
}
