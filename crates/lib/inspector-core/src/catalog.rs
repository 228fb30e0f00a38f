//! Discovery of inspectable types from a source tree.
//!
//! Files are mapped to candidate names by their path and accepted only when
//! the registry can load them as the requested category. Candidates that fail
//! to load are skipped; only a missing root aborts a scan.

use std::ffi::OsStr;
use std::path::{Component, Path};

use convert_case::{Case, Casing};
use inspector_records::CatalogEntry;
use inspector_records::schema::{DISPLAY_SEPARATOR, qualify};
use walkdir::{DirEntry, WalkDir};

use crate::config::CatalogLayout;
use crate::registry::{Category, TypeRegistry};

/// Scanner over one category's directory.
#[derive(Debug, Clone, Copy)]
pub struct CatalogScanner<'a> {
    root: &'a Path,
    namespace: &'a str,
    extension: &'a str,
    excluded: &'a [String],
}

impl<'a> CatalogScanner<'a> {
    #[must_use]
    pub const fn new(root: &'a Path, namespace: &'a str, extension: &'a str) -> Self {
        Self {
            root,
            namespace,
            extension,
            excluded: &[],
        }
    }

    /// Scanner for a configured layout rooted at `root`.
    #[must_use]
    pub fn for_layout(root: &'a Path, layout: &'a CatalogLayout, extension: &'a str) -> Self {
        Self::new(root, &layout.namespace, extension).excluding(&layout.exclude)
    }

    #[must_use]
    pub const fn excluding(mut self, excluded: &'a [String]) -> Self {
        self.excluded = excluded;
        self
    }

    /// Walks the root and returns accepted entries sorted by display name.
    ///
    /// Returns `None` when the root directory does not exist.
    #[must_use]
    pub fn scan(&self, registry: &TypeRegistry, category: Category) -> Option<Vec<CatalogEntry>> {
        if !self.root.is_dir() {
            return None;
        }

        let walker = WalkDir::new(self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded(entry));

        let mut entries = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(error = %err, "skipping unreadable catalog path");
                    continue;
                }
            };
            if !entry.file_type().is_file()
                || entry.path().extension() != Some(OsStr::new(self.extension))
            {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(self.root) else {
                continue;
            };
            let Some(display_name) = display_name_for(relative) else {
                tracing::debug!(path = %relative.display(), "skipping non UTF-8 catalog path");
                continue;
            };
            let qualified_name = qualify(self.namespace, &display_name);
            if let Err(reason) = accepts(registry, category, &qualified_name) {
                tracing::debug!(name = %qualified_name, %reason, "skipping catalog candidate");
                continue;
            }
            entries.push(CatalogEntry {
                display_name,
                qualified_name,
            });
        }

        entries.sort_by(|left, right| left.display_name.cmp(&right.display_name));
        Some(entries)
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.excluded.iter().any(|excluded| excluded == name))
    }
}

fn accepts(registry: &TypeRegistry, category: Category, qualified_name: &str) -> Result<(), String> {
    match category {
        Category::Model => {
            let binding = registry.model(qualified_name).map_err(|err| err.to_string())?;
            if binding.is_abstract() {
                return Err("abstract model".to_string());
            }
            Ok(())
        }
        Category::Enum => registry
            .enumeration(qualified_name)
            .map(|_| ())
            .map_err(|err| err.to_string()),
    }
}

/// Display name for a file path relative to a catalog root.
///
/// The extension is dropped and every segment is converted to `UpperCamelCase`,
/// so `accounts/ira_account.rs` becomes `Accounts/IraAccount`.
#[must_use]
pub fn display_name_for(relative: &Path) -> Option<String> {
    let stem = relative.with_extension("");
    let mut segments = Vec::new();
    for component in stem.components() {
        let Component::Normal(segment) = component else {
            continue;
        };
        segments.push(segment.to_str()?.to_case(Case::Pascal));
    }
    if segments.is_empty() {
        return None;
    }
    Some(segments.join(&DISPLAY_SEPARATOR.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_are_pascal_cased_paths() {
        assert_eq!(
            display_name_for(Path::new("accounts/ira_account.rs")).as_deref(),
            Some("Accounts/IraAccount")
        );
        assert_eq!(display_name_for(Path::new("user.rs")).as_deref(), Some("User"));
        assert_eq!(
            display_name_for(Path::new("Billing/Invoice.rs")).as_deref(),
            Some("Billing/Invoice")
        );
    }

    #[test]
    fn missing_root_yields_none() {
        let scanner = CatalogScanner::new(Path::new("/nonexistent/inspector"), "app::models", "rs");
        assert!(scanner.scan(&TypeRegistry::new(), Category::Model).is_none());
    }
}
