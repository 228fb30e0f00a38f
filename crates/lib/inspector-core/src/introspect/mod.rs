//! Introspectors turning registered types into normalized records.

pub mod enums;
pub mod model;

pub use enums::EnumIntrospector;
pub use model::ModelIntrospector;

use inspector_records::schema::candidate_names;

use crate::registry::LoadError;

/// An item left out of a record, with the reason it was left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub item: String,
    pub reason: String,
}

/// Items extracted by one step alongside the ones it had to skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction<T> {
    items: Vec<T>,
    skipped: Vec<Skipped>,
}

impl<T> Default for Extraction<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<T> Extraction<T> {
    pub fn take(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn skip(&mut self, item: impl Into<String>, reason: impl ToString) {
        self.skipped.push(Skipped {
            item: item.into(),
            reason: reason.to_string(),
        });
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn skipped(&self) -> &[Skipped] {
        &self.skipped
    }

    /// Logs every skipped item against the record being assembled.
    pub fn report(&self, subject: &str, step: &str) {
        for skipped in &self.skipped {
            tracing::warn!(
                subject,
                step,
                item = %skipped.item,
                reason = %skipped.reason,
                "omitted from record"
            );
        }
    }

    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// Resolves a caller-supplied name to a qualified name and its binding.
///
/// The name is tried verbatim first, then with `/` separators translated.
pub(crate) fn resolve<B>(
    namespace: &str,
    name: &str,
    load: impl Fn(&str) -> Result<B, LoadError>,
) -> Option<(String, B)> {
    candidate_names(namespace, name)
        .into_iter()
        .find_map(|candidate| load(&candidate).ok().map(|binding| (candidate, binding)))
}
