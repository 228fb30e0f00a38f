use inspector_records::Cataloged;

/// Keeps entries whose display name contains `query`, ignoring case.
///
/// Order is preserved, and an empty query keeps everything.
#[must_use]
pub fn filter_catalog<T: Cataloged>(entries: Vec<T>, query: &str) -> Vec<T> {
    let query = query.to_lowercase();
    entries
        .into_iter()
        .filter(|entry| entry.display_name().to_lowercase().contains(&query))
        .collect()
}

#[cfg(test)]
mod tests {
    use inspector_records::CatalogEntry;

    use super::*;

    fn entry(name: &str) -> CatalogEntry {
        CatalogEntry {
            display_name: name.to_string(),
            qualified_name: format!("app::models::{}", name.replace('/', "::")),
        }
    }

    fn names(entries: &[CatalogEntry]) -> Vec<&str> {
        entries.iter().map(|entry| entry.display_name.as_str()).collect()
    }

    #[test]
    fn matches_case_insensitively_in_order() {
        let catalog = vec![
            entry("Accounts/IraAccount"),
            entry("Accounts/RothAccount"),
            entry("Post"),
            entry("User"),
        ];
        let found = filter_catalog(catalog, "ACCOUNT");
        assert_eq!(names(&found), vec!["Accounts/IraAccount", "Accounts/RothAccount"]);
    }

    #[test]
    fn empty_query_keeps_full_catalog() {
        let catalog = vec![entry("Post"), entry("User")];
        assert_eq!(filter_catalog(catalog.clone(), ""), catalog);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        assert!(filter_catalog(vec![entry("User")], "invoice").is_empty());
    }
}
