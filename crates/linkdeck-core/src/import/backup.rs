//! JSON backup export and import.
//!
//! A backup is the collection's persisted JSON form written to a file the
//! user keeps. Import is all-or-nothing: the document is validated
//! structurally before the typed parse, and anything that would break the
//! collection invariants rejects the whole file rather than loading part
//! of it.

use serde_json::Value;

use crate::collection::Collection;
use crate::error::{LinkdeckError, Result};

/// Render the collection as a backup document.
pub fn export_backup(collection: &Collection) -> Result<String> {
    collection.to_json()
}

/// Parse and validate a backup document.
///
/// The document must be a JSON array in which every entry carries a string
/// `title` and an array `links`. Entries that pass get the full typed
/// parse; emptied categories are pruned and repeated titles or link ids
/// reject the import.
pub fn import_backup(text: &str) -> Result<Collection> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| LinkdeckError::malformed(format!("not valid JSON: {e}")))?;

    let entries = value
        .as_array()
        .ok_or_else(|| LinkdeckError::malformed("expected a top-level array of categories"))?;
    for (position, entry) in entries.iter().enumerate() {
        let has_title = entry.get("title").is_some_and(Value::is_string);
        let has_links = entry.get("links").is_some_and(Value::is_array);
        if !has_title || !has_links {
            return Err(LinkdeckError::malformed(format!(
                "entry {} is missing a string title or a links array",
                position + 1
            )));
        }
    }

    let mut collection: Collection = serde_json::from_value(value)
        .map_err(|e| LinkdeckError::malformed(e.to_string()))?;
    collection.prune_empty();

    if let Some(title) = collection.duplicate_title() {
        return Err(LinkdeckError::malformed(format!(
            "duplicate category title {title:?}"
        )));
    }
    if let Some(id) = collection.duplicate_link_id() {
        return Err(LinkdeckError::malformed(format!("duplicate link id {id:?}")));
    }

    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{LinkCategory, LinkItem};

    fn sample() -> Collection {
        Collection::new(vec![LinkCategory {
            title: "Dev".into(),
            links: vec![
                LinkItem::new("GitHub", "https://github.com", "Code hosting"),
                LinkItem::new("Crates", "https://crates.io", ""),
            ],
        }])
    }

    fn reason(err: LinkdeckError) -> String {
        match err {
            LinkdeckError::MalformedImport { reason } => reason,
            other => panic!("expected MalformedImport, got {other:?}"),
        }
    }

    #[test]
    fn test_round_trip() {
        let before = sample();
        let text = export_backup(&before).unwrap();
        assert_eq!(import_backup(&text).unwrap(), before);
    }

    #[test]
    fn test_rejects_non_json() {
        let why = reason(import_backup("<html>").unwrap_err());
        assert!(why.starts_with("not valid JSON"), "got: {why}");
    }

    #[test]
    fn test_rejects_non_array_document() {
        let why = reason(import_backup(r#"{"title":"Dev","links":[]}"#).unwrap_err());
        assert!(why.contains("top-level array"), "got: {why}");
    }

    #[test]
    fn test_rejects_entry_without_title() {
        let text = r#"[{"links":[]}]"#;
        let why = reason(import_backup(text).unwrap_err());
        assert!(why.contains("entry 1"), "got: {why}");
    }

    #[test]
    fn test_rejects_entry_with_non_array_links() {
        let text = r#"[{"title":"Dev","links":[]},{"title":"News","links":"nope"}]"#;
        let why = reason(import_backup(text).unwrap_err());
        assert!(why.contains("entry 2"), "got: {why}");
    }

    #[test]
    fn test_rejects_link_missing_required_field() {
        let text = r#"[{"title":"Dev","links":[{"id":"a","name":"GitHub"}]}]"#;
        assert!(matches!(
            import_backup(text).unwrap_err(),
            LinkdeckError::MalformedImport { .. }
        ));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let text = r#"[{"title":"Dev","links":[{"id":"a","name":"GitHub","url":"https://github.com"}]}]"#;
        let collection = import_backup(text).unwrap();
        let (_, link) = collection.find_link("a").unwrap();
        assert_eq!(link.description, "");
        assert_eq!(link.favicon_url, "");
    }

    #[test]
    fn test_empty_categories_are_pruned() {
        let text = r#"[
            {"title":"Empty","links":[]},
            {"title":"Dev","links":[{"id":"a","name":"GitHub","url":"https://github.com"}]}
        ]"#;
        let collection = import_backup(text).unwrap();
        assert_eq!(collection.len(), 1);
        assert!(collection.category("Empty").is_none());
    }

    #[test]
    fn test_rejects_duplicate_category_titles() {
        let text = r#"[
            {"title":"Dev","links":[{"id":"a","name":"x","url":"https://a.example"}]},
            {"title":"Dev","links":[{"id":"b","name":"y","url":"https://b.example"}]}
        ]"#;
        let why = reason(import_backup(text).unwrap_err());
        assert!(why.contains("duplicate category title"), "got: {why}");
    }

    #[test]
    fn test_rejects_duplicate_link_ids() {
        let text = r#"[
            {"title":"Dev","links":[{"id":"a","name":"x","url":"https://a.example"}]},
            {"title":"News","links":[{"id":"a","name":"y","url":"https://b.example"}]}
        ]"#;
        let why = reason(import_backup(text).unwrap_err());
        assert!(why.contains("duplicate link id"), "got: {why}");
    }
}
