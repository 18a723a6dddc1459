use indexmap::IndexMap;
use serde_json::Value;

use crate::normalize::normalize_value;

/// One CSV line keyed by header name, in column order. Exists only while an
/// import is running.
pub type Row = IndexMap<String, String>;

/// A normalized record ready for submission. Column order is preserved so
/// the JSON sent to the backend reads like the source file.
pub type Document = IndexMap<String, Value>;

/// Builds a document from a raw row: identical key set, every value run
/// through the normalizer independently.
pub fn build_document(row: &Row) -> Document {
    row.iter()
        .map(|(column, raw)| {
            (
                column.clone(),
                normalize_value(Value::String(raw.clone())),
            )
        })
        .collect()
}

/// Re-applies normalization to an existing document.
pub fn normalize_document(doc: Document) -> Document {
    doc.into_iter()
        .map(|(column, value)| (column, normalize_value(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_row() -> Row {
        let mut row = Row::new();
        row.insert("content".to_string(), "a post about search".to_string());
        row.insert("author".to_string(), "alice".to_string());
        row.insert("views".to_string(), "NaN".to_string());
        row
    }

    #[test]
    fn key_set_and_order_are_preserved() {
        let doc = build_document(&sample_row());
        let keys: Vec<&str> = doc.keys().map(String::as_str).collect();
        assert_eq!(keys, ["content", "author", "views"]);
    }

    #[test]
    fn placeholder_cells_become_null() {
        let doc = build_document(&sample_row());
        assert_eq!(doc["views"], Value::Null);
        assert_eq!(doc["author"], json!("alice"));
    }

    #[test]
    fn normalizing_a_built_document_changes_nothing() {
        let doc = build_document(&sample_row());
        assert_eq!(normalize_document(doc.clone()), doc);
    }
}
