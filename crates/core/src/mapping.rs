use serde_json::{json, Value};

/// Full-text field queried, highlighted, and used for similarity.
pub const TEXT_FIELD: &str = "content";
/// Integer field covered by the numeric range filter.
pub const NUMERIC_FIELD: &str = "views";
/// Date field covered by the date range filter.
pub const DATE_FIELD: &str = "published_at";
/// Exact-match fields carried alongside the text.
pub const KEYWORD_FIELDS: [&str; 3] = ["author", "category", "status"];

/// How the index is created: with the declared six-field mapping, or empty
/// so the backend applies its default dynamic mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSchema {
    Declared,
    Dynamic,
}

impl IndexSchema {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexSchema::Declared => "declared",
            IndexSchema::Dynamic => "dynamic",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "declared" => Some(IndexSchema::Declared),
            "dynamic" => Some(IndexSchema::Dynamic),
            _ => None,
        }
    }

    /// Index-creation request body, or `None` for a bodyless create.
    pub fn body(&self) -> Option<Value> {
        match self {
            IndexSchema::Dynamic => None,
            IndexSchema::Declared => Some(json!({
                "settings": {
                    "analysis": {
                        "analyzer": {
                            "content_text": {
                                "type": "standard",
                                "stopwords": "_english_"
                            }
                        }
                    }
                },
                "mappings": {
                    "properties": {
                        TEXT_FIELD: { "type": "text", "analyzer": "content_text" },
                        KEYWORD_FIELDS[0]: { "type": "keyword" },
                        KEYWORD_FIELDS[1]: { "type": "keyword" },
                        KEYWORD_FIELDS[2]: { "type": "keyword" },
                        DATE_FIELD: { "type": "date" },
                        NUMERIC_FIELD: { "type": "integer" }
                    }
                }
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_schema_covers_all_six_fields() {
        let body = IndexSchema::Declared.body().unwrap();
        let properties = body["mappings"]["properties"].as_object().unwrap();
        assert_eq!(properties.len(), 6);
        assert_eq!(properties[TEXT_FIELD]["type"], "text");
        assert_eq!(properties[NUMERIC_FIELD]["type"], "integer");
        assert_eq!(properties[DATE_FIELD]["type"], "date");
        for field in KEYWORD_FIELDS {
            assert_eq!(properties[field]["type"], "keyword");
        }
    }

    #[test]
    fn dynamic_schema_has_no_body() {
        assert!(IndexSchema::Dynamic.body().is_none());
    }

    #[test]
    fn schema_names_round_trip() {
        for schema in [IndexSchema::Declared, IndexSchema::Dynamic] {
            assert_eq!(IndexSchema::from_str(schema.as_str()), Some(schema));
        }
        assert_eq!(IndexSchema::from_str("bogus"), None);
    }
}
