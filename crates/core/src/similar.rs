use serde_json::{json, Value};

use crate::mapping::TEXT_FIELD;

/// "Find documents like this one" over the text field. Both frequency
/// thresholds are pinned to 1 so near-duplicates of very short text still
/// match; no score cutoff is imposed.
pub fn build_similar_body(index: &str, id: &str, limit: usize) -> Value {
    json!({
        "query": {
            "more_like_this": {
                "fields": [TEXT_FIELD],
                "like": [{ "_index": index, "_id": id }],
                "min_term_freq": 1,
                "min_doc_freq": 1
            }
        },
        "size": limit
    })
}
