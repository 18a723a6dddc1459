use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::document::Document;
use crate::mapping::TEXT_FIELD;

/// Display width for snippets; also the requested highlight fragment size.
pub const SNIPPET_WIDTH: usize = 120;

/// Response envelope for `_search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub hits: HitList,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HitList {
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// One returned document, read-only.
#[derive(Debug, Clone, Deserialize)]
pub struct Hit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_score")]
    pub score: Option<f64>,
    #[serde(rename = "_source", default)]
    pub source: Document,
    #[serde(default)]
    pub highlight: HashMap<String, Vec<String>>,
}

impl Hit {
    /// Highlighted fragment when the backend produced one, otherwise the raw
    /// text field clipped to the display width.
    pub fn snippet(&self) -> String {
        if let Some(fragment) = self
            .highlight
            .get(TEXT_FIELD)
            .and_then(|fragments| fragments.first())
        {
            return fragment.clone();
        }
        match self.source.get(TEXT_FIELD) {
            Some(Value::String(text)) => truncate(text, SNIPPET_WIDTH),
            Some(value) if !value.is_null() => truncate(&value.to_string(), SNIPPET_WIDTH),
            _ => String::new(),
        }
    }
}

/// One table row, derived entirely from the hit it came from.
#[derive(Debug, Clone, Serialize)]
pub struct ResultRow {
    pub id: String,
    pub score: f64,
    pub snippet: String,
}

/// Projects hits into display rows: score rounded to two decimals, snippet
/// from highlight or source.
pub fn present(hits: &[Hit]) -> Vec<ResultRow> {
    hits.iter()
        .map(|hit| ResultRow {
            id: hit.id.clone(),
            score: round2(hit.score.unwrap_or(0.0)),
            snippet: hit.snippet(),
        })
        .collect()
}

fn round2(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width).collect();
    clipped.push('…');
    clipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(response: Value) -> SearchResponse {
        serde_json::from_value(response).unwrap()
    }

    fn sample_response() -> Value {
        json!({
            "took": 4,
            "hits": {
                "total": { "value": 2, "relation": "eq" },
                "hits": [
                    {
                        "_id": "1",
                        "_score": 1.2345,
                        "_source": { "content": "a post about rust", "views": 12 },
                        "highlight": { "content": ["a post about <em>rust</em>"] }
                    },
                    {
                        "_id": "2",
                        "_score": 0.5,
                        "_source": { "content": "plain text with no highlight" }
                    }
                ]
            }
        })
    }

    #[test]
    fn parses_the_backend_envelope() {
        let response = parse(sample_response());
        assert_eq!(response.hits.hits.len(), 2);
        assert_eq!(response.hits.hits[0].id, "1");
        assert_eq!(response.hits.hits[1].score, Some(0.5));
    }

    #[test]
    fn highlight_wins_over_raw_source() {
        let response = parse(sample_response());
        assert_eq!(
            response.hits.hits[0].snippet(),
            "a post about <em>rust</em>"
        );
    }

    #[test]
    fn missing_highlight_falls_back_to_source_text() {
        let response = parse(sample_response());
        assert_eq!(
            response.hits.hits[1].snippet(),
            "plain text with no highlight"
        );
    }

    #[test]
    fn long_source_text_is_clipped_on_char_boundaries() {
        let long = "é".repeat(SNIPPET_WIDTH + 40);
        let hit: Hit = serde_json::from_value(json!({
            "_id": "3",
            "_score": 1.0,
            "_source": { "content": long }
        }))
        .unwrap();
        let snippet = hit.snippet();
        assert_eq!(snippet.chars().count(), SNIPPET_WIDTH + 1);
        assert!(snippet.ends_with('…'));
    }

    #[test]
    fn scores_are_rounded_for_display() {
        let rows = present(&parse(sample_response()).hits.hits);
        assert_eq!(rows[0].score, 1.23);
        assert_eq!(rows[1].score, 0.5);
    }

    #[test]
    fn absent_content_renders_an_empty_snippet() {
        let hit: Hit = serde_json::from_value(json!({
            "_id": "4",
            "_score": null,
            "_source": { "content": null, "views": 3 }
        }))
        .unwrap();
        assert_eq!(hit.snippet(), "");
        let rows = present(&[hit]);
        assert_eq!(rows[0].score, 0.0);
    }
}
