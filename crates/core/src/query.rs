use serde_json::{json, Value};

use crate::hit::SNIPPET_WIDTH;
use crate::mapping::{DATE_FIELD, NUMERIC_FIELD, TEXT_FIELD};

pub const DEFAULT_LIMIT: usize = 10;

/// Lower/upper bound pair for a range filter. Either side may be open.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bounds<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T> Bounds<T> {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// User intent for one search action. Built fresh per search, discarded
/// after the request body is assembled.
#[derive(Debug, Clone)]
pub struct QuerySpec {
    pub text: String,
    pub numeric: Bounds<i64>,
    pub date: Bounds<String>,
    pub limit: usize,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            text: String::new(),
            numeric: Bounds::default(),
            date: Bounds::default(),
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Assembles the boolean search body. The text term is the scoring clause;
/// range bounds go into `filter` so they narrow results without touching
/// relevance. Date bounds are passed through as opaque strings.
pub fn build_search_body(spec: &QuerySpec) -> Value {
    let term = spec.text.trim();
    let must = if term.is_empty() {
        json!({ "match_all": {} })
    } else {
        json!({ "match": { TEXT_FIELD: term } })
    };
    let mut filter = Vec::new();
    if let Some(clause) = range_clause(NUMERIC_FIELD, &spec.numeric) {
        filter.push(clause);
    }
    if let Some(clause) = range_clause(DATE_FIELD, &spec.date) {
        filter.push(clause);
    }
    json!({
        "query": { "bool": { "must": [must], "filter": filter } },
        "size": spec.limit,
        "highlight": {
            "fields": {
                TEXT_FIELD: {
                    "fragment_size": SNIPPET_WIDTH,
                    "number_of_fragments": 1
                }
            }
        }
    })
}

fn range_clause<T: Clone + Into<Value>>(field: &str, bounds: &Bounds<T>) -> Option<Value> {
    if bounds.is_empty() {
        return None;
    }
    let mut range = serde_json::Map::new();
    if let Some(min) = &bounds.min {
        range.insert("gte".to_string(), min.clone().into());
    }
    if let Some(max) = &bounds.max {
        range.insert("lte".to_string(), max.clone().into());
    }
    Some(json!({ "range": { field: range } }))
}
