mod document;
mod hit;
mod mapping;
mod normalize;
mod query;
mod similar;

pub use document::{build_document, normalize_document, Document, Row};
pub use hit::{present, Hit, HitList, ResultRow, SearchResponse, SNIPPET_WIDTH};
pub use mapping::{IndexSchema, DATE_FIELD, KEYWORD_FIELDS, NUMERIC_FIELD, TEXT_FIELD};
pub use normalize::{normalize_f64, normalize_value};
pub use query::{build_search_body, Bounds, QuerySpec, DEFAULT_LIMIT};
pub use similar::build_similar_body;
