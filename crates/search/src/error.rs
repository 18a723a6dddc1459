use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("input file not found: {0:?}")]
    MissingFile(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv parse error: {0}")]
    Csv(#[from] csv::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("serde json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("backend returned {status}: {reason}")]
    Backend { status: u16, reason: String },
    #[error("row {row} rejected: {reason}\nraw row: {raw}\nnormalized document: {normalized}")]
    RowRejected {
        row: usize,
        reason: String,
        raw: String,
        normalized: String,
    },
}

pub type Result<T> = std::result::Result<T, SearchError>;
