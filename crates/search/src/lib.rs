pub mod client;
pub mod config;
pub mod delete;
pub mod error;
pub mod executor;
pub mod ingest;

pub use client::{BulkItemStatus, BulkResponse, ClusterInfo, SearchClient};
pub use config::BackendConfig;
pub use delete::{delete_ids, DeleteReport};
pub use error::{Result, SearchError};
pub use executor::{run_search, run_similar};
pub use ingest::{ensure_index, ingest_bulk, ingest_sequential, read_rows, IngestReport};
