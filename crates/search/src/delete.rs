use serde_json::json;

use crate::client::{BulkResponse, SearchClient};
use crate::error::Result;

/// Outcome of a bulk delete. A missing identifier counts as success, not a
/// failure.
#[derive(Debug, Clone, Default)]
pub struct DeleteReport {
    pub requested: usize,
    pub deleted: usize,
    pub missing: usize,
    pub failed: usize,
}

/// NDJSON body staging one delete action per identifier.
pub fn delete_body(ids: &[String]) -> String {
    let mut body = String::new();
    for id in ids {
        body.push_str(&json!({ "delete": { "_id": id } }).to_string());
        body.push('\n');
    }
    body
}

fn tally(requested: usize, response: &BulkResponse) -> DeleteReport {
    let mut report = DeleteReport {
        requested,
        ..DeleteReport::default()
    };
    for item in response.statuses() {
        match item.status {
            404 => report.missing += 1,
            status if (200..300).contains(&status) => report.deleted += 1,
            _ => report.failed += 1,
        }
    }
    report
}

/// Deletes the given identifiers in one bulk call, then refreshes so the
/// next search no longer returns them.
pub fn delete_ids(client: &SearchClient, index: &str, ids: &[String]) -> Result<DeleteReport> {
    if ids.is_empty() {
        return Ok(DeleteReport::default());
    }
    let response = client.bulk(index, delete_body(ids))?;
    let report = tally(ids.len(), &response);
    client.refresh(index)?;
    Ok(report)
}
