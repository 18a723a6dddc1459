use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use rowdex_core::{build_document, Document, IndexSchema, Row};

use crate::client::{BulkResponse, SearchClient};
use crate::error::{Result, SearchError};

/// How many failing-item reasons a bulk report retains.
const ERROR_SAMPLE: usize = 5;

/// Outcome of one import run. `failed` stays zero in sequential mode, which
/// aborts on the first rejection instead.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub submitted: usize,
    pub indexed: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

/// Reads a CSV file with a header row into ordered rows. All cells are kept
/// as raw strings; normalization happens in the document builder.
pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
    if !path.exists() {
        return Err(SearchError::MissingFile(path.to_path_buf()));
    }
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new().from_reader(file);
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = Row::new();
        for (column, cell) in headers.iter().zip(record.iter()) {
            row.insert(column.clone(), cell.to_string());
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Creates the index when missing; with `recreate`, drops any existing index
/// first so the import starts from an empty one.
pub fn ensure_index(
    client: &SearchClient,
    index: &str,
    schema: &IndexSchema,
    recreate: bool,
) -> Result<()> {
    if client.index_exists(index)? {
        if !recreate {
            return Ok(());
        }
        client.delete_index(index)?;
    }
    client.create_index(index, schema)
}

/// NDJSON body for a bulk insert. No explicit identifiers; the backend
/// assigns them.
pub fn bulk_body(docs: &[Document]) -> Result<String> {
    let mut body = String::new();
    for doc in docs {
        body.push_str("{\"index\":{}}\n");
        body.push_str(&serde_json::to_string(doc)?);
        body.push('\n');
    }
    Ok(body)
}

fn tally(submitted: usize, response: &BulkResponse) -> IngestReport {
    let mut report = IngestReport {
        submitted,
        ..IngestReport::default()
    };
    for item in response.statuses() {
        if (200..300).contains(&item.status) {
            report.indexed += 1;
        } else {
            report.failed += 1;
            if report.errors.len() < ERROR_SAMPLE {
                report.errors.push(item.reason());
            }
        }
    }
    report
}

/// Bulk import: one `_bulk` call for the whole file, per-item results
/// tallied, then a refresh so the documents are searchable on return.
pub fn ingest_bulk(client: &SearchClient, index: &str, path: &Path) -> Result<IngestReport> {
    let rows = read_rows(path)?;
    let docs: Vec<Document> = rows.iter().map(build_document).collect();
    if docs.is_empty() {
        return Ok(IngestReport::default());
    }
    debug!(index, rows = docs.len(), "bulk ingest");
    let response = client.bulk(index, bulk_body(&docs)?)?;
    let report = tally(docs.len(), &response);
    client.refresh(index)?;
    Ok(report)
}

/// Row-at-a-time import with explicit sequential identifiers (row position
/// + 1). Fail-fast: the first rejection aborts the run, carrying both the
/// raw row and the normalized document for diagnosis.
pub fn ingest_sequential(client: &SearchClient, index: &str, path: &Path) -> Result<IngestReport> {
    let rows = read_rows(path)?;
    for (position, row) in rows.iter().enumerate() {
        let doc = build_document(row);
        let id = (position + 1).to_string();
        if let Err(err) = client.put_doc(index, &id, &doc) {
            let reason = match &err {
                SearchError::Backend { status, reason } => format!("{status}: {reason}"),
                other => other.to_string(),
            };
            return Err(SearchError::RowRejected {
                row: position + 1,
                reason,
                raw: serde_json::to_string(row).unwrap_or_default(),
                normalized: serde_json::to_string(&doc).unwrap_or_default(),
            });
        }
    }
    client.refresh(index)?;
    Ok(IngestReport {
        submitted: rows.len(),
        indexed: rows.len(),
        failed: 0,
        errors: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn read_rows_keeps_header_order_and_raw_cells() {
        let file = write_csv("content,author,views\nfirst post,alice,10\nsecond,bob,NaN\n");
        let rows = read_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        let keys: Vec<&str> = rows[0].keys().map(String::as_str).collect();
        assert_eq!(keys, ["content", "author", "views"]);
        assert_eq!(rows[1]["views"], "NaN");
    }

    #[test]
    fn missing_file_is_its_own_error() {
        let err = read_rows(Path::new("/no/such/file.csv")).unwrap_err();
        assert!(matches!(err, SearchError::MissingFile(_)));
    }

    #[test]
    fn ragged_rows_are_a_parse_error() {
        let file = write_csv("a,b\n1,2\n1,2,3\n");
        let err = read_rows(file.path()).unwrap_err();
        assert!(matches!(err, SearchError::Csv(_)));
    }

    #[test]
    fn bulk_body_pairs_action_and_document_lines() {
        let file = write_csv("content,views\nhello,1\nworld,NaN\n");
        let rows = read_rows(file.path()).unwrap();
        let docs: Vec<Document> = rows.iter().map(build_document).collect();
        let body = bulk_body(&docs).unwrap();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "{\"index\":{}}");
        let second: Value = serde_json::from_str(lines[3]).unwrap();
        assert_eq!(second["content"], "world");
        assert_eq!(second["views"], Value::Null);
    }

    #[test]
    fn tally_counts_partial_failures() {
        let response: BulkResponse = serde_json::from_value(json!({
            "errors": true,
            "items": [
                { "index": { "_id": "a", "status": 201 } },
                { "index": { "_id": "b", "status": 201 } },
                { "index": { "status": 400,
                             "error": { "type": "mapper_parsing_exception" } } }
            ]
        }))
        .unwrap();
        let report = tally(3, &response);
        assert_eq!(report.submitted, 3);
        assert_eq!(report.indexed, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("mapper_parsing_exception"));
    }

    #[test]
    fn tally_keeps_a_bounded_error_sample() {
        let items: Vec<Value> = (0..10)
            .map(|_| json!({ "index": { "status": 400, "error": { "type": "boom" } } }))
            .collect();
        let response: BulkResponse =
            serde_json::from_value(json!({ "errors": true, "items": items })).unwrap();
        let report = tally(10, &response);
        assert_eq!(report.failed, 10);
        assert_eq!(report.errors.len(), ERROR_SAMPLE);
    }
}
