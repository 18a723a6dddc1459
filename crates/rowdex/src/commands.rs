use std::path::Path;

use anyhow::{anyhow, Result};

use rowdex_core::{present, Bounds, IndexSchema, QuerySpec, ResultRow};
use rowdex_search::{
    delete_ids, ensure_index, ingest_bulk, ingest_sequential, run_search, run_similar,
    SearchClient,
};

use crate::logging;

pub fn import(
    client: &SearchClient,
    index: &str,
    file: &str,
    sequential: bool,
    recreate: bool,
    schema: &str,
) -> Result<()> {
    let schema =
        IndexSchema::from_str(schema).ok_or_else(|| anyhow!(format!("unknown schema {schema}")))?;
    ensure_index(client, index, &schema, recreate)?;
    logging::verbose(format!(
        "importing {file} into {index} (sequential={sequential}, recreate={recreate})"
    ));
    let path = Path::new(file);
    let report = if sequential {
        ingest_sequential(client, index, path)?
    } else {
        ingest_bulk(client, index, path)?
    };
    logging::info(format!(
        "indexed {}/{} document(s) into {index}",
        report.indexed, report.submitted
    ));
    if report.failed > 0 {
        logging::stage("import", format!("{} document(s) failed", report.failed));
        for reason in &report.errors {
            logging::stage("import", reason);
        }
    }
    Ok(())
}

pub fn search(
    client: &SearchClient,
    index: &str,
    query: String,
    min: Option<i64>,
    max: Option<i64>,
    from: Option<String>,
    to: Option<String>,
    limit: usize,
) -> Result<()> {
    let spec = QuerySpec {
        text: query,
        numeric: Bounds { min, max },
        date: Bounds { min: from, max: to },
        limit,
    };
    let hits = run_search(client, index, &spec)?;
    print_rows(&present(&hits));
    Ok(())
}

pub fn similar(client: &SearchClient, index: &str, id: &str, limit: usize) -> Result<()> {
    let hits = run_similar(client, index, id, limit)?;
    print_rows(&present(&hits));
    Ok(())
}

pub fn delete(client: &SearchClient, index: &str, ids: &[String]) -> Result<()> {
    let report = delete_ids(client, index, ids)?;
    logging::info(format!(
        "deleted {} of {} (missing {}, failed {})",
        report.deleted, report.requested, report.missing, report.failed
    ));
    if report.failed > 0 {
        return Err(anyhow!(format!(
            "{} delete action(s) failed",
            report.failed
        )));
    }
    Ok(())
}

fn print_rows(rows: &[ResultRow]) {
    if rows.is_empty() {
        println!("no hits");
        return;
    }
    println!("{:<24} {:>8}  snippet", "id", "score");
    for row in rows {
        println!("{:<24} {:>8.2}  {}", row.id, row.score, row.snippet);
    }
}
