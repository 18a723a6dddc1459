use rowdex_core::{build_search_body, build_similar_body, Hit, QuerySpec};

use crate::client::SearchClient;
use crate::error::Result;

/// Runs one boolean search. The body comes from the pure builder; this is
/// the only place the search touches the network.
pub fn run_search(client: &SearchClient, index: &str, spec: &QuerySpec) -> Result<Vec<Hit>> {
    let body = build_search_body(spec);
    Ok(client.search(index, &body)?.hits.hits)
}

/// Runs a "find documents like this one" query anchored on `id`.
pub fn run_similar(
    client: &SearchClient,
    index: &str,
    id: &str,
    limit: usize,
) -> Result<Vec<Hit>> {
    let body = build_similar_body(index, id, limit);
    Ok(client.search(index, &body)?.hits.hits)
}
