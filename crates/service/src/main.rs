use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::{routing::get, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::task;
use tracing::{error, info};

use rowdex_core::{present, Bounds, IndexSchema, QuerySpec, ResultRow, DEFAULT_LIMIT};
use rowdex_search::{
    delete_ids, ensure_index, ingest_bulk, ingest_sequential, run_search, run_similar,
    BackendConfig, IngestReport, SearchClient, SearchError,
};

struct AppState {
    client: SearchClient,
    index: String,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt::init();
    let config = BackendConfig::from_env();
    let client = SearchClient::new(&config);
    // Startup connectivity is the one fatal failure: no backend, no UI.
    let cluster = client
        .info()
        .with_context(|| format!("cannot reach the search backend at {}", config.url))?;
    info!(
        cluster = %cluster.cluster_name,
        version = %cluster.version,
        node = %cluster.node_name,
        index = %config.index,
        "connected"
    );
    let state = Arc::new(AppState {
        client,
        index: config.index,
    });
    let app = Router::new()
        .route("/", get(serve_ui))
        .route("/api/import", post(handle_import))
        .route("/api/search", post(handle_search))
        .route("/api/similar", post(handle_similar))
        .route("/api/delete", post(handle_delete))
        .with_state(state);
    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8000".to_string())
        .parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening" = %addr);
    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct ImportParams {
    sequential: Option<bool>,
    recreate: Option<bool>,
    schema: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImportResponse {
    submitted: usize,
    indexed: usize,
    failed: usize,
    errors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SearchRequest {
    text: Option<String>,
    min: Option<i64>,
    max: Option<i64>,
    from: Option<String>,
    to: Option<String>,
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct SimilarRequest {
    id: String,
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct DeleteRequest {
    ids: Vec<String>,
}

#[derive(Debug, Serialize)]
struct DeleteResponse {
    requested: usize,
    deleted: usize,
    missing: usize,
    failed: usize,
}

#[derive(Debug, Serialize)]
struct SearchResults {
    rows: Vec<ResultRow>,
}

async fn handle_import(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ImportParams>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
    let upload = extract_file(&mut multipart).await?;
    let schema = match params.schema.as_deref() {
        None => IndexSchema::Declared,
        Some(name) => IndexSchema::from_str(name)
            .ok_or_else(|| AppError::bad_request(format!("unknown schema {name}")))?,
    };
    let sequential = params.sequential.unwrap_or(false);
    let recreate = params.recreate.unwrap_or(false);
    let report = task::spawn_blocking(move || -> Result<IngestReport, SearchError> {
        let mut tmp = NamedTempFile::new().map_err(SearchError::Io)?;
        std::io::Write::write_all(&mut tmp, &upload).map_err(SearchError::Io)?;
        let state = state.as_ref();
        ensure_index(&state.client, &state.index, &schema, recreate)?;
        if sequential {
            ingest_sequential(&state.client, &state.index, tmp.path())
        } else {
            ingest_bulk(&state.client, &state.index, tmp.path())
        }
    })
    .await
    .map_err(AppError::internal)??;
    Ok(Json(ImportResponse {
        submitted: report.submitted,
        indexed: report.indexed,
        failed: report.failed,
        errors: report.errors,
    }))
}

async fn handle_search(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<SearchResults>, AppError> {
    let spec = QuerySpec {
        text: body.text.unwrap_or_default(),
        numeric: Bounds {
            min: body.min,
            max: body.max,
        },
        date: Bounds {
            min: body.from,
            max: body.to,
        },
        limit: body.limit.unwrap_or(DEFAULT_LIMIT),
    };
    let hits = task::spawn_blocking(move || {
        let state = state.as_ref();
        run_search(&state.client, &state.index, &spec)
    })
    .await
    .map_err(AppError::internal)??;
    Ok(Json(SearchResults {
        rows: present(&hits),
    }))
}

async fn handle_similar(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SimilarRequest>,
) -> Result<Json<SearchResults>, AppError> {
    let limit = body.limit.unwrap_or(DEFAULT_LIMIT);
    let hits = task::spawn_blocking(move || {
        let state = state.as_ref();
        run_similar(&state.client, &state.index, &body.id, limit)
    })
    .await
    .map_err(AppError::internal)??;
    Ok(Json(SearchResults {
        rows: present(&hits),
    }))
}

async fn handle_delete(
    State(state): State<Arc<AppState>>,
    Json(body): Json<DeleteRequest>,
) -> Result<Json<DeleteResponse>, AppError> {
    let report = task::spawn_blocking(move || {
        let state = state.as_ref();
        delete_ids(&state.client, &state.index, &body.ids)
    })
    .await
    .map_err(AppError::internal)??;
    Ok(Json(DeleteResponse {
        requested: report.requested,
        deleted: report.deleted,
        missing: report.missing,
        failed: report.failed,
    }))
}

async fn extract_file(multipart: &mut Multipart) -> Result<Vec<u8>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(AppError::bad_request)?
    {
        if field.name() == Some("file") {
            let data = field.bytes().await.map_err(AppError::bad_request)?;
            return Ok(data.to_vec());
        }
    }
    Err(AppError::bad_request("missing file"))
}

async fn serve_ui() -> Html<&'static str> {
    Html(include_str!("../../../ui/index.html"))
}

#[derive(Debug, Error)]
enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Backend(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn bad_request<E: ToString>(msg: E) -> Self {
        Self::BadRequest(msg.to_string())
    }

    fn internal<E: Into<anyhow::Error>>(err: E) -> Self {
        Self::Internal(err.into())
    }
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Backend { .. } | SearchError::Http(_) => {
                AppError::Backend(err.to_string())
            }
            other => AppError::BadRequest(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Backend(msg) => (StatusCode::BAD_GATEWAY, msg).into_response(),
            AppError::Internal(err) => {
                error!("internal_error" = %err);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
        }
    }
}
