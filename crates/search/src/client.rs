use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use rowdex_core::{Document, IndexSchema, SearchResponse};

use crate::config::BackendConfig;
use crate::error::{Result, SearchError};

/// Long-lived handle to the external index. Constructed once at startup and
/// passed by reference into every operation; holds no other state.
pub struct SearchClient {
    http: Client,
    base: String,
    username: Option<String>,
    password: Option<String>,
}

/// Identity of the backend, reported once at startup.
#[derive(Debug, Clone)]
pub struct ClusterInfo {
    pub cluster_name: String,
    pub version: String,
    pub node_name: String,
}

#[derive(Deserialize)]
struct RootInfo {
    name: String,
    cluster_name: String,
    version: VersionInfo,
}

#[derive(Deserialize)]
struct VersionInfo {
    number: String,
}

/// Parsed `_bulk` response. `items` holds one single-entry map per staged
/// action, keyed by the action name.
#[derive(Debug, Deserialize)]
pub struct BulkResponse {
    pub errors: bool,
    #[serde(default)]
    pub items: Vec<HashMap<String, BulkItemStatus>>,
}

#[derive(Debug, Deserialize)]
pub struct BulkItemStatus {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub status: u16,
    #[serde(default)]
    pub error: Option<Value>,
}

impl BulkItemStatus {
    pub fn reason(&self) -> String {
        self.error
            .as_ref()
            .map(|error| error.to_string())
            .unwrap_or_else(|| format!("status {}", self.status))
    }
}

impl BulkResponse {
    pub fn statuses(&self) -> impl Iterator<Item = &BulkItemStatus> {
        self.items.iter().filter_map(|item| item.values().next())
    }
}

impl SearchClient {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            http: Client::new(),
            base: config.url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base, path);
        let mut request = self.http.request(method, url);
        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_deref());
        }
        request
    }

    fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let reason = response.text().unwrap_or_default();
        Err(SearchError::Backend {
            status: status.as_u16(),
            reason,
        })
    }

    /// Fetches the backend's identity; the first call made at startup, and
    /// the one whose failure is fatal to the process.
    pub fn info(&self) -> Result<ClusterInfo> {
        let response = Self::check(self.request(Method::GET, "").send()?)?;
        let root: RootInfo = response.json()?;
        Ok(ClusterInfo {
            cluster_name: root.cluster_name,
            version: root.version.number,
            node_name: root.name,
        })
    }

    pub fn index_exists(&self, index: &str) -> Result<bool> {
        let response = self.request(Method::HEAD, index).send()?;
        match response.status().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            status => Err(SearchError::Backend {
                status,
                reason: format!("unexpected status for HEAD {index}"),
            }),
        }
    }

    pub fn create_index(&self, index: &str, schema: &IndexSchema) -> Result<()> {
        let mut request = self.request(Method::PUT, index);
        if let Some(body) = schema.body() {
            request = request.json(&body);
        }
        Self::check(request.send()?)?;
        debug!(index, schema = schema.as_str(), "created index");
        Ok(())
    }

    pub fn delete_index(&self, index: &str) -> Result<()> {
        Self::check(self.request(Method::DELETE, index).send()?)?;
        Ok(())
    }

    /// Makes recent writes visible to subsequent reads.
    pub fn refresh(&self, index: &str) -> Result<()> {
        Self::check(
            self.request(Method::POST, &format!("{index}/_refresh"))
                .send()?,
        )?;
        Ok(())
    }

    /// Submits a prepared NDJSON body to `_bulk` and returns the per-item
    /// results for tallying.
    pub fn bulk(&self, index: &str, body: String) -> Result<BulkResponse> {
        debug!(index, bytes = body.len(), "bulk request");
        let response = Self::check(
            self.request(Method::POST, &format!("{index}/_bulk"))
                .header(CONTENT_TYPE, "application/x-ndjson")
                .body(body)
                .send()?,
        )?;
        Ok(response.json()?)
    }

    /// Writes one document under an explicit identifier.
    pub fn put_doc(&self, index: &str, id: &str, doc: &Document) -> Result<()> {
        Self::check(
            self.request(Method::PUT, &format!("{index}/_doc/{id}"))
                .json(doc)
                .send()?,
        )?;
        Ok(())
    }

    pub fn search(&self, index: &str, body: &Value) -> Result<SearchResponse> {
        debug!(index, "search request");
        let response = Self::check(
            self.request(Method::POST, &format!("{index}/_search"))
                .json(body)
                .send()?,
        )?;
        Ok(response.json()?)
    }
}
