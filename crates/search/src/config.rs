use std::env;

pub const DEFAULT_URL: &str = "http://localhost:9200";
pub const DEFAULT_INDEX: &str = "csv_documents";

/// Connection settings for the external index. Read once at startup; the
/// resulting client handle is passed into every operation explicitly.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub index: String,
}

impl BackendConfig {
    pub fn from_env() -> Self {
        Self {
            url: env::var("ROWDEX_URL").unwrap_or_else(|_| DEFAULT_URL.to_string()),
            username: env::var("ROWDEX_USERNAME").ok(),
            password: env::var("ROWDEX_PASSWORD").ok(),
            index: env::var("ROWDEX_INDEX").unwrap_or_else(|_| DEFAULT_INDEX.to_string()),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            username: None,
            password: None,
            index: DEFAULT_INDEX.to_string(),
        }
    }
}
