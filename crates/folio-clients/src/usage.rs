//! Usage service client.

use serde::Deserialize;
use serde_json::Value;

use folio_core::FolioResult;

/// Reading/usage summary for a user.
#[derive(Debug, Clone, Deserialize)]
pub struct UsageSummary {
    pub uuid: String,
    #[serde(default)]
    pub reads: Option<u64>,
    #[serde(rename = "lastSeen", default)]
    pub last_seen: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Client for the usage service.
#[derive(Clone)]
pub struct UsageClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl UsageClient {
    pub fn new(base_url: &str, api_key: &str) -> FolioResult<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http: crate::http_client()?,
        })
    }

    /// Fetch a user's usage summary.
    pub async fn summary(&self, user_id: &str) -> FolioResult<UsageSummary> {
        let url = format!("{}/users/{}/usage", self.base_url, user_id);
        crate::get_json(&self.http, &self.api_key, &url, "GET usage summary").await
    }
}
