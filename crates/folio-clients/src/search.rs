//! Concept search client.

use serde::Deserialize;
use serde_json::Value;

use folio_core::{FolioResult, StatusError, StatusKind, API_KEY_HEADER};

/// One concept hit from the search service.
#[derive(Debug, Clone, Deserialize)]
pub struct ConceptHit {
    pub uuid: String,
    #[serde(rename = "prefLabel", default)]
    pub pref_label: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<ConceptHit>,
}

/// Client for the concept search service.
#[derive(Clone)]
pub struct SearchClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl SearchClient {
    pub fn new(base_url: &str, api_key: &str) -> FolioResult<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http: crate::http_client()?,
        })
    }

    /// Search concepts by free-text term.
    pub async fn concepts(&self, term: &str) -> FolioResult<Vec<ConceptHit>> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("q", term)])
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if StatusKind::from_status(status.as_u16()).is_some() {
            let reason = status.canonical_reason().unwrap_or("Unknown");
            return Err(
                StatusError::new(status.as_u16(), reason, "GET concept search", Some(url)).into(),
            );
        }

        let parsed: SearchResponse = response.json().await?;
        Ok(parsed.results)
    }
}
