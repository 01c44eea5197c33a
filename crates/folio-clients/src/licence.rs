//! Licensing service client.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use folio_core::FolioResult;

/// A licence record from the licensing service.
#[derive(Debug, Clone, Deserialize)]
pub struct Licence {
    pub uuid: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "seatCount", default)]
    pub seat_count: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// An allocated seat on a licence.
#[derive(Debug, Clone, Deserialize)]
pub struct Seat {
    #[serde(rename = "userUuid")]
    pub user_uuid: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct SeatsResponse {
    #[serde(default)]
    seats: Vec<Seat>,
}

/// Client for the licensing service.
#[derive(Clone)]
pub struct LicenceClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl LicenceClient {
    pub fn new(base_url: &str, api_key: &str) -> FolioResult<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http: crate::http_client()?,
        })
    }

    /// Fetch a licence by id.
    pub async fn licence(&self, licence_id: &str) -> FolioResult<Licence> {
        let url = format!("{}/licences/{}", self.base_url, licence_id);
        let licence: Licence =
            crate::get_json(&self.http, &self.api_key, &url, "GET licence").await?;
        debug!(licence_id, "Fetched licence");
        Ok(licence)
    }

    /// Fetch the allocated seats for a licence.
    pub async fn seats(&self, licence_id: &str) -> FolioResult<Vec<Seat>> {
        let url = format!("{}/licences/{}/seats", self.base_url, licence_id);
        let response: SeatsResponse =
            crate::get_json(&self.http, &self.api_key, &url, "GET licence seats").await?;
        Ok(response.seats)
    }
}
