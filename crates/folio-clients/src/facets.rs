//! Facets service client.

use serde::Deserialize;

use folio_core::FolioResult;

/// One facet value attached to a concept.
#[derive(Debug, Clone, Deserialize)]
pub struct FacetValue {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct FacetsResponse {
    #[serde(default)]
    facets: Vec<FacetValue>,
}

/// Client for the facets service.
#[derive(Clone)]
pub struct FacetsClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl FacetsClient {
    pub fn new(base_url: &str, api_key: &str) -> FolioResult<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http: crate::http_client()?,
        })
    }

    /// Facet values for a concept.
    pub async fn facets(&self, concept_id: &str) -> FolioResult<Vec<FacetValue>> {
        let url = format!("{}/concepts/{}/facets", self.base_url, concept_id);
        let response: FacetsResponse =
            crate::get_json(&self.http, &self.api_key, &url, "GET concept facets").await?;
        Ok(response.facets)
    }
}
