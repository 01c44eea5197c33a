//! Graph API transport.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use folio_core::config::{BatchConfig, FolioConfig, RetryConfig, WriteDefaults};
use folio_core::{with_retries, FolioResult, StatusError, StatusKind, API_KEY_HEADER};

use crate::paginate::{fetch_all, PageResponse, PAGE_LIMIT};
use crate::props::{digest_properties, followed_properties, RelProps};
use crate::request::{build_request, GraphRequest, Method, NodeType, Relation};

/// Client for the user-relationship graph API.
///
/// Holds the immutable per-process configuration: the API key is applied to a
/// fresh request builder on every call, and the relationship property presets
/// are derived once here and only ever copied afterwards.
#[derive(Clone)]
pub struct GraphClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    retry: RetryConfig,
    pub(crate) batch: BatchConfig,
    pub(crate) write_defaults: WriteDefaults,
    followed_props: RelProps,
    digest_props: RelProps,
}

impl GraphClient {
    /// Create a client from process configuration.
    pub fn new(config: &FolioConfig) -> FolioResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: config.graph.base_url.trim_end_matches('/').to_string(),
            api_key: config.graph.api_key.clone(),
            retry: config.retry,
            batch: config.batch,
            write_defaults: config.write_defaults,
            followed_props: followed_properties(&config.provenance),
            digest_props: digest_properties(&config.provenance),
        })
    }

    /// Provenance-only relationship preset.
    pub fn followed_properties(&self) -> &RelProps {
        &self.followed_props
    }

    /// Daily digest relationship preset.
    pub fn digest_properties(&self) -> &RelProps {
        &self.digest_props
    }

    /// Send a built request and parse the JSON response.
    ///
    /// Idempotent reads are retried per the configured policy; writes go out
    /// once (the graph service treats relationship writes as idempotent
    /// upserts, so any retrying is left to the caller).
    pub async fn send(&self, request: &GraphRequest) -> FolioResult<Value> {
        if request.method.is_read() {
            let what = format!("{} /{}", request.method.verb(), request.path);
            with_retries(&self.retry, &what, || self.dispatch(request)).await
        } else {
            self.dispatch(request).await
        }
    }

    async fn dispatch(&self, request: &GraphRequest) -> FolioResult<Value> {
        let url = format!("{}/{}", self.base_url, request.path);

        let mut builder = self
            .http
            .request(request.method.http(), &url)
            .header(API_KEY_HEADER, &self.api_key);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        if StatusKind::from_status(status.as_u16()).is_some() {
            let reason = status.canonical_reason().unwrap_or("Unknown");
            let context = format!("{} /{}", request.method.verb(), request.path);
            return Err(StatusError::new(status.as_u16(), reason, &context, Some(url)).into());
        }

        debug!(method = request.method.verb(), path = %request.path, "Graph request ok");

        let text = response.text().await?;
        if text.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Fetch every item related to a node through `relation`, across all
    /// pages.
    pub async fn related_items<T: DeserializeOwned>(
        &self,
        node: NodeType,
        id: &str,
        relation: Relation,
        related: NodeType,
    ) -> FolioResult<Vec<T>> {
        fetch_all(|page| {
            let request = build_request(
                Method::Get,
                node,
                Some(id),
                Some(relation),
                Some(related),
                None,
                None,
                vec![
                    ("page".to_string(), page.to_string()),
                    ("limit".to_string(), PAGE_LIMIT.to_string()),
                ],
            );
            async move {
                let value = self.send(&request).await?;
                Ok(serde_json::from_value::<PageResponse<T>>(value)?)
            }
        })
        .await
    }
}
