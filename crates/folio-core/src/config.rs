//! Environment-sourced configuration.
//!
//! Every knob is read once at startup via [`FolioConfig::from_env`] and the
//! resulting value is shared read-only for the lifetime of the process.
//! Defaults point at local development services, matching the `FOLIO_*`
//! variables used in deployment manifests.

use serde::Deserialize;
use std::str::FromStr;

/// Header carrying the API key on every outbound request.
pub const API_KEY_HEADER: &str = "X-Api-Key";

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn env_parse<T: FromStr>(name: &str, default: T) -> T {
    env_var(name)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_bool(name: &str, default: bool) -> bool {
    match env_var(name).as_deref() {
        Some("true") | Some("1") | Some("yes") => true,
        Some("false") | Some("0") | Some("no") => false,
        _ => default,
    }
}

/// Connection settings for the relationship graph API.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphApiConfig {
    pub base_url: String,
    pub api_key: String,
}

impl Default for GraphApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8092".to_string(),
            api_key: "folio_dev_key".to_string(),
        }
    }
}

/// Bulk write sizing: how many ids per request and how many requests in flight.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BatchConfig {
    pub chunk_size: usize,
    pub concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            chunk_size: 100,
            concurrency: 4,
        }
    }
}

/// Default `noEvent` / `waitForPurge` query parameters, independently
/// configurable for add and remove operations. Callers may override per call.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WriteDefaults {
    pub add_no_event: bool,
    pub add_wait_for_purge: bool,
    pub remove_no_event: bool,
    pub remove_wait_for_purge: bool,
}

impl Default for WriteDefaults {
    fn default() -> Self {
        Self {
            add_no_event: false,
            add_wait_for_purge: true,
            remove_no_event: false,
            remove_wait_for_purge: false,
        }
    }
}

/// Durable event stream settings.
///
/// `enabled = false` puts the emitter in dry-run mode: writes resolve
/// immediately without contacting the stream.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamConfig {
    pub name: String,
    pub region: String,
    pub base_url: String,
    pub enabled: bool,
    pub max_retries: u32,
    pub base_delay_ms: u64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            name: "folio-follows".to_string(),
            region: "eu-west-1".to_string(),
            base_url: "http://localhost:8099".to_string(),
            enabled: true,
            max_retries: 3,
            base_delay_ms: 200,
        }
    }
}

impl StreamConfig {
    /// Record ingest endpoint for the configured stream.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/streams/{}/records",
            self.base_url.trim_end_matches('/'),
            self.name
        )
    }
}

/// Provenance recorded on relationships created by this process.
#[derive(Debug, Clone, Deserialize)]
pub struct ProvenanceConfig {
    pub by_tool: String,
    pub by_user: Option<String>,
}

impl Default for ProvenanceConfig {
    fn default() -> Self {
        Self {
            by_tool: "folio".to_string(),
            by_user: None,
        }
    }
}

/// Bounded retry policy for idempotent requests.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RetryConfig {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 200,
        }
    }
}

/// Top-level configuration, immutable after startup.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FolioConfig {
    pub graph: GraphApiConfig,
    pub batch: BatchConfig,
    pub write_defaults: WriteDefaults,
    pub stream: StreamConfig,
    pub provenance: ProvenanceConfig,
    pub retry: RetryConfig,
}

impl FolioConfig {
    /// Load configuration from `FOLIO_*` environment variables, falling back
    /// to development defaults for anything unset.
    pub fn from_env() -> Self {
        let graph_defaults = GraphApiConfig::default();
        let stream_defaults = StreamConfig::default();

        Self {
            graph: GraphApiConfig {
                base_url: env_var("FOLIO_GRAPH_URL").unwrap_or(graph_defaults.base_url),
                api_key: env_var("FOLIO_GRAPH_API_KEY").unwrap_or(graph_defaults.api_key),
            },
            batch: BatchConfig {
                chunk_size: env_parse("FOLIO_BATCH_CHUNK_SIZE", 100),
                concurrency: env_parse("FOLIO_BATCH_CONCURRENCY", 4),
            },
            write_defaults: WriteDefaults {
                add_no_event: env_bool("FOLIO_ADD_NO_EVENT", false),
                add_wait_for_purge: env_bool("FOLIO_ADD_WAIT_FOR_PURGE", true),
                remove_no_event: env_bool("FOLIO_REMOVE_NO_EVENT", false),
                remove_wait_for_purge: env_bool("FOLIO_REMOVE_WAIT_FOR_PURGE", false),
            },
            stream: StreamConfig {
                name: env_var("FOLIO_STREAM_NAME").unwrap_or(stream_defaults.name),
                region: env_var("FOLIO_STREAM_REGION").unwrap_or(stream_defaults.region),
                base_url: env_var("FOLIO_STREAM_URL").unwrap_or(stream_defaults.base_url),
                enabled: env_bool("FOLIO_STREAM_ENABLED", true),
                max_retries: env_parse("FOLIO_STREAM_MAX_RETRIES", 3),
                base_delay_ms: env_parse("FOLIO_STREAM_BASE_DELAY_MS", 200),
            },
            provenance: ProvenanceConfig {
                by_tool: env_var("FOLIO_TOOL_ID").unwrap_or_else(|| "folio".to_string()),
                by_user: env_var("FOLIO_ACTOR"),
            },
            retry: RetryConfig {
                max_attempts: env_parse("FOLIO_MAX_RETRIES", 3),
                base_delay_ms: env_parse("FOLIO_RETRY_BASE_DELAY_MS", 200),
            },
        }
    }
}
