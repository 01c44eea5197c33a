//! Durable event emission for Folio.
//!
//! At-least-once delivery of synchronization outcomes to the event stream:
//! every write is retried with exponential backoff up to the configured
//! maximum before a fatal error surfaces. Disabling the stream in
//! configuration turns writes into immediate no-ops, for dry runs and
//! disaster avoidance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use folio_core::config::StreamConfig;
use folio_core::{FolioError, FolioResult, StatusError, StatusKind};

/// Acknowledgement returned by the stream for an accepted record.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Ack {
    #[serde(default)]
    pub sequence: Option<String>,
}

/// One record as shipped to the stream ingest endpoint.
#[derive(Debug, Clone, Serialize)]
struct Record<'a> {
    uuid: &'a str,
    event: &'a str,
    data: &'a Value,
    time: DateTime<Utc>,
}

/// Client for the durable event stream.
#[derive(Clone)]
pub struct EventEmitter {
    http: reqwest::Client,
    config: StreamConfig,
}

impl EventEmitter {
    pub fn new(config: StreamConfig) -> FolioResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { http, config })
    }

    /// Append one event to the stream.
    ///
    /// Retries any failure up to `max_retries` times beyond the first
    /// attempt; exhaustion surfaces as [`FolioError::StreamExhausted`]
    /// wrapping the final cause. With the stream disabled, resolves
    /// immediately without touching the network.
    pub async fn write(&self, subject_id: &str, event: &str, payload: Value) -> FolioResult<Ack> {
        if !self.config.enabled {
            debug!(subject_id, event, "Stream writes disabled, skipping");
            return Ok(Ack::default());
        }

        let record = Record {
            uuid: subject_id,
            event,
            data: &payload,
            time: Utc::now(),
        };

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.post_record(&record).await {
                Ok(ack) => {
                    debug!(subject_id, event, attempt, "Event written to stream");
                    return Ok(ack);
                }
                Err(err) if attempt <= self.config.max_retries => {
                    let delay =
                        Duration::from_millis(self.config.base_delay_ms << (attempt - 1).min(6));
                    warn!(%err, attempt, stream = %self.config.name, "Stream write failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    return Err(FolioError::StreamExhausted {
                        attempts: attempt,
                        source: Box::new(err),
                    })
                }
            }
        }
    }

    async fn post_record(&self, record: &Record<'_>) -> FolioResult<Ack> {
        let url = self.config.endpoint();
        let response = self
            .http
            .post(&url)
            .header("X-Stream-Region", &self.config.region)
            .json(record)
            .send()
            .await?;

        let status = response.status();
        if StatusKind::from_status(status.as_u16()).is_some() {
            let reason = status.canonical_reason().unwrap_or("Unknown");
            let context = format!("POST record to stream {}", self.config.name);
            return Err(StatusError::new(status.as_u16(), reason, &context, Some(url)).into());
        }

        let text = response.text().await?;
        if text.is_empty() {
            return Ok(Ack::default());
        }
        Ok(serde_json::from_str(&text).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn disabled_config() -> StreamConfig {
        StreamConfig {
            // Nothing listens here; a contacted write would fail loudly.
            base_url: "http://127.0.0.1:1".to_string(),
            enabled: false,
            ..StreamConfig::default()
        }
    }

    #[tokio::test]
    async fn test_dry_run_resolves_without_network() {
        let emitter = EventEmitter::new(disabled_config()).unwrap();
        let ack = emitter
            .write("user-1", "subscribe", json!([{"uuid": "c1"}]))
            .await
            .unwrap();
        assert!(ack.sequence.is_none());
    }

    #[tokio::test]
    async fn test_exhaustion_reports_attempts() {
        let config = StreamConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            enabled: true,
            max_retries: 1,
            base_delay_ms: 1,
            ..StreamConfig::default()
        };
        let emitter = EventEmitter::new(config).unwrap();

        let err = emitter
            .write("user-1", "subscribe", json!([]))
            .await
            .unwrap_err();
        match err {
            FolioError::StreamExhausted { attempts, .. } => assert_eq!(attempts, 2),
            other => panic!("expected exhaustion, got {other:?}"),
        }
    }

    #[test]
    fn test_record_wire_shape() {
        let data = json!([{"uuid": "c1"}]);
        let record = Record {
            uuid: "user-1",
            event: "subscribe",
            data: &data,
            time: Utc::now(),
        };
        let wire = serde_json::to_value(&record).unwrap();
        assert_eq!(wire["uuid"], "user-1");
        assert_eq!(wire["event"], "subscribe");
        assert_eq!(wire["data"][0]["uuid"], "c1");
        assert!(wire.get("time").is_some());
    }
}
