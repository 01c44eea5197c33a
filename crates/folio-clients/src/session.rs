//! Session service client.

use serde::Deserialize;
use serde_json::Value;

use folio_core::FolioResult;

/// A resolved session.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub uuid: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Client for the session service.
#[derive(Clone)]
pub struct SessionClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl SessionClient {
    pub fn new(base_url: &str, api_key: &str) -> FolioResult<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http: crate::http_client()?,
        })
    }

    /// Resolve a session token to the session record.
    pub async fn session(&self, session_token: &str) -> FolioResult<Session> {
        let url = format!("{}/sessions/{}", self.base_url, session_token);
        crate::get_json(&self.http, &self.api_key, &url, "GET session").await
    }

    /// Resolve a session token to a user uuid; `None` when the session does
    /// not exist or has expired.
    pub async fn user_uuid(&self, session_token: &str) -> FolioResult<Option<String>> {
        match self.session(session_token).await {
            Ok(session) => Ok(Some(session.uuid)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }
}
