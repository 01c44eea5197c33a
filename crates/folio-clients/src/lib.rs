//! # Folio Clients
//!
//! Narrow request/response wrappers for the REST services adjacent to the
//! relationship graph: licensing, sessions, usage, facets and search. Each
//! client exposes one or two typed calls and classifies failures into the
//! shared status taxonomy. None of these are consumed by the synchronization
//! engine.

pub mod facets;
pub mod licence;
pub mod search;
pub mod session;
pub mod usage;

pub use facets::FacetsClient;
pub use licence::LicenceClient;
pub use search::SearchClient;
pub use session::SessionClient;
pub use usage::UsageClient;

use serde::de::DeserializeOwned;

use folio_core::{FolioResult, StatusError, StatusKind, API_KEY_HEADER};

/// GET a JSON document with key auth and status classification.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &reqwest::Client,
    api_key: &str,
    url: &str,
    context: &str,
) -> FolioResult<T> {
    let response = http
        .get(url)
        .header(API_KEY_HEADER, api_key)
        .send()
        .await?;

    let status = response.status();
    if StatusKind::from_status(status.as_u16()).is_some() {
        let reason = status.canonical_reason().unwrap_or("Unknown");
        return Err(StatusError::new(
            status.as_u16(),
            reason,
            context,
            Some(url.to_string()),
        )
        .into());
    }

    Ok(response.json().await?)
}

pub(crate) fn http_client() -> FolioResult<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?)
}
