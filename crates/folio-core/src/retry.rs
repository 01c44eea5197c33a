//! Bounded retry with exponential backoff.

use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::config::RetryConfig;
use crate::error::FolioResult;

/// Run `op` until it succeeds, the error is not retryable, or
/// `policy.max_attempts` attempts have been made.
///
/// Only transport failures and server-side statuses are retried (see
/// [`crate::error::FolioError::is_retryable`]); client errors surface on the
/// first attempt. Backoff doubles per attempt from `base_delay_ms`.
pub async fn with_retries<T, F, Fut>(policy: &RetryConfig, what: &str, mut op: F) -> FolioResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = FolioResult<T>>,
{
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < policy.max_attempts.max(1) => {
                let delay =
                    Duration::from_millis(policy.base_delay_ms << (attempt - 1).min(6));
                warn!(%err, attempt, what, delay_ms = delay.as_millis() as u64, "retrying after backoff");
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
