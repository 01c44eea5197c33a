//! Chunked concurrent writes.
//!
//! A bulk id/item set is split into fixed-size chunks and written with
//! bounded concurrency. A failing chunk does not abort its siblings; its
//! error becomes an element of the result sequence so callers can tell
//! "3 of 4 chunks worked" from "all failed".

use futures::stream::{self, StreamExt};
use std::future::Future;
use tracing::debug;

use folio_core::{FolioError, FolioResult};

/// Split into consecutive chunks of at most `size` elements; the final chunk
/// may be smaller.
pub fn chunk<T>(mut items: Vec<T>, size: usize) -> Vec<Vec<T>> {
    let size = size.max(1);
    let mut chunks = Vec::with_capacity(items.len().div_ceil(size));
    while !items.is_empty() {
        let rest = items.split_off(items.len().min(size));
        chunks.push(items);
        items = rest;
    }
    chunks
}

/// Apply `write` to every chunk of `items`, at most `concurrency` chunks in
/// flight at once. The result sequence preserves chunk submission order;
/// completion order is unconstrained.
///
/// When every chunk fails: a single submitted chunk re-raises its original
/// error verbatim, multiple chunks collapse into
/// [`FolioError::AllBatchesFailed`] carrying all the underlying causes.
/// Otherwise the full mixed sequence is returned for inspection.
pub async fn apply_chunked<T, R, F, Fut>(
    items: Vec<T>,
    chunk_size: usize,
    concurrency: usize,
    write: F,
) -> FolioResult<Vec<FolioResult<R>>>
where
    F: Fn(Vec<T>) -> Fut,
    Fut: Future<Output = FolioResult<R>>,
{
    let chunks = chunk(items, chunk_size);
    let submitted = chunks.len();

    let results: Vec<FolioResult<R>> = stream::iter(chunks.into_iter().map(&write))
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let failed = results.iter().filter(|r| r.is_err()).count();
    debug!(submitted, failed, "Chunked write settled");

    if submitted > 0 && failed == submitted {
        let mut causes: Vec<FolioError> =
            results.into_iter().filter_map(|r| r.err()).collect();
        if causes.len() == 1 {
            return Err(causes.remove(0));
        }
        return Err(FolioError::AllBatchesFailed { causes });
    }

    Ok(results)
}
