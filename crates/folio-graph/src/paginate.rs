//! Paginated collection traversal.
//!
//! Pages are requested strictly in increasing order; page N+1 is never issued
//! before page N resolves, because the continuation predicate depends on the
//! prior response's `total`. A non-2xx response aborts the whole traversal
//! and discards the partial accumulation.

use serde::Deserialize;
use std::future::Future;

use folio_core::FolioResult;

/// Requested page size. The server may cap it; the items it actually returns
/// are authoritative, only the continuation arithmetic uses this value.
pub const PAGE_LIMIT: u64 = 500;

/// One window over a node's related items.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct PageResponse<T> {
    #[serde(default)]
    pub items: Option<Vec<T>>,
    #[serde(default)]
    pub total: u64,
}

/// Fetch every page of a related collection into one ordered sequence.
///
/// `fetch_page` is invoked with page numbers starting at 1 and must request
/// [`PAGE_LIMIT`] items per page. Traversal continues while
/// `page * limit < total`, so it terminates once pages cover the reported
/// total.
pub async fn fetch_all<T, F, Fut>(mut fetch_page: F) -> FolioResult<Vec<T>>
where
    F: FnMut(u64) -> Fut,
    Fut: Future<Output = FolioResult<PageResponse<T>>>,
{
    let mut items = Vec::new();
    let mut page: u64 = 1;

    loop {
        let response = fetch_page(page).await?;
        if let Some(batch) = response.items {
            items.extend(batch);
        }
        if page * PAGE_LIMIT >= response.total {
            break;
        }
        page += 1;
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::StatusError;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn page_of(range: std::ops::Range<u64>, total: u64) -> PageResponse<u64> {
        PageResponse {
            items: Some(range.collect()),
            total,
        }
    }

    #[tokio::test]
    async fn test_terminates_after_covering_total() {
        // total=1200, limit=500: pages 1..=3 and nothing more.
        let requested = AtomicU64::new(0);
        let items = fetch_all(|page| {
            requested.fetch_add(1, Ordering::SeqCst);
            let start = (page - 1) * PAGE_LIMIT;
            let end = (page * PAGE_LIMIT).min(1200);
            async move { Ok(page_of(start..end, 1200)) }
        })
        .await
        .unwrap();

        assert_eq!(requested.load(Ordering::SeqCst), 3);
        assert_eq!(items.len(), 1200);
        assert_eq!(items[0], 0);
        assert_eq!(items[1199], 1199);
    }

    #[tokio::test]
    async fn test_single_page_collection() {
        let items = fetch_all(|_page| async { Ok(page_of(0..7, 7)) })
            .await
            .unwrap();
        assert_eq!(items, (0..7).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_missing_items_field_is_skipped() {
        let items: Vec<u64> = fetch_all(|_page| async {
            Ok(PageResponse {
                items: None,
                total: 0,
            })
        })
        .await
        .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_mid_traversal_failure_discards_accumulation() {
        let result: FolioResult<Vec<u64>> = fetch_all(|page| async move {
            if page == 1 {
                Ok(page_of(0..PAGE_LIMIT, 900))
            } else {
                Err(StatusError::new(502, "Bad Gateway", "GET page 2", None).into())
            }
        })
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_pages_are_sequential() {
        let last_seen = AtomicU64::new(0);
        let _ = fetch_all(|page| {
            let previous = last_seen.swap(page, Ordering::SeqCst);
            assert_eq!(page, previous + 1);
            let start = (page - 1) * PAGE_LIMIT;
            let end = (page * PAGE_LIMIT).min(1100);
            async move { Ok(page_of(start..end, 1100)) }
        })
        .await
        .unwrap();
        assert_eq!(last_seen.load(Ordering::SeqCst), 3);
    }
}
