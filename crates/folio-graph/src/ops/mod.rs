//! Typed domain operations over the relationship graph.
//!
//! Thin compositions of the request builder, the paginated fetcher and the
//! chunked writer. Every write merges the configured `noEvent` /
//! `waitForPurge` defaults, independently for add and remove, unless the
//! caller overrides them.

pub mod follows;
pub mod members;
pub mod nodes;
pub mod preferences;

use serde_json::{json, Value};

use folio_core::config::WriteDefaults;
use folio_core::FolioResult;

use crate::batch::apply_chunked;
use crate::client::GraphClient;
use crate::props::RelProps;
use crate::request::{build_request, Method, NodeType, Relation};

/// Per-call overrides for the configured write query parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOverrides {
    pub no_event: Option<bool>,
    pub wait_for_purge: Option<bool>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum WriteKind {
    Add,
    Remove,
}

pub(crate) fn write_params(
    defaults: &WriteDefaults,
    kind: WriteKind,
    over: WriteOverrides,
) -> Vec<(String, String)> {
    let (no_event, wait_for_purge) = match kind {
        WriteKind::Add => (defaults.add_no_event, defaults.add_wait_for_purge),
        WriteKind::Remove => (defaults.remove_no_event, defaults.remove_wait_for_purge),
    };
    vec![
        (
            "noEvent".to_string(),
            over.no_event.unwrap_or(no_event).to_string(),
        ),
        (
            "waitForPurge".to_string(),
            over.wait_for_purge.unwrap_or(wait_for_purge).to_string(),
        ),
    ]
}

/// Chunked bulk add of related items.
///
/// Each item must carry a `uuid`; the body for every chunk is
/// `{"subjects": [{..item, "_rel": rel}], "ids": [..]}`.
pub(crate) async fn add_related(
    client: &GraphClient,
    node: NodeType,
    id: &str,
    relation: Relation,
    related: NodeType,
    items: Vec<Value>,
    rel: Option<&RelProps>,
    over: WriteOverrides,
) -> FolioResult<Vec<FolioResult<Value>>> {
    let params = write_params(&client.write_defaults, WriteKind::Add, over);
    let rel_value = rel.map(serde_json::to_value).transpose()?;

    apply_chunked(
        items,
        client.batch.chunk_size,
        client.batch.concurrency,
        |chunk| {
            let ids: Vec<String> = chunk
                .iter()
                .filter_map(|item| item.get("uuid").and_then(Value::as_str))
                .map(String::from)
                .collect();
            let subjects: Vec<Value> = chunk
                .into_iter()
                .map(|mut item| {
                    if let (Some(obj), Some(rel)) = (item.as_object_mut(), rel_value.as_ref()) {
                        obj.insert("_rel".to_string(), rel.clone());
                    }
                    item
                })
                .collect();
            let data = json!({ "subjects": subjects, "ids": ids });
            let request = build_request(
                Method::Create,
                node,
                Some(id),
                Some(relation),
                Some(related),
                None,
                Some(data),
                params.clone(),
            );
            async move { client.send(&request).await }
        },
    )
    .await
}

/// Chunked bulk removal of related items by id.
pub(crate) async fn remove_related(
    client: &GraphClient,
    node: NodeType,
    id: &str,
    relation: Relation,
    related: NodeType,
    ids: Vec<String>,
    over: WriteOverrides,
) -> FolioResult<Vec<FolioResult<Value>>> {
    let params = write_params(&client.write_defaults, WriteKind::Remove, over);

    apply_chunked(
        ids,
        client.batch.chunk_size,
        client.batch.concurrency,
        |chunk| {
            let request = build_request(
                Method::Delete,
                node,
                Some(id),
                Some(relation),
                Some(related),
                None,
                Some(json!({ "ids": chunk })),
                params.clone(),
            );
            async move { client.send(&request).await }
        },
    )
    .await
}
