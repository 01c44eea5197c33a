//! Generic node operations.

use serde_json::Value;

use folio_core::FolioResult;

use super::{write_params, WriteKind, WriteOverrides};
use crate::client::GraphClient;
use crate::request::{build_request, Method, NodeType};

/// Fetch a node by id.
pub async fn get_node(client: &GraphClient, node: NodeType, id: &str) -> FolioResult<Value> {
    let request = build_request(Method::Get, node, Some(id), None, None, None, None, vec![]);
    client.send(&request).await
}

/// Create or update a node. The graph service treats this as an upsert.
pub async fn set_node(
    client: &GraphClient,
    node: NodeType,
    id: &str,
    data: Value,
    over: WriteOverrides,
) -> FolioResult<Value> {
    let params = write_params(&client.write_defaults, WriteKind::Add, over);
    let request = build_request(
        Method::Update,
        node,
        Some(id),
        None,
        None,
        None,
        Some(data),
        params,
    );
    client.send(&request).await
}

/// Delete a node by id.
pub async fn remove_node(
    client: &GraphClient,
    node: NodeType,
    id: &str,
    over: WriteOverrides,
) -> FolioResult<Value> {
    let params = write_params(&client.write_defaults, WriteKind::Remove, over);
    let request = build_request(
        Method::Delete,
        node,
        Some(id),
        None,
        None,
        None,
        None,
        params,
    );
    client.send(&request).await
}
