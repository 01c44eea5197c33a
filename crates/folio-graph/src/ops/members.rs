//! Licence and group membership operations.

use serde_json::{json, Value};

use folio_core::FolioResult;

use super::{add_related, remove_related, WriteOverrides};
use crate::client::GraphClient;
use crate::model::Member;
use crate::props::RelProps;
use crate::request::{build_request, Method, NodeType, Relation};

/// Users who are members of a licence.
pub async fn licence_members(client: &GraphClient, licence_id: &str) -> FolioResult<Vec<Member>> {
    client
        .related_items(
            NodeType::Licence,
            licence_id,
            Relation::Member,
            NodeType::User,
        )
        .await
}

/// Groups belonging to a licence.
pub async fn licence_groups(client: &GraphClient, licence_id: &str) -> FolioResult<Vec<Member>> {
    client
        .related_items(
            NodeType::Licence,
            licence_id,
            Relation::Member,
            NodeType::Group,
        )
        .await
}

/// Users who are members of a group.
pub async fn group_members(client: &GraphClient, group_id: &str) -> FolioResult<Vec<Member>> {
    client
        .related_items(NodeType::Group, group_id, Relation::Member, NodeType::User)
        .await
}

fn id_items(ids: &[String]) -> Vec<Value> {
    ids.iter().map(|id| json!({ "uuid": id })).collect()
}

/// Bulk-add users to a licence.
pub async fn add_licence_members(
    client: &GraphClient,
    licence_id: &str,
    user_ids: &[String],
    rel: Option<&RelProps>,
    over: WriteOverrides,
) -> FolioResult<Vec<FolioResult<Value>>> {
    add_related(
        client,
        NodeType::Licence,
        licence_id,
        Relation::Member,
        NodeType::User,
        id_items(user_ids),
        rel,
        over,
    )
    .await
}

/// Single-user convenience: one-element chunk through the bulk path.
pub async fn add_licence_member(
    client: &GraphClient,
    licence_id: &str,
    user_id: &str,
    rel: Option<&RelProps>,
    over: WriteOverrides,
) -> FolioResult<()> {
    add_licence_members(client, licence_id, &[user_id.to_string()], rel, over).await?;
    Ok(())
}

/// Bulk-add groups to a licence.
pub async fn add_licence_groups(
    client: &GraphClient,
    licence_id: &str,
    group_ids: &[String],
    rel: Option<&RelProps>,
    over: WriteOverrides,
) -> FolioResult<Vec<FolioResult<Value>>> {
    add_related(
        client,
        NodeType::Licence,
        licence_id,
        Relation::Member,
        NodeType::Group,
        id_items(group_ids),
        rel,
        over,
    )
    .await
}

/// Bulk-add users to a group.
pub async fn add_group_members(
    client: &GraphClient,
    group_id: &str,
    user_ids: &[String],
    rel: Option<&RelProps>,
    over: WriteOverrides,
) -> FolioResult<Vec<FolioResult<Value>>> {
    add_related(
        client,
        NodeType::Group,
        group_id,
        Relation::Member,
        NodeType::User,
        id_items(user_ids),
        rel,
        over,
    )
    .await
}

/// Bulk-remove users from a licence.
pub async fn remove_licence_members(
    client: &GraphClient,
    licence_id: &str,
    user_ids: Vec<String>,
    over: WriteOverrides,
) -> FolioResult<Vec<FolioResult<Value>>> {
    remove_related(
        client,
        NodeType::Licence,
        licence_id,
        Relation::Member,
        NodeType::User,
        user_ids,
        over,
    )
    .await
}

/// Bulk-remove groups from a licence.
pub async fn remove_licence_groups(
    client: &GraphClient,
    licence_id: &str,
    group_ids: Vec<String>,
    over: WriteOverrides,
) -> FolioResult<Vec<FolioResult<Value>>> {
    remove_related(
        client,
        NodeType::Licence,
        licence_id,
        Relation::Member,
        NodeType::Group,
        group_ids,
        over,
    )
    .await
}

/// Bulk-remove users from a group.
pub async fn remove_group_members(
    client: &GraphClient,
    group_id: &str,
    user_ids: Vec<String>,
    over: WriteOverrides,
) -> FolioResult<Vec<FolioResult<Value>>> {
    remove_related(
        client,
        NodeType::Group,
        group_id,
        Relation::Member,
        NodeType::User,
        user_ids,
        over,
    )
    .await
}

/// A user's `member` relationship to a licence or group, with its properties.
pub async fn member_relationship(
    client: &GraphClient,
    user_id: &str,
    of: NodeType,
    of_id: &str,
) -> FolioResult<Value> {
    let request = build_request(
        Method::Get,
        NodeType::User,
        Some(user_id),
        Some(Relation::Member),
        Some(of),
        Some(of_id),
        None,
        vec![],
    );
    client.send(&request).await
}
