//! Concept follow operations for users and groups.

use serde_json::Value;

use folio_core::FolioResult;

use super::{add_related, remove_related, WriteOverrides};
use crate::client::GraphClient;
use crate::model::{Concept, Member};
use crate::props::RelProps;
use crate::request::{NodeType, Relation};

/// All concepts a user follows, across every page.
pub async fn concepts_followed_by_user(
    client: &GraphClient,
    user_id: &str,
) -> FolioResult<Vec<Concept>> {
    client
        .related_items(NodeType::User, user_id, Relation::Followed, NodeType::Concept)
        .await
}

/// All concepts a group follows, across every page.
pub async fn concepts_followed_by_group(
    client: &GraphClient,
    group_id: &str,
) -> FolioResult<Vec<Concept>> {
    client
        .related_items(
            NodeType::Group,
            group_id,
            Relation::Followed,
            NodeType::Concept,
        )
        .await
}

/// Users following a concept.
pub async fn users_following_concept(
    client: &GraphClient,
    concept_id: &str,
) -> FolioResult<Vec<Member>> {
    client
        .related_items(
            NodeType::Concept,
            concept_id,
            Relation::Followed,
            NodeType::User,
        )
        .await
}

/// Groups following a concept.
pub async fn groups_following_concept(
    client: &GraphClient,
    concept_id: &str,
) -> FolioResult<Vec<Member>> {
    client
        .related_items(
            NodeType::Concept,
            concept_id,
            Relation::Followed,
            NodeType::Group,
        )
        .await
}

/// Bulk-add follow edges from a user to `concepts`, stamping each edge with
/// `rel`.
pub async fn add_concepts_followed_by_user(
    client: &GraphClient,
    user_id: &str,
    concepts: &[Concept],
    rel: &RelProps,
    over: WriteOverrides,
) -> FolioResult<Vec<FolioResult<Value>>> {
    let items = concepts
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    add_related(
        client,
        NodeType::User,
        user_id,
        Relation::Followed,
        NodeType::Concept,
        items,
        Some(rel),
        over,
    )
    .await
}

/// Single-concept convenience: one-element chunk through the bulk path.
pub async fn add_concept_followed_by_user(
    client: &GraphClient,
    user_id: &str,
    concept: Concept,
    rel: &RelProps,
    over: WriteOverrides,
) -> FolioResult<()> {
    add_concepts_followed_by_user(client, user_id, &[concept], rel, over).await?;
    Ok(())
}

/// Bulk-add follow edges from a group to `concepts`.
pub async fn add_concepts_followed_by_group(
    client: &GraphClient,
    group_id: &str,
    concepts: &[Concept],
    rel: &RelProps,
    over: WriteOverrides,
) -> FolioResult<Vec<FolioResult<Value>>> {
    let items = concepts
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    add_related(
        client,
        NodeType::Group,
        group_id,
        Relation::Followed,
        NodeType::Concept,
        items,
        Some(rel),
        over,
    )
    .await
}

/// Bulk-remove a user's follow edges by concept id.
pub async fn remove_concepts_followed_by_user(
    client: &GraphClient,
    user_id: &str,
    concept_ids: Vec<String>,
    over: WriteOverrides,
) -> FolioResult<Vec<FolioResult<Value>>> {
    remove_related(
        client,
        NodeType::User,
        user_id,
        Relation::Followed,
        NodeType::Concept,
        concept_ids,
        over,
    )
    .await
}

/// Single-concept convenience: one-element chunk through the bulk path.
pub async fn remove_concept_followed_by_user(
    client: &GraphClient,
    user_id: &str,
    concept_id: &str,
    over: WriteOverrides,
) -> FolioResult<()> {
    remove_concepts_followed_by_user(client, user_id, vec![concept_id.to_string()], over).await?;
    Ok(())
}

/// Bulk-remove a group's follow edges by concept id.
pub async fn remove_concepts_followed_by_group(
    client: &GraphClient,
    group_id: &str,
    concept_ids: Vec<String>,
    over: WriteOverrides,
) -> FolioResult<Vec<FolioResult<Value>>> {
    remove_related(
        client,
        NodeType::Group,
        group_id,
        Relation::Followed,
        NodeType::Concept,
        concept_ids,
        over,
    )
    .await
}
