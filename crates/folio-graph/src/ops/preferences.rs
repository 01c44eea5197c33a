//! Email digest preference operations.

use serde_json::{json, Value};

use folio_core::FolioResult;

use super::{add_related, remove_related, WriteOverrides};
use crate::client::GraphClient;
use crate::props::RelProps;
use crate::request::{build_request, Method, NodeType, Relation};

/// Well-known id of the email digest preference node.
pub const EMAIL_DIGEST: &str = "email-digest";

/// Fetch a user's email digest preference edge. NotFound means the user has
/// never had one set.
pub async fn email_digest_preference(client: &GraphClient, user_id: &str) -> FolioResult<Value> {
    let request = build_request(
        Method::Get,
        NodeType::User,
        Some(user_id),
        Some(Relation::Preference),
        Some(NodeType::Preference),
        Some(EMAIL_DIGEST),
        None,
        vec![],
    );
    client.send(&request).await
}

/// Create or update a user's email digest preference with `props`.
pub async fn set_email_digest_preference(
    client: &GraphClient,
    user_id: &str,
    props: &RelProps,
    over: WriteOverrides,
) -> FolioResult<()> {
    add_related(
        client,
        NodeType::User,
        user_id,
        Relation::Preference,
        NodeType::Preference,
        vec![json!({ "uuid": EMAIL_DIGEST })],
        Some(props),
        over,
    )
    .await?;
    Ok(())
}

/// Remove a user's email digest preference edge.
pub async fn remove_email_digest_preference(
    client: &GraphClient,
    user_id: &str,
    over: WriteOverrides,
) -> FolioResult<()> {
    remove_related(
        client,
        NodeType::User,
        user_id,
        Relation::Preference,
        NodeType::Preference,
        vec![EMAIL_DIGEST.to_string()],
        over,
    )
    .await?;
    Ok(())
}
