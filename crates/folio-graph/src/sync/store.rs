//! Production wiring of the engine's seams.

use async_trait::async_trait;
use serde_json::Value;

use folio_core::FolioResult;

use super::{EventSink, FollowStore};
use crate::client::GraphClient;
use crate::model::Concept;
use crate::ops::{follows, preferences, WriteOverrides};
use crate::props::RelProps;

/// [`FollowStore`] backed by the graph domain operations.
pub struct GraphStore<'a> {
    client: &'a GraphClient,
}

impl<'a> GraphStore<'a> {
    pub fn new(client: &'a GraphClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FollowStore for GraphStore<'_> {
    async fn concepts_followed_by_group(&self, group_id: &str) -> FolioResult<Vec<Concept>> {
        follows::concepts_followed_by_group(self.client, group_id).await
    }

    async fn concepts_followed_by_user(&self, user_id: &str) -> FolioResult<Vec<Concept>> {
        follows::concepts_followed_by_user(self.client, user_id).await
    }

    async fn add_concepts_followed_by_user(
        &self,
        user_id: &str,
        concepts: &[Concept],
        rel: RelProps,
    ) -> FolioResult<()> {
        follows::add_concepts_followed_by_user(
            self.client,
            user_id,
            concepts,
            &rel,
            WriteOverrides::default(),
        )
        .await?;
        Ok(())
    }

    async fn email_digest_preference(&self, user_id: &str) -> FolioResult<Value> {
        preferences::email_digest_preference(self.client, user_id).await
    }

    async fn set_email_digest_preference(&self, user_id: &str) -> FolioResult<()> {
        preferences::set_email_digest_preference(
            self.client,
            user_id,
            self.client.digest_properties(),
            WriteOverrides::default(),
        )
        .await
    }

    fn followed_properties(&self) -> RelProps {
        self.client.followed_properties().clone()
    }
}

#[async_trait]
impl EventSink for folio_stream::EventEmitter {
    async fn emit(&self, subject_id: &str, event: &str, payload: Value) -> FolioResult<()> {
        self.write(subject_id, event, payload).await?;
        Ok(())
    }
}
