//! Group-to-user follow synchronization.
//!
//! Makes a user's followed concepts a superset of their group's: fetch both
//! follow sets, diff by uuid, apply the missing follows in bulk, ensure the
//! user has a baseline email digest preference, then emit a durable
//! `subscribe` event describing what changed.
//!
//! The pipeline is linear and non-recoverable: a failure after the bulk add
//! leaves the graph partially updated, so callers must treat an error as
//! "state unknown", not "unchanged". The only error ever downgraded is
//! NotFound, which means "no follow history", not a failure.

mod store;

pub use store::GraphStore;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info};

use folio_core::FolioResult;

use crate::model::Concept;
use crate::props::RelProps;

/// Read/write surface the engine needs from the graph.
#[async_trait]
pub trait FollowStore: Send + Sync {
    async fn concepts_followed_by_group(&self, group_id: &str) -> FolioResult<Vec<Concept>>;

    async fn concepts_followed_by_user(&self, user_id: &str) -> FolioResult<Vec<Concept>>;

    async fn add_concepts_followed_by_user(
        &self,
        user_id: &str,
        concepts: &[Concept],
        rel: RelProps,
    ) -> FolioResult<()>;

    async fn email_digest_preference(&self, user_id: &str) -> FolioResult<Value>;

    async fn set_email_digest_preference(&self, user_id: &str) -> FolioResult<()>;

    /// The provenance preset stamped onto follow edges this engine creates.
    fn followed_properties(&self) -> RelProps;
}

/// Durable sink for synchronization outcomes.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, subject_id: &str, event: &str, payload: Value) -> FolioResult<()>;
}

/// Outcome of one synchronization run.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SyncOutcome {
    pub user: SyncUser,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SyncUser {
    pub uuid: String,
    pub group: String,
    pub status: SyncStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<SkipReason>,

    #[serde(
        rename = "newConceptsToFollow",
        skip_serializing_if = "Option::is_none"
    )]
    pub new_concepts_to_follow: Option<Vec<Concept>>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum SyncStatus {
    #[serde(rename = "synchronisationCompleted")]
    Completed,
    #[serde(rename = "synchronisationIgnored")]
    Ignored,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum SkipReason {
    #[serde(rename = "noGroupConceptsToFollow")]
    NoGroupConcepts,
    #[serde(rename = "noNewConceptsToFollow")]
    NoNewConcepts,
}

impl SyncOutcome {
    fn ignored(user_id: &str, group_id: &str, reason: SkipReason) -> Self {
        Self {
            user: SyncUser {
                uuid: user_id.to_string(),
                group: group_id.to_string(),
                status: SyncStatus::Ignored,
                reason: Some(reason),
                new_concepts_to_follow: None,
            },
        }
    }

    fn completed(user_id: &str, group_id: &str, new_concepts: Vec<Concept>) -> Self {
        Self {
            user: SyncUser {
                uuid: user_id.to_string(),
                group: group_id.to_string(),
                status: SyncStatus::Completed,
                reason: None,
                new_concepts_to_follow: Some(new_concepts),
            },
        }
    }
}

/// Concepts the group follows that the user does not yet follow.
///
/// Identity is the `uuid` alone: a concept the user already follows is never
/// "new", even when its relationship metadata differs from the group's.
/// Order is preserved from the group's follow set.
fn diff_new_concepts(group_concepts: &[Concept], user_concepts: &[Concept]) -> Vec<Concept> {
    let followed: HashSet<&str> = user_concepts.iter().map(|c| c.uuid.as_str()).collect();
    group_concepts
        .iter()
        .filter(|c| !followed.contains(c.uuid.as_str()))
        .cloned()
        .collect()
}

fn not_found_as_empty(result: FolioResult<Vec<Concept>>) -> FolioResult<Vec<Concept>> {
    match result {
        Err(err) if err.is_not_found() => Ok(Vec::new()),
        other => other,
    }
}

/// The follow-set synchronization engine.
///
/// Owns nothing beyond its two collaborators; each [`synchronize`] call is an
/// independent run with no state retained between runs.
///
/// [`synchronize`]: SyncEngine::synchronize
pub struct SyncEngine<S, E> {
    store: S,
    events: E,
}

impl<S: FollowStore, E: EventSink> SyncEngine<S, E> {
    pub fn new(store: S, events: E) -> Self {
        Self { store, events }
    }

    /// Synchronize one user's follows with their group's.
    pub async fn synchronize(&self, group_id: &str, user_id: &str) -> FolioResult<SyncOutcome> {
        info!(group_id, user_id, "Starting follow synchronization");

        let group_concepts =
            not_found_as_empty(self.store.concepts_followed_by_group(group_id).await)?;
        if group_concepts.is_empty() {
            debug!(group_id, "Group follows nothing, ignoring");
            return Ok(SyncOutcome::ignored(
                user_id,
                group_id,
                SkipReason::NoGroupConcepts,
            ));
        }

        let user_concepts =
            not_found_as_empty(self.store.concepts_followed_by_user(user_id).await)?;

        let new_concepts = diff_new_concepts(&group_concepts, &user_concepts);
        if new_concepts.is_empty() {
            debug!(group_id, user_id, "User already follows every group concept");
            return Ok(SyncOutcome::ignored(
                user_id,
                group_id,
                SkipReason::NoNewConcepts,
            ));
        }

        let rel = self.store.followed_properties().with_member_of(group_id);
        self.store
            .add_concepts_followed_by_user(user_id, &new_concepts, rel)
            .await?;

        match self.store.email_digest_preference(user_id).await {
            Ok(_) => {}
            Err(err) if err.is_not_found() => {
                debug!(user_id, "No digest preference, creating baseline");
                self.store.set_email_digest_preference(user_id).await?;
            }
            Err(err) => return Err(err),
        }

        let clean: Vec<Concept> = new_concepts
            .iter()
            .cloned()
            .map(Concept::without_rel)
            .collect();
        self.events
            .emit(user_id, "subscribe", serde_json::to_value(&clean)?)
            .await?;

        info!(
            group_id,
            user_id,
            count = new_concepts.len(),
            "Follow synchronization complete"
        );
        Ok(SyncOutcome::completed(user_id, group_id, new_concepts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{FolioError, StatusError};
    use serde_json::json;
    use std::sync::Mutex;

    fn concept(uuid: &str) -> Concept {
        Concept::new(uuid)
    }

    fn followed_concept(uuid: &str) -> Concept {
        Concept::new(uuid).with_rel(RelProps {
            by_tool: Some("folio".to_string()),
            as_member_of: Some("some-other-group".to_string()),
            ..RelProps::default()
        })
    }

    fn not_found(context: &str) -> FolioError {
        StatusError::new(404, "Not Found", context, None).into()
    }

    fn server_error(context: &str) -> FolioError {
        StatusError::new(500, "Internal Server Error", context, None).into()
    }

    /// In-memory store recording every call.
    #[derive(Default)]
    struct FakeStore {
        group_concepts: Option<FolioResult<Vec<Concept>>>,
        user_concepts: Option<FolioResult<Vec<Concept>>>,
        preference: Option<FolioResult<Value>>,
        add_error: Option<FolioError>,
        calls: Mutex<Vec<String>>,
        added: Mutex<Vec<(String, Vec<Concept>, RelProps)>>,
    }

    impl FakeStore {
        fn log(&self, call: &str) {
            self.calls.lock().unwrap().push(call.to_string());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl FollowStore for FakeStore {
        async fn concepts_followed_by_group(&self, _group_id: &str) -> FolioResult<Vec<Concept>> {
            self.log("group_concepts");
            match &self.group_concepts {
                Some(Ok(concepts)) => Ok(concepts.clone()),
                Some(Err(_)) => Err(not_found("GET /group")),
                None => Ok(Vec::new()),
            }
        }

        async fn concepts_followed_by_user(&self, _user_id: &str) -> FolioResult<Vec<Concept>> {
            self.log("user_concepts");
            match &self.user_concepts {
                Some(Ok(concepts)) => Ok(concepts.clone()),
                Some(Err(_)) => Err(not_found("GET /user")),
                None => Ok(Vec::new()),
            }
        }

        async fn add_concepts_followed_by_user(
            &self,
            user_id: &str,
            concepts: &[Concept],
            rel: RelProps,
        ) -> FolioResult<()> {
            self.log("add_concepts");
            if let Some(err) = &self.add_error {
                return Err(server_error(&format!("{err}")));
            }
            self.added
                .lock()
                .unwrap()
                .push((user_id.to_string(), concepts.to_vec(), rel));
            Ok(())
        }

        async fn email_digest_preference(&self, _user_id: &str) -> FolioResult<Value> {
            self.log("get_preference");
            match &self.preference {
                Some(Ok(value)) => Ok(value.clone()),
                Some(Err(err)) if err.is_not_found() => Err(not_found("GET /preference")),
                Some(Err(_)) => Err(server_error("GET /preference")),
                None => Err(not_found("GET /preference")),
            }
        }

        async fn set_email_digest_preference(&self, _user_id: &str) -> FolioResult<()> {
            self.log("set_preference");
            Ok(())
        }

        fn followed_properties(&self) -> RelProps {
            RelProps {
                by_tool: Some("folio".to_string()),
                ..RelProps::default()
            }
        }
    }

    /// Recording event sink.
    #[derive(Default)]
    struct FakeSink {
        emitted: Mutex<Vec<(String, String, Value)>>,
    }

    #[async_trait]
    impl EventSink for FakeSink {
        async fn emit(&self, subject_id: &str, event: &str, payload: Value) -> FolioResult<()> {
            self.emitted.lock().unwrap().push((
                subject_id.to_string(),
                event.to_string(),
                payload,
            ));
            Ok(())
        }
    }

    fn engine(store: FakeStore) -> SyncEngine<FakeStore, FakeSink> {
        SyncEngine::new(store, FakeSink::default())
    }

    #[tokio::test]
    async fn test_scenario_new_concepts_are_applied() {
        // Group follows c1; user follows nothing and has no preference.
        let store = FakeStore {
            group_concepts: Some(Ok(vec![concept("c1")])),
            user_concepts: Some(Ok(vec![])),
            ..FakeStore::default()
        };
        let engine = engine(store);

        let outcome = engine.synchronize("g1", "u1").await.unwrap();

        assert_eq!(outcome.user.status, SyncStatus::Completed);
        assert_eq!(outcome.user.uuid, "u1");
        assert_eq!(outcome.user.group, "g1");
        let new = outcome.user.new_concepts_to_follow.unwrap();
        assert_eq!(new.len(), 1);
        assert_eq!(new[0].uuid, "c1");

        let added = engine.store.added.lock().unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].2.as_member_of.as_deref(), Some("g1"));
        assert_eq!(
            engine.store.calls(),
            vec![
                "group_concepts",
                "user_concepts",
                "add_concepts",
                "get_preference",
                "set_preference"
            ]
        );
    }

    #[tokio::test]
    async fn test_scenario_already_followed_is_ignored() {
        let store = FakeStore {
            group_concepts: Some(Ok(vec![concept("c1")])),
            user_concepts: Some(Ok(vec![followed_concept("c1")])),
            ..FakeStore::default()
        };
        let engine = engine(store);

        let outcome = engine.synchronize("g1", "u1").await.unwrap();

        assert_eq!(outcome.user.status, SyncStatus::Ignored);
        assert_eq!(outcome.user.reason, Some(SkipReason::NoNewConcepts));
        assert!(outcome.user.new_concepts_to_follow.is_none());
        // No writes, no events.
        assert_eq!(engine.store.calls(), vec!["group_concepts", "user_concepts"]);
        assert!(engine.events.emitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scenario_empty_group_short_circuits() {
        let store = FakeStore {
            group_concepts: Some(Ok(vec![])),
            ..FakeStore::default()
        };
        let engine = engine(store);

        let outcome = engine.synchronize("g1", "u1").await.unwrap();

        assert_eq!(outcome.user.status, SyncStatus::Ignored);
        assert_eq!(outcome.user.reason, Some(SkipReason::NoGroupConcepts));
        // The user's follows are never even read.
        assert_eq!(engine.store.calls(), vec!["group_concepts"]);
    }

    #[tokio::test]
    async fn test_short_circuit_is_idempotent() {
        for _ in 0..2 {
            let store = FakeStore {
                group_concepts: Some(Ok(vec![])),
                ..FakeStore::default()
            };
            let engine = engine(store);
            let outcome = engine.synchronize("g1", "u1").await.unwrap();
            assert_eq!(outcome.user.reason, Some(SkipReason::NoGroupConcepts));
            assert!(engine.events.emitted.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_not_found_downgrades_to_empty() {
        let store = FakeStore {
            group_concepts: Some(Err(not_found("GET /group"))),
            ..FakeStore::default()
        };
        let engine = engine(store);

        let outcome = engine.synchronize("g1", "u1").await.unwrap();
        assert_eq!(outcome.user.reason, Some(SkipReason::NoGroupConcepts));
    }

    #[tokio::test]
    async fn test_diff_preserves_group_order() {
        let store = FakeStore {
            group_concepts: Some(Ok(vec![
                concept("c3"),
                concept("c1"),
                concept("c2"),
                concept("c4"),
            ])),
            user_concepts: Some(Ok(vec![concept("c1"), concept("c4")])),
            ..FakeStore::default()
        };
        let engine = engine(store);

        let outcome = engine.synchronize("g1", "u1").await.unwrap();
        let new: Vec<String> = outcome
            .user
            .new_concepts_to_follow
            .unwrap()
            .into_iter()
            .map(|c| c.uuid)
            .collect();
        assert_eq!(new, vec!["c3", "c2"]);
    }

    #[tokio::test]
    async fn test_emitted_payload_is_sanitized() {
        // The group's concepts carry `_rel` metadata from the fetch.
        let store = FakeStore {
            group_concepts: Some(Ok(vec![followed_concept("c1"), followed_concept("c2")])),
            user_concepts: Some(Ok(vec![])),
            ..FakeStore::default()
        };
        let engine = engine(store);

        engine.synchronize("g1", "u1").await.unwrap();

        let emitted = engine.events.emitted.lock().unwrap();
        assert_eq!(emitted.len(), 1);
        let (subject, event, payload) = &emitted[0];
        assert_eq!(subject, "u1");
        assert_eq!(event, "subscribe");
        for entry in payload.as_array().unwrap() {
            assert!(entry.get("_rel").is_none());
        }
    }

    #[tokio::test]
    async fn test_existing_preference_is_left_alone() {
        let store = FakeStore {
            group_concepts: Some(Ok(vec![concept("c1")])),
            user_concepts: Some(Ok(vec![])),
            preference: Some(Ok(json!({"uuid": "email-digest"}))),
            ..FakeStore::default()
        };
        let engine = engine(store);

        engine.synchronize("g1", "u1").await.unwrap();
        assert!(!engine.store.calls().contains(&"set_preference".to_string()));
    }

    #[tokio::test]
    async fn test_preference_server_error_is_fatal() {
        let store = FakeStore {
            group_concepts: Some(Ok(vec![concept("c1")])),
            user_concepts: Some(Ok(vec![])),
            preference: Some(Err(server_error("GET /preference"))),
            ..FakeStore::default()
        };
        let engine = engine(store);

        let err = engine.synchronize("g1", "u1").await.unwrap_err();
        assert!(!err.is_not_found());
        // The event is never emitted after a fatal preference failure.
        assert!(engine.events.emitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_failure_propagates() {
        let store = FakeStore {
            group_concepts: Some(Ok(vec![concept("c1")])),
            user_concepts: Some(Ok(vec![])),
            add_error: Some(server_error("POST /followed")),
            ..FakeStore::default()
        };
        let engine = engine(store);

        assert!(engine.synchronize("g1", "u1").await.is_err());
        assert!(engine.events.emitted.lock().unwrap().is_empty());
    }

    #[test]
    fn test_outcome_wire_shape() {
        let outcome = SyncOutcome::completed("u1", "g1", vec![concept("c1")]);
        let wire = serde_json::to_value(&outcome).unwrap();
        assert_eq!(wire["user"]["status"], "synchronisationCompleted");
        assert_eq!(wire["user"]["newConceptsToFollow"][0]["uuid"], "c1");
        assert!(wire["user"].get("reason").is_none());

        let outcome = SyncOutcome::ignored("u1", "g1", SkipReason::NoGroupConcepts);
        let wire = serde_json::to_value(&outcome).unwrap();
        assert_eq!(wire["user"]["status"], "synchronisationIgnored");
        assert_eq!(wire["user"]["reason"], "noGroupConceptsToFollow");
    }
}
