//! Node payload types returned by the graph API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::props::RelProps;

/// A followable concept node.
///
/// The `_rel` sub-object describes the relationship through which the concept
/// was fetched (who created the follow, when, on whose behalf), not the
/// concept itself. It must be stripped with [`Concept::without_rel`] before
/// the concept is reused as a write payload for an unrelated edge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Concept {
    pub uuid: String,

    #[serde(rename = "prefLabel", skip_serializing_if = "Option::is_none")]
    pub pref_label: Option<String>,

    #[serde(rename = "_rel", skip_serializing_if = "Option::is_none")]
    pub rel: Option<RelProps>,

    /// Domain-specific properties are opaque pass-through payload.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Concept {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            pref_label: None,
            rel: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.pref_label = Some(label.into());
        self
    }

    pub fn with_rel(mut self, rel: RelProps) -> Self {
        self.rel = Some(rel);
        self
    }

    /// Drop the relationship metadata carried from a followed-concepts fetch.
    pub fn without_rel(mut self) -> Self {
        self.rel = None;
        self
    }
}

/// A user or group node as returned from membership and follower queries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub uuid: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}
