//! Relationship property presets.
//!
//! Two process-wide presets are derived from configuration at startup:
//! `followed_properties` (provenance only) and `digest_properties` (daily
//! digest defaults plus provenance). Presets are values; extending one for a
//! specific call goes through copy-and-extend ([`RelProps::with_member_of`]),
//! never in-place mutation of a shared default.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use folio_core::config::ProvenanceConfig;

/// Property bag carried on a relationship edge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RelProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_tool: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_user: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,

    /// The group whose follow set caused this edge, for later audit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_member_of: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest_frequency: Option<String>,
}

impl RelProps {
    /// Fresh copy extended with the originating group.
    pub fn with_member_of(&self, group_id: &str) -> RelProps {
        RelProps {
            as_member_of: Some(group_id.to_string()),
            ..self.clone()
        }
    }
}

/// Provenance-only preset for follow relationships.
pub fn followed_properties(prov: &ProvenanceConfig) -> RelProps {
    RelProps {
        by_tool: Some(prov.by_tool.clone()),
        by_user: prov.by_user.clone(),
        created_at: Some(Utc::now()),
        count: Some(1),
        ..RelProps::default()
    }
}

/// Daily digest defaults plus provenance, for baseline email preferences.
pub fn digest_properties(prov: &ProvenanceConfig) -> RelProps {
    RelProps {
        digest_frequency: Some("daily".to_string()),
        ..followed_properties(prov)
    }
}
