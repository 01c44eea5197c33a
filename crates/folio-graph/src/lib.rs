//! # Folio Graph
//!
//! Typed access to the user-relationship graph API.
//!
//! Provides the relationship request builder, paginated traversal, chunked
//! concurrent writes, the domain operations built on them, and the
//! group-to-user follow synchronization engine.

pub mod batch;
pub mod client;
pub mod model;
pub mod ops;
pub mod paginate;
pub mod props;
pub mod request;
pub mod sync;

pub use batch::apply_chunked;
pub use client::GraphClient;
pub use model::{Concept, Member};
pub use paginate::{fetch_all, PageResponse, PAGE_LIMIT};
pub use props::{digest_properties, followed_properties, RelProps};
pub use request::{build_request, GraphRequest, Method, NodeType, Relation};
pub use sync::{
    EventSink, FollowStore, GraphStore, SkipReason, SyncEngine, SyncOutcome, SyncStatus, SyncUser,
};
