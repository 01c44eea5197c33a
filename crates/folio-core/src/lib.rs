//! Folio Core Library
//!
//! Environment-sourced configuration, the HTTP status error taxonomy and the
//! bounded retry helper shared by every Folio crate.

pub mod config;
pub mod error;
pub mod retry;

pub use config::{
    BatchConfig, FolioConfig, GraphApiConfig, ProvenanceConfig, RetryConfig, StreamConfig,
    WriteDefaults, API_KEY_HEADER,
};
pub use error::{FolioError, FolioResult, StatusError, StatusKind};
pub use retry::with_retries;
