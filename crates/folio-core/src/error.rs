//! Centralized error types for Folio.
//!
//! Transport failures are classified into a single [`StatusError`] carrying a
//! [`StatusKind`] tag, so callers pattern-match on the kind instead of
//! downcasting. The only place an error is ever downgraded is the documented
//! NotFound-means-empty rule inside the synchronization engine.

use thiserror::Error;

/// Classification of a non-2xx HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    BadRequest,
    NotAuthorised,
    NotFound,
    Redirection,
    ClientError,
    InternalServerError,
    BadGateway,
    ServiceUnavailable,
    ServerError,
}

impl StatusKind {
    /// Map an HTTP status code to its kind. Returns `None` for 2xx.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            300..=399 => Some(Self::Redirection),
            400 => Some(Self::BadRequest),
            401 => Some(Self::NotAuthorised),
            404 => Some(Self::NotFound),
            402..=499 => Some(Self::ClientError),
            500 => Some(Self::InternalServerError),
            502 => Some(Self::BadGateway),
            503 => Some(Self::ServiceUnavailable),
            _ => Some(Self::ServerError),
        }
    }

    /// Server-side failures are worth retrying; client errors are not.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            Self::InternalServerError
                | Self::BadGateway
                | Self::ServiceUnavailable
                | Self::ServerError
        )
    }
}

/// A classified HTTP failure: status, human-readable message and the URL
/// that produced it, where available.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct StatusError {
    pub kind: StatusKind,
    pub status: u16,
    pub message: String,
    pub url: Option<String>,
}

impl StatusError {
    /// Build a classified error for a non-2xx response.
    ///
    /// `context` names the originating operation so the message survives
    /// propagation through layers that no longer know the call site.
    pub fn new(status: u16, reason: &str, context: &str, url: Option<String>) -> Self {
        let kind = StatusKind::from_status(status).unwrap_or(StatusKind::ServerError);
        Self {
            kind,
            status,
            message: format!("{} {} during {}", status, reason, context),
            url,
        }
    }
}

/// Main error type for Folio operations.
#[derive(Error, Debug)]
pub enum FolioError {
    #[error(transparent)]
    Status(#[from] StatusError),

    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected response shape: {0}")]
    Shape(String),

    #[error("All {} batch writes failed", .causes.len())]
    AllBatchesFailed { causes: Vec<FolioError> },

    #[error("Event stream write failed after {attempts} attempts: {source}")]
    StreamExhausted {
        attempts: u32,
        #[source]
        source: Box<FolioError>,
    },
}

/// Result type for Folio operations.
pub type FolioResult<T> = Result<T, FolioError>;

impl FolioError {
    /// Create a shape-violation error.
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::Shape(msg.into())
    }

    /// The status classification, when this error carries one.
    pub fn status_kind(&self) -> Option<StatusKind> {
        match self {
            Self::Status(e) => Some(e.kind),
            _ => None,
        }
    }

    /// True when the error is the graph service saying "no such node or
    /// relationship" rather than an operational failure.
    pub fn is_not_found(&self) -> bool {
        self.status_kind() == Some(StatusKind::NotFound)
    }

    /// True when a retry has a chance of succeeding: transport failures and
    /// server-side statuses.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Status(e) => e.kind.is_retryable(),
            Self::Transport(_) => true,
            _ => false,
        }
    }
}
