//! Domain error type shared across the workspace.

/// Domain-level errors produced by core logic and the repository layer.
///
/// The API crate maps each variant onto an HTTP status and error code;
/// see `drawtrack-api`'s `AppError`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A named entity was not found. The key is an id for drawings and
    /// revisions, a normalized drawing number for searches.
    #[error("{entity} '{key}' not found")]
    NotFound { entity: &'static str, key: String },

    /// Caller-supplied data failed validation. Never retried.
    #[error("{0}")]
    Validation(String),

    /// No resolved editor identity on a request that requires one.
    #[error("{0}")]
    Unauthorized(String),

    /// A blob write or read failed before any metadata was committed.
    /// Safe to retry: object names are unique per attempt.
    #[error("blob storage failure: {0}")]
    Storage(String),

    /// A metadata write failed after the blob was already stored. Not
    /// safely retryable without risking duplicate blobs; the orphaned
    /// object is logged for manual reconciliation.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// One of the drawing source fetches failed during aggregation. The
    /// whole list operation fails rather than returning partial data.
    #[error("upstream fetch failure: {0}")]
    UpstreamFetch(String),

    /// An internal invariant was violated.
    #[error("{0}")]
    Internal(String),
}
