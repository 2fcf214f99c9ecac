//! Error taxonomy shared by registries and the resolution engine.

use crate::path::PathError;
use crate::store::StoreError;
use thiserror::Error;

/// Every failure a core operation can report.
///
/// Validation failures are raised before any store is touched. Store
/// failures are never swallowed: each maps onto exactly one variant here, and
/// no operation ever returns a default value in place of an error.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed path or slug; local, never retried.
    #[error(transparent)]
    InvalidPath(#[from] PathError),
    /// Uniqueness violation; terminal.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Missing link in the owner → group → endpoint chain; terminal.
    #[error("not found: {0}")]
    NotFound(String),
    /// An endpoint resolved but its payload document is missing. This should
    /// be impossible under correct registration semantics; it is logged as a
    /// defect and triggers reconciliation.
    #[error("endpoint {endpoint_id} of {owner:?} resolved without a payload document")]
    Consistency { owner: String, endpoint_id: i64 },
    /// The payload write failed after the endpoint row was created; the
    /// endpoint stays in draft state. Retry by re-attempting only the payload
    /// write, not the whole registration.
    #[error("payload write for endpoint {endpoint_id} failed after the endpoint was created")]
    PartialWrite {
        endpoint_id: i64,
        #[source]
        source: Box<Error>,
    },
    /// Transient store failure; the calling layer retries with backoff.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl Error {
    /// Whether re-attempting the operation can succeed without any state
    /// change by the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::PartialWrite { .. } | Error::StoreUnavailable(_)
        )
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => Error::NotFound(what),
            StoreError::Conflict(what) => Error::Conflict(what),
            StoreError::Unavailable(what) => Error::StoreUnavailable(what),
        }
    }
}
