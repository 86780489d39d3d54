//! Error and outcome types of the sync engine.

use crate::remote_store::RemoteStoreError;

/// Represents all the ways a save, reload or delete of a document can fail.
#[derive(thiserror::Error, Debug)]
pub enum SyncError {
    /// The edited text is not a JSON object. The user can fix it and save again.
    #[error("Invalid document JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Local state lacks something the operation requires, e.g. the entity tag.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// The remote document changed since it was loaded. Reload and retry.
    #[error("Document '{id}' was modified remotely (expected entity tag {attempted_etag})")]
    Conflict {
        id: String,
        attempted_etag: String,
        current_etag: Option<String>,
    },

    /// Transport or service failure reported by the store.
    #[error(transparent)]
    Remote(RemoteStoreError),
}

impl SyncError {
    /// Whether the user can recover by editing or reloading, as opposed to a
    /// failure of the store itself or of local state.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SyncError::Parse(_) | SyncError::Conflict { .. })
    }
}

/// Result of an operation the user may decline.
///
/// Declining is an ordinary branch, not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Completed(T),
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }
}
