use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::sync_error::{Outcome, SyncError};

/// Serializable summary of an operation's result, for hosts that exchange
/// results with the core as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppResponse {
    ParseError(String),
    PreconditionError(String),
    Conflict {
        id: String,
        current_etag: Option<String>,
    },
    RemoteError(String),
    Cancelled,
    Ok(String),
}

impl Display for AppResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AppResponse::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppResponse::PreconditionError(msg) => write!(f, "Precondition error: {}", msg),
            AppResponse::Conflict { id, .. } => write!(
                f,
                "Conflict: document '{}' was modified remotely, reload it and try again",
                id
            ),
            AppResponse::RemoteError(msg) => write!(f, "Remote error: {}", msg),
            AppResponse::Cancelled => write!(f, "Cancelled"),
            AppResponse::Ok(msg) => write!(f, "Ok: {}", msg),
        }
    }
}

impl From<SyncError> for AppResponse {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::Parse(e) => AppResponse::ParseError(e.to_string()),
            SyncError::Precondition(msg) => AppResponse::PreconditionError(msg),
            SyncError::Conflict {
                id, current_etag, ..
            } => AppResponse::Conflict { id, current_etag },
            SyncError::Remote(e) => AppResponse::RemoteError(e.to_string()),
        }
    }
}

impl AppResponse {
    pub fn success(msg: impl Into<String>) -> Self {
        AppResponse::Ok(msg.into())
    }

    /// Summarises the result of a cancellable operation, using `msg` on success.
    pub fn from_outcome<T>(result: Result<Outcome<T>, SyncError>, msg: impl Into<String>) -> Self {
        match result {
            Ok(Outcome::Completed(_)) => AppResponse::success(msg),
            Ok(Outcome::Cancelled) => AppResponse::Cancelled,
            Err(e) => AppResponse::from(e),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, AppResponse::Ok(_))
    }
}
