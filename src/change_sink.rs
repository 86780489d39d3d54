//! Change notifications for documents exposed as files.
//!
//! The host's virtual file system subscribes to these to keep open editors in
//! sync with the document each node currently holds.

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Lightweight reference to a document node, sent with every notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentHandle {
    pub id: String,
    pub file_path: String,
    pub modified_at: DateTime<Utc>,
}

/// Receiver of document change notifications.
pub trait ChangeSink: Send + Sync {
    fn notify_changed(&self, handle: &DocumentHandle);
}

/// Publishes notifications on a broadcast channel, one copy per subscriber.
#[derive(Debug, Clone)]
pub struct BroadcastChangeSink {
    tx: broadcast::Sender<DocumentHandle>,
}

impl BroadcastChangeSink {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DocumentHandle> {
        self.tx.subscribe()
    }
}

impl ChangeSink for BroadcastChangeSink {
    fn notify_changed(&self, handle: &DocumentHandle) {
        // Fails only when there are no subscribers
        if self.tx.send(handle.clone()).is_err() {
            debug!("No subscribers for change of document {}", handle.id);
        }
    }
}
