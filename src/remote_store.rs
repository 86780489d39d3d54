//! Remote store client binding.
//!
//! The sync engine talks to the document store only through
//! [`RemoteStoreClient`]. Hosts implement it on top of their SDK client; any
//! timeout or retry policy lives in that implementation.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::document_model::{ContainerRef, CosmosDocument};
use crate::partition_key::PartitionKeyValue;

/// Full address of a single item in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemAddress {
    pub container: ContainerRef,
    pub item_id: String,
    pub partition_key: PartitionKeyValue,
}

impl ItemAddress {
    pub fn new(container: ContainerRef, item_id: impl Into<String>, partition_key: PartitionKeyValue) -> Self {
        Self {
            container,
            item_id: item_id.into(),
            partition_key,
        }
    }

    /// Partition key value to send with the request, if any.
    pub fn partition_key_header(&self) -> Option<JsonValue> {
        self.partition_key.as_request_value()
    }
}

/// Options of a conditional replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceOptions {
    /// Entity tag the remote document must still carry for the replace to apply.
    pub if_match: String,
}

/// Errors reported by a [`RemoteStoreClient`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteStoreError {
    /// The remote entity tag no longer matches the `If-Match` condition.
    #[error("Precondition failed, remote entity tag is {current_etag:?}")]
    PreconditionFailed { current_etag: Option<String> },

    #[error("Item '{0}' not found")]
    NotFound(String),

    /// Catch all error which implementers can use for passing their own errors up the chain.
    #[error("Remote store error: {0}")]
    Transport(String),
}

/// Capability-typed client offering reads and writes of single items.
#[async_trait]
pub trait RemoteStoreClient: Send + Sync {
    async fn read(&self, address: &ItemAddress) -> Result<CosmosDocument, RemoteStoreError>;

    /// Replaces the item, provided its entity tag still equals `options.if_match`.
    /// Returns the stored representation carrying a fresh entity tag.
    async fn replace(
        &self,
        address: &ItemAddress,
        document: CosmosDocument,
        options: &ReplaceOptions,
    ) -> Result<CosmosDocument, RemoteStoreError>;

    async fn delete(&self, address: &ItemAddress) -> Result<(), RemoteStoreError>;
}
