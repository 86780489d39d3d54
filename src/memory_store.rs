//! In-memory document store.
//!
//! [`MemoryStore`] behaves like a Cosmos DB container as far as the sync engine
//! can tell: it assigns the system fields on insert, hands out a fresh entity tag
//! on every write and rejects replaces whose `If-Match` condition is stale. Hosts
//! use it when running without a live account; the test suite uses it everywhere.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use serde_json::Value as JsonValue;

use crate::document_model::{
    ContainerRef, CosmosDocument, ATTACHMENTS_FIELD, ENTITY_TAG_FIELD, RESOURCE_ID_FIELD,
    SELF_LINK_FIELD, TIMESTAMP_FIELD,
};
use crate::document_identity;
use crate::partition_key;
use crate::remote_store::{ItemAddress, RemoteStoreClient, RemoteStoreError, ReplaceOptions};

#[derive(Default)]
struct StoreState {
    sequence: u64,
    // container key -> resource id -> document
    containers: HashMap<String, HashMap<String, CosmosDocument>>,
}

impl StoreState {
    fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    fn find_key(&self, address: &ItemAddress) -> Option<String> {
        self.containers
            .get(&container_key(&address.container))?
            .iter()
            .find(|(resource_id, document)| is_addressed_by(resource_id, document, address))
            .map(|(resource_id, _)| resource_id.clone())
    }
}

/// Thread-safe in-memory store implementing [`RemoteStoreClient`].
///
/// Items are addressed by their `_rid`, their logical `id`, or the
/// `id:partition` identity of `_rid`-less documents. In every case the
/// partition key value must match the item's, as in a real container.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new document into `container`, assigning its system fields.
    ///
    /// Fails if the document has no `id` or if another document with the same
    /// `id` already exists in the same partition.
    pub fn push(&self, container: &ContainerRef, document: CosmosDocument) -> Result<CosmosDocument, RemoteStoreError> {
        let logical_id = document
            .logical_id()
            .ok_or_else(|| RemoteStoreError::Transport("Document is missing an 'id'".to_string()))?
            .to_string();

        let mut state = self.lock()?;
        let partition = partition_key::resolve(container.partition_key.as_ref(), &document, false)
            .as_request_value();
        let duplicate = state
            .containers
            .get(&container_key(container))
            .is_some_and(|items| {
                items.values().any(|existing| {
                    existing.logical_id() == Some(logical_id.as_str())
                        && partition_key::resolve(container.partition_key.as_ref(), existing, false)
                            .as_request_value()
                            == partition
                })
            });
        if duplicate {
            return Err(RemoteStoreError::Transport(format!(
                "Entity with the specified id '{logical_id}' already exists"
            )));
        }

        let sequence = state.next_sequence();
        let resource_id = format!("rid{sequence:08}");
        let mut fields = document.into_fields();
        fields.insert(RESOURCE_ID_FIELD.to_string(), JsonValue::from(resource_id.clone()));
        fields.insert(
            SELF_LINK_FIELD.to_string(),
            JsonValue::from(format!(
                "dbs/{}/colls/{}/docs/{}/",
                container.database_id, container.container_id, resource_id
            )),
        );
        fields.insert(ATTACHMENTS_FIELD.to_string(), JsonValue::from("attachments/"));
        stamp(&mut fields, sequence);

        let stored = CosmosDocument::new(fields);
        state
            .containers
            .entry(container_key(container))
            .or_default()
            .insert(resource_id.clone(), stored.clone());

        debug!("Inserted document '{logical_id}' as {resource_id}");
        Ok(stored)
    }

    /// All documents of `container`, in no particular order.
    pub fn get_all(&self, container: &ContainerRef) -> Result<Vec<CosmosDocument>, RemoteStoreError> {
        let state = self.lock()?;
        Ok(state
            .containers
            .get(&container_key(container))
            .map(|items| items.values().cloned().collect())
            .unwrap_or_default())
    }

    pub fn clear_all_records(&self) -> Result<(), RemoteStoreError> {
        let mut state = self.lock()?;
        state.containers.clear();
        info!("Cleared all documents from memory store");
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, RemoteStoreError> {
        self.state
            .lock()
            .map_err(|e| RemoteStoreError::Transport(format!("Memory store lock poisoned: {e}")))
    }
}

#[async_trait]
impl RemoteStoreClient for MemoryStore {
    async fn read(&self, address: &ItemAddress) -> Result<CosmosDocument, RemoteStoreError> {
        let state = self.lock()?;
        state
            .find_key(address)
            .and_then(|key| {
                state
                    .containers
                    .get(&container_key(&address.container))
                    .and_then(|items| items.get(&key))
                    .cloned()
            })
            .ok_or_else(|| RemoteStoreError::NotFound(address.item_id.clone()))
    }

    async fn replace(
        &self,
        address: &ItemAddress,
        document: CosmosDocument,
        options: &ReplaceOptions,
    ) -> Result<CosmosDocument, RemoteStoreError> {
        let mut state = self.lock()?;
        let key = state
            .find_key(address)
            .ok_or_else(|| RemoteStoreError::NotFound(address.item_id.clone()))?;
        let sequence = state.next_sequence();

        let items = state
            .containers
            .get_mut(&container_key(&address.container))
            .ok_or_else(|| RemoteStoreError::NotFound(address.item_id.clone()))?;
        let current = items
            .get(&key)
            .ok_or_else(|| RemoteStoreError::NotFound(address.item_id.clone()))?;

        if current.entity_tag() != Some(options.if_match.as_str()) {
            return Err(RemoteStoreError::PreconditionFailed {
                current_etag: current.entity_tag().map(str::to_string),
            });
        }

        let mut fields = document.into_fields();
        for field in [RESOURCE_ID_FIELD, SELF_LINK_FIELD, ATTACHMENTS_FIELD] {
            match current.get(field) {
                Some(value) => fields.insert(field.to_string(), value.clone()),
                None => fields.remove(field),
            };
        }
        stamp(&mut fields, sequence);

        let stored = CosmosDocument::new(fields);
        items.insert(key, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, address: &ItemAddress) -> Result<(), RemoteStoreError> {
        let mut state = self.lock()?;
        let key = state
            .find_key(address)
            .ok_or_else(|| RemoteStoreError::NotFound(address.item_id.clone()))?;
        if let Some(items) = state.containers.get_mut(&container_key(&address.container)) {
            items.remove(&key);
        }
        Ok(())
    }
}

fn container_key(container: &ContainerRef) -> String {
    format!("{}/{}", container.database_id, container.container_id)
}

/// Whether `address` names the stored item `resource_id`.
///
/// The item's partition key value is accepted in both its strict and its legacy
/// falsy resolution, so nodes running either mode reach the same item.
fn is_addressed_by(resource_id: &str, document: &CosmosDocument, address: &ItemAddress) -> bool {
    let wanted = address.partition_key_header();
    [false, true].into_iter().any(|legacy_falsy| {
        let value = partition_key::resolve(
            address.container.partition_key.as_ref(),
            document,
            legacy_falsy,
        );
        value.as_request_value() == wanted
            && (resource_id == address.item_id
                || document.logical_id() == Some(address.item_id.as_str())
                || document_identity::fallback_identity(document, &value) == address.item_id)
    })
}

fn stamp(fields: &mut serde_json::Map<String, JsonValue>, sequence: u64) {
    fields.insert(
        ENTITY_TAG_FIELD.to_string(),
        JsonValue::from(format!("\"{sequence:08x}-0000-0000-0000-000000000000\"")),
    );
    fields.insert(TIMESTAMP_FIELD.to_string(), JsonValue::from(Utc::now().timestamp()));
}
