//! Document sync engine.
//!
//! A [`DocumentNode`] owns the in-memory copy of one document and synchronises it
//! with the remote store. Saving an edited file goes through these stages:
//!
//! 1. **Parsing**: the edited text is parsed and the system fields of the current
//!    document are reinstated ([`hidden_fields::from_editable`]).
//! 2. **Concurrency check**: the merged document must carry an entity tag,
//!    otherwise the save aborts before any remote call.
//! 3. **Writing**: a conditional replace with `If-Match` set to that tag.
//!
//! On success the stored representation replaces the in-memory copy as a whole
//! and a change notification goes out. On any failure the node is left exactly
//! as it was: the document `Arc` is not touched.
//!
//! Nodes hold no locks. The write paths take `&mut self`, so a caller can only
//! run one save per node at a time.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::change_sink::{ChangeSink, DocumentHandle};
use crate::confirmation::{Confirmation, ConfirmationGate};
use crate::document_identity;
use crate::document_model::{ContainerRef, CosmosDocument};
use crate::hidden_fields;
use crate::partition_key::{self, PartitionKeyValue};
use crate::presentation;
use crate::remote_store::{ItemAddress, RemoteStoreClient, RemoteStoreError, ReplaceOptions};
use crate::settings::Settings;
use crate::sync_error::{Outcome, SyncError};

/// Collaborators shared by all document nodes of a host session.
#[derive(Clone)]
pub struct SyncContext {
    pub client: Arc<dyn RemoteStoreClient>,
    pub changes: Arc<dyn ChangeSink>,
    pub confirmation: Arc<dyn ConfirmationGate>,
    pub settings: Settings,
}

impl SyncContext {
    pub fn new(
        client: Arc<dyn RemoteStoreClient>,
        changes: Arc<dyn ChangeSink>,
        confirmation: Arc<dyn ConfirmationGate>,
        settings: Settings,
    ) -> Self {
        Self {
            client,
            changes,
            confirmation,
            settings,
        }
    }
}

/// An editable Cosmos DB document.
pub struct DocumentNode {
    context: SyncContext,
    container: ContainerRef,
    document: Arc<CosmosDocument>,
    partition_key_value: PartitionKeyValue,
    label: String,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl DocumentNode {
    /// Wraps a document loaded from `container` and announces it to the change sink.
    pub fn new(context: SyncContext, container: ContainerRef, document: CosmosDocument) -> Self {
        let now = Utc::now();
        let partition_key_value = partition_key::resolve(
            container.partition_key.as_ref(),
            &document,
            context.settings.legacy_falsy_partition_values,
        );

        let mut node = Self {
            context,
            container,
            document: Arc::new(document),
            partition_key_value,
            label: String::new(),
            created_at: now,
            modified_at: now,
        };
        node.label = node.compute_label();
        node.notify();
        node
    }

    /// Identity of the document within its container, see [`document_identity::identity_of`].
    pub fn id(&self) -> String {
        document_identity::identity_with_partition(&self.document, &self.partition_key_value)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn file_path(&self) -> String {
        document_identity::file_path(&self.label)
    }

    pub fn link(&self) -> Option<&str> {
        self.document.self_link()
    }

    /// The current document. Replaced, never mutated, by successful writes.
    pub fn document(&self) -> Arc<CosmosDocument> {
        Arc::clone(&self.document)
    }

    pub fn container(&self) -> &ContainerRef {
        &self.container
    }

    pub fn partition_key_value(&self) -> &PartitionKeyValue {
        &self.partition_key_value
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    pub fn handle(&self) -> DocumentHandle {
        DocumentHandle {
            id: self.id(),
            file_path: self.file_path(),
            modified_at: self.modified_at,
        }
    }

    /// Recomputes the label from the current document and announces the node.
    pub fn refresh(&mut self) {
        self.label = self.compute_label();
        self.notify();
    }

    /// Text shown to the user when the document is opened as a file.
    pub fn file_content(&self) -> Result<String, SyncError> {
        hidden_fields::editable_text(&self.document)
    }

    /// Saves edited file content back to the store under optimistic concurrency.
    ///
    /// Returns [`SyncError::Conflict`] when the remote document changed since it
    /// was loaded. The node keeps its current document in that case; call
    /// [`DocumentNode::reload`] before retrying.
    pub async fn write_file_content(&mut self, content: &str) -> Result<(), SyncError> {
        let merged = hidden_fields::from_editable(content, &self.document)?;

        let etag = match merged.entity_tag() {
            Some(etag) => etag.to_string(),
            None => {
                return Err(SyncError::Precondition(
                    "The \"_etag\" field is required to update a document".to_string(),
                ))
            }
        };

        let address = self.address();
        let options = ReplaceOptions {
            if_match: etag.clone(),
        };

        let result = self.context.client.replace(&address, merged, &options).await;
        match result {
            Ok(stored) => {
                self.install(stored);
                info!("Saved document '{}' ({})", self.label, address.item_id);
                self.notify();
                Ok(())
            }
            Err(RemoteStoreError::PreconditionFailed { current_etag }) => {
                warn!(
                    "Document '{}' changed remotely, expected entity tag {} but found {:?}",
                    self.label, etag, current_etag
                );
                Err(SyncError::Conflict {
                    id: address.item_id,
                    attempted_etag: etag,
                    current_etag,
                })
            }
            Err(e) => Err(SyncError::Remote(e)),
        }
    }

    /// Fetches the current remote version of the document and installs it.
    pub async fn reload(&mut self) -> Result<(), SyncError> {
        let address = self.address();
        let stored = self
            .context
            .client
            .read(&address)
            .await
            .map_err(SyncError::Remote)?;

        self.install(stored);
        self.label = self.compute_label();
        debug!("Reloaded document '{}' ({})", self.label, address.item_id);
        self.notify();
        Ok(())
    }

    /// Deletes the document after the user confirmed.
    ///
    /// A declined confirmation yields `Ok(Outcome::Cancelled)` and the store is
    /// never contacted.
    pub async fn delete(&self) -> Result<Outcome<()>, SyncError> {
        let message = format!("Are you sure you want to delete document '{}'?", self.label);
        match self.context.confirmation.confirm(&message).await {
            Confirmation::Accepted => {
                let address = self.address();
                self.context
                    .client
                    .delete(&address)
                    .await
                    .map_err(SyncError::Remote)?;
                info!("Deleted document '{}' ({})", self.label, address.item_id);
                Ok(Outcome::Completed(()))
            }
            Confirmation::Cancelled => {
                info!("Deletion of document '{}' cancelled", self.label);
                Ok(Outcome::Cancelled)
            }
        }
    }

    fn address(&self) -> ItemAddress {
        ItemAddress::new(
            self.container.clone(),
            self.id(),
            self.partition_key_value.clone(),
        )
    }

    fn install(&mut self, document: CosmosDocument) {
        self.partition_key_value = partition_key::resolve(
            self.container.partition_key.as_ref(),
            &document,
            self.context.settings.legacy_falsy_partition_values,
        );
        self.document = Arc::new(document);
        self.modified_at = Utc::now();
    }

    fn compute_label(&self) -> String {
        presentation::document_label(&self.document, &self.context.settings, &self.id())
    }

    fn notify(&self) {
        self.context.changes.notify_changed(&self.handle());
    }
}
