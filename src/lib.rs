//! # Azure Databases Core
//!
//! Host-independent core of an editor extension that exposes Cosmos DB documents
//! and PostgreSQL servers as tree nodes, lets the user edit documents as local
//! JSON files and saves them back to the store.
//!
//! ## Features
//!
//! - **Stable document identity**: `_rid`, or `id` plus partition key value
//! - **Partition key addressing**: values resolved from the container's key path
//! - **Hidden field reconciliation**: system fields are never user-controlled
//! - **Optimistic concurrency**: every save is an `If-Match` conditional replace
//! - **Injected collaborators**: store client, change sink and confirmation gate
//!   are traits supplied by the host
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use azure_databases_core::change_sink::BroadcastChangeSink;
//! use azure_databases_core::confirmation::{Confirmation, FixedConfirmation};
//! use azure_databases_core::document_model::{ContainerRef, CosmosDocument, PartitionKeyDefinition};
//! use azure_databases_core::document_node::{DocumentNode, SyncContext};
//! use azure_databases_core::memory_store::MemoryStore;
//! use azure_databases_core::settings::Settings;
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryStore::new());
//! let container = ContainerRef::new("shop", "orders", Some(PartitionKeyDefinition::new("/customer")));
//! let stored = store.push(&container, CosmosDocument::from_value(json!({"id": "1", "customer": "c1"}))?)?;
//!
//! let context = SyncContext::new(
//!     store,
//!     Arc::new(BroadcastChangeSink::new(16)),
//!     Arc::new(FixedConfirmation(Confirmation::Accepted)),
//!     Settings::default(),
//! );
//! let mut node = DocumentNode::new(context, container, stored);
//!
//! let edited = node.file_content()?.replace("\"id\": \"1\"", "\"id\": \"1\", \"status\": \"shipped\"");
//! node.write_file_content(&edited).await?;
//! # Ok(())
//! # }
//! ```

pub mod app_response;
pub mod change_sink;
pub mod confirmation;
pub mod document_identity;
pub mod document_model;
pub mod document_node;
pub mod hidden_fields;
pub mod memory_store;
pub mod partition_key;
pub mod postgres_provisioning;
pub mod presentation;
pub mod remote_store;
pub mod settings;
pub mod sync_error;

pub use crate::app_response::AppResponse;
pub use crate::document_model::{ContainerRef, CosmosDocument, PartitionKeyDefinition};
pub use crate::document_node::{DocumentNode, SyncContext};
pub use crate::partition_key::PartitionKeyValue;
pub use crate::sync_error::{Outcome, SyncError};
