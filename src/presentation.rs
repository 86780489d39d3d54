//! Presentation of records as tree nodes.
//!
//! Records stay plain data. A [`Presenter`] turns one into the few things a host
//! tree needs to draw it, and hosts can swap in their own presenter.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::document_model::{CosmosDocument, LOGICAL_ID_FIELD};
use crate::document_node::DocumentNode;
use crate::postgres_provisioning::PostgresServer;
use crate::settings::Settings;

pub const DOCUMENT_CONTEXT_VALUE: &str = "cosmosDBDocument";
pub const OPEN_DOCUMENT_COMMAND: &str = "cosmosDB.openDocument";
pub const DOCUMENT_ICON: &str = "Document.svg";
pub const POSTGRES_SERVER_CONTEXT_VALUE: &str = "postgresServer";
pub const POSTGRES_SERVER_ICON: &str = "PostgresServer.svg";

/// What a host tree needs to render one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescriptor {
    pub label: String,
    /// Theme-agnostic icon file name.
    pub icon: String,
    pub context_value: String,
    /// Command run when the node is opened, if any.
    pub open_command: Option<String>,
}

pub trait Presenter<R>: Send + Sync {
    fn describe(&self, record: &R) -> NodeDescriptor;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPresenter;

impl Presenter<DocumentNode> for DefaultPresenter {
    fn describe(&self, node: &DocumentNode) -> NodeDescriptor {
        NodeDescriptor {
            label: node.label().to_string(),
            icon: DOCUMENT_ICON.to_string(),
            context_value: DOCUMENT_CONTEXT_VALUE.to_string(),
            open_command: Some(OPEN_DOCUMENT_COMMAND.to_string()),
        }
    }
}

impl Presenter<PostgresServer> for DefaultPresenter {
    fn describe(&self, server: &PostgresServer) -> NodeDescriptor {
        NodeDescriptor {
            label: server.name.clone(),
            icon: POSTGRES_SERVER_ICON.to_string(),
            context_value: POSTGRES_SERVER_CONTEXT_VALUE.to_string(),
            open_command: None,
        }
    }
}

/// Human readable label of a document. Not necessarily unique.
///
/// Tries the configured label fields first, then `id`, then `_id`, and finally
/// falls back to `identity`.
pub fn document_label(document: &CosmosDocument, settings: &Settings, identity: &str) -> String {
    settings
        .document_label_fields
        .iter()
        .map(String::as_str)
        .chain([LOGICAL_ID_FIELD, "_id"])
        .find_map(|field| document.get(field).and_then(scalar_text))
        .unwrap_or_else(|| identity.to_string())
}

fn scalar_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(text) => Some(text.clone()),
        JsonValue::Number(number) => Some(number.to_string()),
        JsonValue::Bool(flag) => Some(flag.to_string()),
        JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
    }
}
