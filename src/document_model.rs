//! Data model definitions for Cosmos DB documents and their containers.
//!
//! A [`CosmosDocument`] is the raw JSON object returned by the store. Besides the
//! user-assigned `id`, every stored document carries a handful of system fields
//! managed by the store itself:
//!
//! - **`_rid`**: resource id, stable and globally addressable
//! - **`_self`**: self link, the addressable path of the document
//! - **`_etag`**: entity tag, the optimistic concurrency token
//! - **`_attachments`**: link to the attachments feed
//! - **`_ts`**: last modification timestamp
//!
//! These fields are never edited by the user directly, see [`crate::hidden_fields`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Wire name of the store-assigned resource id.
pub const RESOURCE_ID_FIELD: &str = "_rid";
/// Wire name of the self link.
pub const SELF_LINK_FIELD: &str = "_self";
/// Wire name of the entity tag.
pub const ENTITY_TAG_FIELD: &str = "_etag";
/// Wire name of the attachments link.
pub const ATTACHMENTS_FIELD: &str = "_attachments";
/// Wire name of the last modification timestamp.
pub const TIMESTAMP_FIELD: &str = "_ts";
/// Wire name of the user-assigned logical id.
pub const LOGICAL_ID_FIELD: &str = "id";

/// The system fields managed by the store, in the order they are reinstated.
pub const HIDDEN_FIELDS: [&str; 5] = [
    RESOURCE_ID_FIELD,
    SELF_LINK_FIELD,
    ENTITY_TAG_FIELD,
    ATTACHMENTS_FIELD,
    TIMESTAMP_FIELD,
];

/// A document as stored in a Cosmos DB SQL container.
///
/// The document is kept as an untyped JSON object so that user content of any
/// shape survives a round trip unchanged. Accessors are provided for the system
/// fields the sync engine relies on.
///
/// ```rust
/// use azure_databases_core::document_model::CosmosDocument;
/// use serde_json::json;
///
/// let document = CosmosDocument::from_value(json!({
///     "id": "order-1",
///     "_rid": "AAAAAA==",
///     "_etag": "\"0000-0001\"",
/// }))?;
///
/// assert_eq!(document.logical_id(), Some("order-1"));
/// assert_eq!(document.resource_id(), Some("AAAAAA=="));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CosmosDocument {
    fields: Map<String, JsonValue>,
}

impl CosmosDocument {
    pub fn new(fields: Map<String, JsonValue>) -> Self {
        Self { fields }
    }

    /// Builds a document from a JSON value, failing if the value is not an object.
    pub fn from_value(value: JsonValue) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> &Map<String, JsonValue> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, JsonValue> {
        self.fields
    }

    pub fn logical_id(&self) -> Option<&str> {
        self.non_empty_str(LOGICAL_ID_FIELD)
    }

    pub fn resource_id(&self) -> Option<&str> {
        self.non_empty_str(RESOURCE_ID_FIELD)
    }

    pub fn self_link(&self) -> Option<&str> {
        self.non_empty_str(SELF_LINK_FIELD)
    }

    pub fn entity_tag(&self) -> Option<&str> {
        self.non_empty_str(ENTITY_TAG_FIELD)
    }

    pub fn timestamp(&self) -> Option<i64> {
        self.fields.get(TIMESTAMP_FIELD).and_then(JsonValue::as_i64)
    }

    fn non_empty_str(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(JsonValue::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// Partition key definition of a container, as reported by the store.
///
/// Only the first path is used for addressing documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionKeyDefinition {
    pub paths: Vec<String>,
}

impl PartitionKeyDefinition {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            paths: vec![path.into()],
        }
    }

    pub fn first_path(&self) -> Option<&str> {
        self.paths.first().map(String::as_str)
    }
}

/// Reference to the container (collection) a document lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerRef {
    pub database_id: String,
    pub container_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_key: Option<PartitionKeyDefinition>,
}

impl ContainerRef {
    pub fn new(
        database_id: impl Into<String>,
        container_id: impl Into<String>,
        partition_key: Option<PartitionKeyDefinition>,
    ) -> Self {
        Self {
            database_id: database_id.into(),
            container_id: container_id.into(),
            partition_key,
        }
    }
}
