//! Projection of documents to and from their editable text form.
//!
//! System fields ([`HIDDEN_FIELDS`]) are removed before a document is shown to
//! the user and reinstated from the original document after the user saves, so
//! they are never user-controlled even if typed into the raw JSON.

use serde_json::{Map, Value as JsonValue};

use crate::document_model::{CosmosDocument, HIDDEN_FIELDS};
use crate::sync_error::SyncError;

/// Shallow copy of `document` without the system fields.
pub fn to_editable(document: &CosmosDocument) -> Map<String, JsonValue> {
    let mut editable = document.fields().clone();
    for field in HIDDEN_FIELDS {
        editable.remove(field);
    }
    editable
}

/// Editable projection rendered as JSON with two-space indentation.
pub fn editable_text(document: &CosmosDocument) -> Result<String, SyncError> {
    Ok(serde_json::to_string_pretty(&to_editable(document))?)
}

/// Parses edited text and reinstates the system fields of `original`.
///
/// Fails with [`SyncError::Parse`] when the text is not a JSON object. A system
/// field the original lacks is removed from the result.
pub fn from_editable(edited_text: &str, original: &CosmosDocument) -> Result<CosmosDocument, SyncError> {
    let mut fields: Map<String, JsonValue> = serde_json::from_str(edited_text)?;
    for field in HIDDEN_FIELDS {
        match original.get(field) {
            Some(value) => {
                fields.insert(field.to_string(), value.clone());
            }
            None => {
                fields.remove(field);
            }
        }
    }
    Ok(CosmosDocument::new(fields))
}
