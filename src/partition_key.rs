//! Partition key resolution.
//!
//! Requests against a partitioned container must name the partition key value of
//! the addressed document. The value is found by walking the container's key path
//! (for example `/address/zip`) into the document.

use std::fmt::{Display, Formatter};

use serde_json::Value as JsonValue;

use crate::document_model::{CosmosDocument, PartitionKeyDefinition};

/// Effective partition key value of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum PartitionKeyValue {
    /// The container is not partitioned. No partition key is sent with requests.
    Undefined,
    /// The container is partitioned but the document holds no value at the key
    /// path. This is a valid, addressable state.
    Empty,
    /// The value found at the key path, exactly as stored.
    Value(JsonValue),
}

impl PartitionKeyValue {
    /// Value to send with a store request, `None` when no partition key applies.
    pub fn as_request_value(&self) -> Option<JsonValue> {
        match self {
            PartitionKeyValue::Undefined => None,
            PartitionKeyValue::Empty => Some(JsonValue::String(String::new())),
            PartitionKeyValue::Value(value) => Some(value.clone()),
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, PartitionKeyValue::Undefined)
    }
}

/// Renders the value for use inside a document identity.
///
/// `Undefined` renders as the bare word `undefined`, which is not valid JSON.
/// Everything else renders as compact JSON, so the string `"5"` and the number
/// `5` stay distinct, and objects always render with sorted keys.
impl Display for PartitionKeyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PartitionKeyValue::Undefined => write!(f, "undefined"),
            PartitionKeyValue::Empty => write!(f, "\"\""),
            PartitionKeyValue::Value(value) => write!(f, "{}", value),
        }
    }
}

/// Resolves the partition key value of `document` for a container with the given
/// partition key `definition`.
///
/// With `legacy_falsy` set, any falsy value (`null`, `false`, `0`, `""`) met on
/// the way counts as "no value", as older releases did. Note that this makes a
/// document whose key legitimately holds `0` indistinguishable from one without
/// a key. Without it only a missing step (absent key, `null`, or a non-object
/// intermediate) does.
pub fn resolve(
    definition: Option<&PartitionKeyDefinition>,
    document: &CosmosDocument,
    legacy_falsy: bool,
) -> PartitionKeyValue {
    // Fixed collections have no partition key value
    let path = match definition.and_then(PartitionKeyDefinition::first_path) {
        Some(path) => path,
        None => return PartitionKeyValue::Undefined,
    };

    let mut segments: Vec<&str> = path.split('/').collect();
    if segments.first() == Some(&"") {
        segments.remove(0);
    }

    let mut current: Option<&JsonValue> = None;
    for segment in segments {
        let next = match current {
            None => document.get(segment),
            Some(JsonValue::Object(map)) => map.get(segment),
            Some(_) => None,
        };

        match next {
            Some(value) if !is_unset(value, legacy_falsy) => current = Some(value),
            // Partition key exists, but this document doesn't have a value
            _ => return PartitionKeyValue::Empty,
        }
    }

    match current {
        Some(value) => PartitionKeyValue::Value(value.clone()),
        // A path made only of separators names no field at all
        None => PartitionKeyValue::Empty,
    }
}

fn is_unset(value: &JsonValue, legacy_falsy: bool) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::Bool(flag) => legacy_falsy && !flag,
        JsonValue::Number(number) => legacy_falsy && number.as_f64() == Some(0.0),
        JsonValue::String(text) => legacy_falsy && text.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => false,
    }
}
