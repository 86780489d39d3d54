//! Document identity and file naming.

use crate::document_model::{CosmosDocument, PartitionKeyDefinition};
use crate::partition_key::{self, PartitionKeyValue};

/// Suffix appended to a document label to form its editable file name.
pub const DOCUMENT_FILE_SUFFIX: &str = "-cosmos-document.json";

/// Computes the identity of `document` within its parent container.
///
/// The store-assigned `_rid` is preferred. Documents without one fall back to
/// `id:partitionValue`, where the partition value is rendered by
/// [`PartitionKeyValue`]'s `Display` so that two documents sharing a logical id
/// in different partitions never collide.
pub fn identity_of(
    document: &CosmosDocument,
    definition: Option<&PartitionKeyDefinition>,
    legacy_falsy: bool,
) -> String {
    match document.resource_id() {
        Some(resource_id) => resource_id.to_string(),
        None => {
            let partition_value = partition_key::resolve(definition, document, legacy_falsy);
            fallback_identity(document, &partition_value)
        }
    }
}

/// Same as [`identity_of`] for callers that already resolved the partition value.
pub fn identity_with_partition(
    document: &CosmosDocument,
    partition_value: &PartitionKeyValue,
) -> String {
    match document.resource_id() {
        Some(resource_id) => resource_id.to_string(),
        None => fallback_identity(document, partition_value),
    }
}

/// `id:partition` form of the identity, regardless of `_rid`.
pub(crate) fn fallback_identity(document: &CosmosDocument, partition_value: &PartitionKeyValue) -> String {
    format!(
        "{}:{}",
        document.logical_id().unwrap_or_default(),
        partition_value
    )
}

/// File name under which a document with the given label is exposed for editing.
pub fn file_path(label: &str) -> String {
    format!("{label}{DOCUMENT_FILE_SUFFIX}")
}
