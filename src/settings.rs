//! Host-provided settings.
//!
//! The host hands over its extension settings as a JSON object. Unknown keys are
//! ignored and every missing key falls back to its default.

use serde::{Deserialize, Serialize};

/// Configuration object holding the options that influence document presentation
/// and addressing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Top-level document fields tried, in order, when computing a document's
    /// label. The first field holding a scalar value wins; otherwise the label
    /// falls back to `id`.
    pub document_label_fields: Vec<String>,

    /// Treat any falsy value (`0`, `false`, `""`) met while walking a partition
    /// key path as "unset".
    ///
    /// Older releases derived identities and file names that way. Enable this to
    /// keep those names stable; leave it off to address documents whose partition
    /// key legitimately holds a falsy value.
    pub legacy_falsy_partition_values: bool,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
