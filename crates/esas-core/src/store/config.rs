//! Store configuration.

use serde::{Deserialize, Serialize};

use crate::models::{ENVELOPE_TTL_MS, FORMAT_VERSION, MAX_ENVELOPE_BYTES, STORAGE_KEY};

/// Where and how the store persists its envelope.
///
/// Every field has a default, so a partial JSON object (or `{}`) is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Slot key the envelope is written under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Format tag written on save and required on load
    #[serde(default = "default_version")]
    pub version: String,

    /// Envelope lifetime in milliseconds
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: i64,

    /// Largest serialized envelope accepted on save
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,
}

fn default_storage_key() -> String {
    STORAGE_KEY.to_string()
}

fn default_version() -> String {
    FORMAT_VERSION.to_string()
}

fn default_ttl_ms() -> i64 {
    ENVELOPE_TTL_MS
}

fn default_max_payload_bytes() -> usize {
    MAX_ENVELOPE_BYTES
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            version: default_version(),
            ttl_ms: default_ttl_ms(),
            max_payload_bytes: default_max_payload_bytes(),
        }
    }
}

impl StoreConfig {
    /// Parse a configuration from JSON, filling omitted fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
