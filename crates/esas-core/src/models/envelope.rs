//! Persisted envelope wrapping the assessment list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::assessment::Assessment;

/// Storage key the envelope is written under.
pub const STORAGE_KEY: &str = "esas_v1";

/// Format tag written on every save. Any other tag is discarded on load.
pub const FORMAT_VERSION: &str = "1.0";

/// Envelope lifetime measured from `savedAt` (30 days).
pub const ENVELOPE_TTL_MS: i64 = 1000 * 60 * 60 * 24 * 30;

/// Largest serialized envelope the store will write (typical browser quota).
pub const MAX_ENVELOPE_BYTES: usize = 5 * 1024 * 1024;

/// Versioned, timestamped container for all assessments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Envelope {
    /// Format tag
    pub version: String,
    /// Epoch milliseconds of the last write
    pub saved_at: i64,
    /// Assessments in insertion order
    pub assessments: Vec<Assessment>,
}

impl Envelope {
    /// First id that appears more than once, if any.
    pub fn duplicate_id(&self) -> Option<&str> {
        let mut seen = HashSet::with_capacity(self.assessments.len());
        self.assessments
            .iter()
            .map(|a| a.id.as_str())
            .find(|id| !seen.insert(*id))
    }
}

/// Borrowed form of [`Envelope`] used on the write path.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EnvelopeRef<'a> {
    pub version: &'a str,
    pub saved_at: i64,
    pub assessments: &'a [Assessment],
}

/// Version and timestamp, decoded ahead of the full schema.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EnvelopeHeader {
    pub version: String,
    pub saved_at: i64,
}

impl EnvelopeHeader {
    /// Milliseconds elapsed since the envelope was written.
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(self.saved_at)
    }

    /// True once the envelope is strictly older than `ttl_ms`.
    pub fn is_expired(&self, now_ms: i64, ttl_ms: i64) -> bool {
        self.age_ms(now_ms) > ttl_ms
    }
}
