//! Assessment store: the assessment list persisted as one versioned,
//! time-limited envelope in a key-value slot.
//!
//! Every mutation is a full read-modify-write of the envelope. Reads never
//! fail: an absent, unreadable, corrupt, stale or foreign-version envelope
//! loads as an empty list and is replaced by the next successful save.

mod clock;
mod config;

pub use clock::*;
pub use config::*;

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::models::{Assessment, Envelope, EnvelopeHeader, EnvelopeRef, NewAssessment};
use crate::storage::{KeyValueSlot, StorageError};

/// Store write errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Envelope of {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("Assessment id already stored: {0}")]
    DuplicateId(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Why a stored envelope was not usable.
#[derive(Error, Debug)]
pub enum DiscardReason {
    #[error("nothing stored under {0}")]
    Absent(String),

    #[error("slot could not be read: {0}")]
    Unreadable(#[source] StorageError),

    #[error("stored value is not JSON: {0}")]
    NotJson(#[source] serde_json::Error),

    #[error("envelope version {found} does not match {expected}")]
    VersionMismatch { found: String, expected: String },

    #[error("envelope saved {age_ms} ms ago exceeds ttl of {ttl_ms} ms")]
    Expired { age_ms: i64, ttl_ms: i64 },

    #[error("envelope does not match the assessment schema: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("assessment id {0} appears more than once")]
    DuplicateId(String),
}

/// Assessment persistence over an injected key-value slot.
pub struct AssessmentStore<S> {
    slot: S,
    config: StoreConfig,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl<S: KeyValueSlot> AssessmentStore<S> {
    /// Store with default configuration, system clock and UUID ids.
    pub fn new(slot: S) -> Self {
        Self {
            slot,
            config: StoreConfig::default(),
            clock: Arc::new(SystemClock),
            ids: Arc::new(UuidGenerator),
        }
    }

    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Underlying slot.
    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Underlying slot, for writes that bypass the envelope.
    pub fn slot_mut(&mut self) -> &mut S {
        &mut self.slot
    }

    pub fn into_slot(self) -> S {
        self.slot
    }

    /// Decode the stored envelope, or report why it cannot be used.
    ///
    /// Checks run in order: presence, readability, JSON syntax, version,
    /// age, full schema, id uniqueness.
    pub fn read_envelope(&self) -> Result<Envelope, DiscardReason> {
        let key = &self.config.storage_key;
        let raw = self
            .slot
            .get(key)
            .map_err(DiscardReason::Unreadable)?
            .ok_or_else(|| DiscardReason::Absent(key.clone()))?;

        let value: serde_json::Value =
            serde_json::from_str(&raw).map_err(DiscardReason::NotJson)?;

        let header = EnvelopeHeader::deserialize(&value).map_err(DiscardReason::Malformed)?;
        if header.version != self.config.version {
            return Err(DiscardReason::VersionMismatch {
                found: header.version,
                expected: self.config.version.clone(),
            });
        }

        let now_ms = self.clock.now_millis();
        if header.is_expired(now_ms, self.config.ttl_ms) {
            return Err(DiscardReason::Expired {
                age_ms: header.age_ms(now_ms),
                ttl_ms: self.config.ttl_ms,
            });
        }

        let envelope = Envelope::deserialize(value).map_err(DiscardReason::Malformed)?;
        if let Some(id) = envelope.duplicate_id() {
            return Err(DiscardReason::DuplicateId(id.to_string()));
        }

        Ok(envelope)
    }

    /// Load all assessments in insertion order. Unusable data loads as empty.
    pub fn load(&self) -> Vec<Assessment> {
        match self.read_envelope() {
            Ok(envelope) => envelope.assessments,
            Err(DiscardReason::Absent(key)) => {
                tracing::debug!(key = %key, "No stored assessments");
                Vec::new()
            }
            Err(reason) => {
                tracing::warn!(
                    key = %self.config.storage_key,
                    reason = %reason,
                    "Discarding stored assessments"
                );
                Vec::new()
            }
        }
    }

    /// Overwrite the slot with `assessments`, stamped with the current version and time.
    pub fn save(&mut self, assessments: &[Assessment]) -> StoreResult<()> {
        let envelope = EnvelopeRef {
            version: &self.config.version,
            saved_at: self.clock.now_millis(),
            assessments,
        };
        let payload = serde_json::to_string(&envelope)?;

        if payload.len() > self.config.max_payload_bytes {
            tracing::warn!(
                size = payload.len(),
                limit = self.config.max_payload_bytes,
                "Refusing to write oversized envelope"
            );
            return Err(StoreError::PayloadTooLarge {
                size: payload.len(),
                limit: self.config.max_payload_bytes,
            });
        }

        if let Err(e) = self.slot.set(&self.config.storage_key, &payload) {
            tracing::warn!(error = %e, key = %self.config.storage_key, "Failed to write assessments");
            return Err(e.into());
        }

        tracing::debug!(
            count = assessments.len(),
            bytes = payload.len(),
            "Saved assessments"
        );
        Ok(())
    }

    /// Create an assessment with a fresh id, append it and save.
    pub fn add(&mut self, fields: NewAssessment) -> StoreResult<Assessment> {
        let mut assessments = self.load();

        let id = self.ids.generate();
        if assessments.iter().any(|a| a.id == id) {
            return Err(StoreError::DuplicateId(id));
        }

        let assessment = Assessment::new(id, fields);
        assessments.push(assessment.clone());
        self.save(&assessments)?;

        tracing::debug!(id = %assessment.id, patient = %assessment.patient, "Added assessment");
        Ok(assessment)
    }

    /// Remove the assessment with `id` and save. Returns whether it existed.
    pub fn remove_one(&mut self, id: &str) -> StoreResult<bool> {
        let mut assessments = self.load();
        let before = assessments.len();
        assessments.retain(|a| a.id != id);
        let removed = assessments.len() != before;

        self.save(&assessments)?;
        Ok(removed)
    }

    /// Replace the stored list with an empty one.
    pub fn remove_all(&mut self) -> StoreResult<()> {
        self.save(&[])
    }
}
