//! ESAS Core Library
//!
//! Symptom assessments (Edmonton Symptom Assessment System) recorded on the
//! device and kept in a single local key-value slot.
//!
//! # Architecture
//!
//! ```text
//!   AssessmentForm ──validate──▶ NewAssessment
//!                                     │
//!                              AssessmentStore::add
//!                                     │
//!                       load ◀── Envelope ──▶ save
//!                   { version, savedAt, assessments[] }
//!                                     │
//!                              KeyValueSlot
//!              ┌──────────────────────┼──────────────────────┐
//!              ▼                      ▼                      ▼
//!         MemorySlot             SqliteSlot        BrowserSlot (web)
//! ```
//!
//! # Core Principle
//!
//! **Loading never fails.** A missing, corrupt, expired or foreign-version
//! envelope loads as an empty list; only writes report errors.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Assessment, SymptomScores, Envelope)
//! - [`storage`]: Key-value slot trait and backends
//! - [`store`]: Versioned, time-limited assessment persistence
//! - [`form`]: Form state, validation and submission

pub mod form;
pub mod models;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use form::{AssessmentForm, FormError, SubmitError};
pub use models::{
    Assessment, DisplayOrder, Envelope, NewAssessment, Severity, Symptom, SymptomScores,
};
pub use storage::{KeyValueSlot, MemorySlot, SqliteSlot, StorageError};
pub use store::{AssessmentStore, DiscardReason, StoreConfig, StoreError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum EsasError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<StorageError> for EsasError {
    fn from(e: StorageError) -> Self {
        EsasError::StorageError(e.to_string())
    }
}

impl From<StoreError> for EsasError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Json(e) => EsasError::SerializationError(e.to_string()),
            other => EsasError::StorageError(other.to_string()),
        }
    }
}

impl From<FormError> for EsasError {
    fn from(e: FormError) -> Self {
        EsasError::InvalidInput(e.to_string())
    }
}

impl From<SubmitError> for EsasError {
    fn from(e: SubmitError) -> Self {
        match e {
            SubmitError::Form(e) => e.into(),
            SubmitError::Store(e) => e.into(),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for EsasError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        EsasError::StorageError(format!("Lock poisoned: {}", e))
    }
}

type SharedStore = AssessmentStore<Box<dyn KeyValueSlot + Send>>;

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a SQLite-backed store at the given path.
#[uniffi::export]
pub fn open_store(path: String) -> Result<Arc<EsasCore>, EsasError> {
    let slot = SqliteSlot::open(&path)?;
    Ok(EsasCore::with_slot(Box::new(slot)))
}

/// Create an in-memory store (for testing).
#[uniffi::export]
pub fn open_store_in_memory() -> Result<Arc<EsasCore>, EsasError> {
    Ok(EsasCore::with_slot(Box::new(MemorySlot::new())))
}

/// Patients offered by the form.
#[uniffi::export]
pub fn patient_names() -> Vec<String> {
    models::PATIENT_NAMES.iter().map(|s| s.to_string()).collect()
}

/// Professionals offered by the form.
#[uniffi::export]
pub fn professional_names() -> Vec<String> {
    models::PROFESSIONAL_NAMES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Symptom keys and labels in form order.
#[uniffi::export]
pub fn symptom_catalog() -> Vec<FfiSymptom> {
    Symptom::ALL
        .into_iter()
        .map(|s| FfiSymptom {
            key: s.key().to_string(),
            label: s.label().to_string(),
        })
        .collect()
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe store wrapper for FFI.
#[derive(uniffi::Object)]
pub struct EsasCore {
    store: Arc<Mutex<SharedStore>>,
}

impl EsasCore {
    fn with_slot(slot: Box<dyn KeyValueSlot + Send>) -> Arc<Self> {
        Arc::new(Self {
            store: Arc::new(Mutex::new(AssessmentStore::new(slot))),
        })
    }
}

#[uniffi::export]
impl EsasCore {
    // =========================================================================
    // Assessment Operations
    // =========================================================================

    /// Validate a submitted form against the local clock and store it.
    pub fn submit_assessment(&self, form: FfiAssessmentForm) -> Result<FfiAssessment, EsasError> {
        let form = AssessmentForm::try_from(form)?;
        let now = chrono::Local::now().naive_local();
        let mut store = self.store.lock()?;
        let created = form.submit(&mut *store, now)?;
        Ok(created.into())
    }

    /// All stored assessments in insertion order.
    pub fn list_assessments(&self) -> Result<Vec<FfiAssessment>, EsasError> {
        let store = self.store.lock()?;
        Ok(store.load().into_iter().map(|a| a.into()).collect())
    }

    /// Stored assessments, most recent evaluation first.
    pub fn list_assessments_newest_first(&self) -> Result<Vec<FfiAssessment>, EsasError> {
        let store = self.store.lock()?;
        let mut assessments = store.load();
        models::sort_for_display(&mut assessments, DisplayOrder::NewestFirst);
        Ok(assessments.into_iter().map(|a| a.into()).collect())
    }

    /// Delete one assessment. Returns false if the id was not stored.
    pub fn delete_assessment(&self, id: String) -> Result<bool, EsasError> {
        let mut store = self.store.lock()?;
        Ok(store.remove_one(&id)?)
    }

    /// Delete every assessment.
    pub fn delete_all_assessments(&self) -> Result<(), EsasError> {
        let mut store = self.store.lock()?;
        store.remove_all()?;
        Ok(())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe symptom description.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSymptom {
    pub key: String,
    pub label: String,
}

/// FFI-safe symptom score.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiSymptomScore {
    pub key: String,
    pub score: u8,
}

fn scores_to_ffi(scores: &SymptomScores) -> Vec<FfiSymptomScore> {
    scores
        .iter()
        .map(|(symptom, severity)| FfiSymptomScore {
            key: symptom.key().to_string(),
            score: severity.value(),
        })
        .collect()
}

/// FFI-safe form submission. Symptoms left out score 0.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAssessmentForm {
    pub date_time: String,
    pub patient: String,
    pub professional: String,
    pub symptoms: Vec<FfiSymptomScore>,
    pub notes: String,
}

impl TryFrom<FfiAssessmentForm> for AssessmentForm {
    type Error = EsasError;

    fn try_from(input: FfiAssessmentForm) -> Result<Self, Self::Error> {
        let mut form = AssessmentForm::new(chrono::Local::now().naive_local());
        form.date_time = input.date_time;
        form.patient = input.patient;
        form.professional = input.professional;

        for score in input.symptoms {
            let symptom = Symptom::from_key(&score.key).ok_or_else(|| {
                EsasError::InvalidInput(format!("Unknown symptom: {}", score.key))
            })?;
            let severity = Severity::try_from(score.score)
                .map_err(|e| EsasError::InvalidInput(e.to_string()))?;
            form.set_symptom(symptom, severity);
        }

        if !form.set_notes(&input.notes) {
            return Err(FormError::NotesTooLong(input.notes.chars().count()).into());
        }

        Ok(form)
    }
}

/// FFI-safe stored assessment.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiAssessment {
    pub id: String,
    pub date_time: String,
    pub patient: String,
    pub professional: String,
    pub symptoms: Vec<FfiSymptomScore>,
    pub notes: String,
}

impl From<Assessment> for FfiAssessment {
    fn from(assessment: Assessment) -> Self {
        Self {
            symptoms: scores_to_ffi(&assessment.symptoms),
            id: assessment.id,
            date_time: assessment.date_time,
            patient: assessment.patient,
            professional: assessment.professional,
            notes: assessment.notes,
        }
    }
}
