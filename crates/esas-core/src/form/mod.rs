//! ESAS form state, validation and submission.
//!
//! The store trusts whatever it is given; every field check lives here and
//! runs before the store is reached.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::models::{
    default_patient, default_professional, Assessment, NewAssessment, Severity, Symptom,
    SymptomScores,
};
use crate::storage::KeyValueSlot;
use crate::store::{AssessmentStore, StoreError};

/// Maximum note length in characters.
pub const MAX_NOTES_CHARS: usize = 500;

/// `datetime-local` format the form writes and stores.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub const FORM_TITLE: &str = "Evaluación de Síntomas (ESAS)";
pub const SAVE_LABEL: &str = "Guardar evaluación";
pub const NOTES_LABEL: &str = "Notas adicionales";
pub const SAVE_SUCCESS_TEXT: &str = "¡Evaluación guardada exitosamente!";
pub const SAVE_FAILED_TEXT: &str = "Error al guardar la evaluación. Intente nuevamente.";

/// Validation failures. Display text is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Debe seleccionar un paciente.")]
    MissingPatient,

    #[error("Debe seleccionar un profesional.")]
    MissingProfessional,

    #[error("Debe ingresar la fecha y hora de la evaluación.")]
    MissingDateTime,

    #[error("La fecha y hora no tienen un formato válido: {0}")]
    InvalidDateTime(String),

    #[error("La fecha y hora no pueden ser futuras.")]
    FutureDateTime,

    #[error("Las notas no pueden superar {} caracteres ({0} ingresados).", MAX_NOTES_CHARS)]
    NotesTooLong(usize),
}

/// Outcome of a failed submission.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("{0}")]
    Form(#[from] FormError),

    #[error("{0}")]
    Store(#[from] StoreError),
}

impl SubmitError {
    /// Inline message for the form. Storage details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Form(e) => e.to_string(),
            SubmitError::Store(_) => SAVE_FAILED_TEXT.to_string(),
        }
    }
}

/// Current contents of the assessment form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentForm {
    pub date_time: String,
    pub patient: String,
    pub professional: String,
    symptoms: SymptomScores,
    notes: String,
}

impl AssessmentForm {
    /// Fresh form: `now` at minute precision, first patient, default
    /// professional, every symptom at 0, no notes.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            date_time: now.format(DATE_TIME_FORMAT).to_string(),
            patient: default_patient().to_string(),
            professional: default_professional().to_string(),
            symptoms: SymptomScores::default(),
            notes: String::new(),
        }
    }

    pub fn symptoms(&self) -> &SymptomScores {
        &self.symptoms
    }

    pub fn set_symptom(&mut self, symptom: Symptom, severity: Severity) {
        self.symptoms.set(symptom, severity);
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Replace the notes. Text over the limit is refused and the notes are
    /// left unchanged.
    pub fn set_notes(&mut self, notes: &str) -> bool {
        if notes.chars().count() > MAX_NOTES_CHARS {
            return false;
        }
        self.notes = notes.to_string();
        true
    }

    /// Clear scores and notes for the next assessment. Date, patient and
    /// professional are kept.
    pub fn reset(&mut self) {
        self.symptoms = SymptomScores::default();
        self.notes.clear();
    }

    /// Check every field against the local time `now`.
    pub fn validate(&self, now: NaiveDateTime) -> Result<NewAssessment, FormError> {
        if self.patient.trim().is_empty() {
            return Err(FormError::MissingPatient);
        }
        if self.professional.trim().is_empty() {
            return Err(FormError::MissingProfessional);
        }
        if self.date_time.trim().is_empty() {
            return Err(FormError::MissingDateTime);
        }

        let evaluated_at = parse_date_time(self.date_time.trim())?;
        if evaluated_at > now {
            return Err(FormError::FutureDateTime);
        }

        let notes_len = self.notes.chars().count();
        if notes_len > MAX_NOTES_CHARS {
            return Err(FormError::NotesTooLong(notes_len));
        }

        Ok(NewAssessment {
            date_time: evaluated_at.format(DATE_TIME_FORMAT).to_string(),
            patient: self.patient.clone(),
            professional: self.professional.clone(),
            symptoms: self.symptoms,
            notes: self.notes.clone(),
        })
    }

    /// Validate and persist.
    pub fn submit<S: KeyValueSlot>(
        &self,
        store: &mut AssessmentStore<S>,
        now: NaiveDateTime,
    ) -> Result<Assessment, SubmitError> {
        let fields = self.validate(now)?;
        Ok(store.add(fields)?)
    }
}

/// Parse `YYYY-MM-DDTHH:MM`, tolerating a seconds component.
fn parse_date_time(raw: &str) -> Result<NaiveDateTime, FormError> {
    NaiveDateTime::parse_from_str(raw, DATE_TIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| FormError::InvalidDateTime(raw.to_string()))
}
