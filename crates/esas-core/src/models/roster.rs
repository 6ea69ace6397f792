//! Fixed patient and professional lists offered by the form.

/// Patients selectable in the form, first entry preselected.
pub const PATIENT_NAMES: &[&str] = &["Juan Perez", "Ana Gonzalez"];

/// Professionals selectable in the form. Currently a single clinician.
pub const PROFESSIONAL_NAMES: &[&str] = &["Dr. Cito"];

/// Patient preselected in a fresh form.
pub fn default_patient() -> &'static str {
    PATIENT_NAMES[0]
}

/// Professional preselected in a fresh form.
pub fn default_professional() -> &'static str {
    PROFESSIONAL_NAMES[0]
}
