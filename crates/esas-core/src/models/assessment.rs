//! Assessment models: symptoms, severities and the persisted record.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The ten ESAS symptom categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symptom {
    Pain,
    Fatigue,
    Nausea,
    Depression,
    Anxiety,
    Drowsiness,
    Appetite,
    Wellbeing,
    Dyspnea,
    Other,
}

impl Symptom {
    /// All symptoms in form order.
    pub const ALL: [Symptom; 10] = [
        Symptom::Pain,
        Symptom::Fatigue,
        Symptom::Nausea,
        Symptom::Depression,
        Symptom::Anxiety,
        Symptom::Drowsiness,
        Symptom::Appetite,
        Symptom::Wellbeing,
        Symptom::Dyspnea,
        Symptom::Other,
    ];

    /// Key used in the stored `symptoms` object.
    pub fn key(self) -> &'static str {
        match self {
            Symptom::Pain => "dolor",
            Symptom::Fatigue => "fatiga",
            Symptom::Nausea => "náusea",
            Symptom::Depression => "depresión",
            Symptom::Anxiety => "ansiedad",
            Symptom::Drowsiness => "somnolencia",
            Symptom::Appetite => "apetito",
            Symptom::Wellbeing => "bienestar",
            Symptom::Dyspnea => "disnea",
            Symptom::Other => "otros",
        }
    }

    /// Label shown next to the slider.
    pub fn label(self) -> &'static str {
        match self {
            Symptom::Pain => "Dolor",
            Symptom::Fatigue => "Fatiga",
            Symptom::Nausea => "Náusea",
            Symptom::Depression => "Depresión",
            Symptom::Anxiety => "Ansiedad",
            Symptom::Drowsiness => "Somnolencia",
            Symptom::Appetite => "Apetito",
            Symptom::Wellbeing => "Bienestar",
            Symptom::Dyspnea => "Disnea",
            Symptom::Other => "Otros",
        }
    }

    /// Look up a symptom by its stored key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

/// Severity outside the 0-10 scale.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("severity {0} is outside the 0-10 scale")]
pub struct SeverityOutOfRange(pub u8);

/// A symptom score on the inclusive 0-10 ESAS scale.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Severity(u8);

impl Severity {
    pub const MIN: Severity = Severity(0);
    pub const MAX: Severity = Severity(10);

    /// Create a severity, `None` if above 10.
    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX.0).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Severity {
    type Error = SeverityOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Severity::new(value).ok_or(SeverityOutOfRange(value))
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.0
    }
}

/// Scores for every symptom.
///
/// Each of the ten keys is a required field, so a stored record that is
/// missing one, carries an extra one, or holds a value outside 0-10 fails
/// to decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SymptomScores {
    #[serde(rename = "dolor")]
    pub pain: Severity,
    #[serde(rename = "fatiga")]
    pub fatigue: Severity,
    #[serde(rename = "náusea")]
    pub nausea: Severity,
    #[serde(rename = "depresión")]
    pub depression: Severity,
    #[serde(rename = "ansiedad")]
    pub anxiety: Severity,
    #[serde(rename = "somnolencia")]
    pub drowsiness: Severity,
    #[serde(rename = "apetito")]
    pub appetite: Severity,
    #[serde(rename = "bienestar")]
    pub wellbeing: Severity,
    #[serde(rename = "disnea")]
    pub dyspnea: Severity,
    #[serde(rename = "otros")]
    pub other: Severity,
}

impl SymptomScores {
    pub fn get(&self, symptom: Symptom) -> Severity {
        match symptom {
            Symptom::Pain => self.pain,
            Symptom::Fatigue => self.fatigue,
            Symptom::Nausea => self.nausea,
            Symptom::Depression => self.depression,
            Symptom::Anxiety => self.anxiety,
            Symptom::Drowsiness => self.drowsiness,
            Symptom::Appetite => self.appetite,
            Symptom::Wellbeing => self.wellbeing,
            Symptom::Dyspnea => self.dyspnea,
            Symptom::Other => self.other,
        }
    }

    pub fn set(&mut self, symptom: Symptom, severity: Severity) {
        let slot = match symptom {
            Symptom::Pain => &mut self.pain,
            Symptom::Fatigue => &mut self.fatigue,
            Symptom::Nausea => &mut self.nausea,
            Symptom::Depression => &mut self.depression,
            Symptom::Anxiety => &mut self.anxiety,
            Symptom::Drowsiness => &mut self.drowsiness,
            Symptom::Appetite => &mut self.appetite,
            Symptom::Wellbeing => &mut self.wellbeing,
            Symptom::Dyspnea => &mut self.dyspnea,
            Symptom::Other => &mut self.other,
        };
        *slot = severity;
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, symptom: Symptom, severity: Severity) -> Self {
        self.set(symptom, severity);
        self
    }

    /// Iterate `(symptom, severity)` pairs in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Symptom, Severity)> + '_ {
        Symptom::ALL.into_iter().map(move |s| (s, self.get(s)))
    }
}

/// A stored symptom evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Assessment {
    /// Generated at creation, never changes
    pub id: String,
    /// Evaluation time as `YYYY-MM-DDTHH:MM`
    pub date_time: String,
    /// Patient name from the roster
    pub patient: String,
    /// Recording clinician
    pub professional: String,
    /// Scores for all ten symptoms
    pub symptoms: SymptomScores,
    /// Free-text notes
    pub notes: String,
}

/// Field values for an assessment that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAssessment {
    pub date_time: String,
    pub patient: String,
    pub professional: String,
    pub symptoms: SymptomScores,
    pub notes: String,
}

impl Assessment {
    /// Attach an id to validated field values.
    pub fn new(id: String, fields: NewAssessment) -> Self {
        Self {
            id,
            date_time: fields.date_time,
            patient: fields.patient,
            professional: fields.professional,
            symptoms: fields.symptoms,
            notes: fields.notes,
        }
    }
}

/// Order in which result views list assessments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayOrder {
    NewestFirst,
    OldestFirst,
}

/// Sort by `date_time` for display. Equal timestamps keep insertion order.
pub fn sort_for_display(assessments: &mut [Assessment], order: DisplayOrder) {
    // `YYYY-MM-DDTHH:MM` compares chronologically as text
    match order {
        DisplayOrder::NewestFirst => assessments.sort_by(|a, b| b.date_time.cmp(&a.date_time)),
        DisplayOrder::OldestFirst => assessments.sort_by(|a, b| a.date_time.cmp(&b.date_time)),
    }
}
