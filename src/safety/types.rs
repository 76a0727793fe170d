use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Clinical severity of a warning. Ordered: a contraindication outranks a caution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Prescriber should review, but co-administration is not ruled out.
    Caution,
    /// Must not be co-administered or administered to this patient.
    Contraindication,
}

impl Severity {
    /// Heading shown above a warning of this severity.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Caution => "Clinical Caution",
            Self::Contraindication => "Safety Alert (Critical)",
        }
    }
}

// ---------------------------------------------------------------------------
// InteractionRule
// ---------------------------------------------------------------------------

/// One entry of the interaction table.
///
/// Two tokens describe a drug/drug interaction. A single token is an
/// allergy-class marker; those are carried in the table but never evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRule {
    pub drugs: Vec<String>,
    pub severity: Severity,
    pub message: String,
}

impl InteractionRule {
    /// The two tokens of a pairwise rule, or `None` for an allergy marker.
    pub fn pair(&self) -> Option<(&str, &str)> {
        match self.drugs.as_slice() {
            [d1, d2] => Some((d1.as_str(), d2.as_str())),
            _ => None,
        }
    }

    pub fn is_allergy_marker(&self) -> bool {
        self.drugs.len() == 1
    }
}

// ---------------------------------------------------------------------------
// SafetyWarning
// ---------------------------------------------------------------------------

/// A single warning produced by the evaluator. Compared by value only.
///
/// Serializes with a derived `title` heading next to `type`; the title is
/// ignored when reading a warning back.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SafetyWarning {
    #[serde(rename = "type")]
    pub kind: Severity,
    /// Offending drug as prescribed, or `"d1 + d2"` for an interaction.
    pub drug: String,
    pub message: String,
}

impl SafetyWarning {
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    pub fn is_contraindication(&self) -> bool {
        self.kind == Severity::Contraindication
    }
}

impl Serialize for SafetyWarning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SafetyWarning", 4)?;
        state.serialize_field("type", &self.kind)?;
        state.serialize_field("title", self.title())?;
        state.serialize_field("drug", &self.drug)?;
        state.serialize_field("message", &self.message)?;
        state.end()
    }
}

// ---------------------------------------------------------------------------
// SafetyReport & WarningCounts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WarningCounts {
    pub contraindications: usize,
    pub cautions: usize,
}

impl WarningCounts {
    pub fn tally(warnings: &[SafetyWarning]) -> Self {
        warnings
            .iter()
            .fold(Self::default(), |mut counts, w| {
                if w.is_contraindication() {
                    counts.contraindications += 1;
                } else {
                    counts.cautions += 1;
                }
                counts
            })
    }

    pub fn total(&self) -> usize {
        self.contraindications + self.cautions
    }
}

/// Result envelope for one evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyReport {
    pub warnings: Vec<SafetyWarning>,
    pub counts: WarningCounts,
    pub processing_time_us: u64,
}

impl SafetyReport {
    pub fn new(warnings: Vec<SafetyWarning>, processing_time_us: u64) -> Self {
        let counts = WarningCounts::tally(&warnings);
        Self {
            warnings,
            counts,
            processing_time_us,
        }
    }

    pub fn is_clear(&self) -> bool {
        self.warnings.is_empty()
    }
}

// ---------------------------------------------------------------------------
// SafetyError
// ---------------------------------------------------------------------------

/// Failures while building an interaction table. Evaluation itself cannot fail.
#[derive(Error, Debug)]
pub enum SafetyError {
    #[error("Interaction table load failed ({0}): {1}")]
    TableLoad(String, String),

    #[error("Interaction table parse failed ({0}): {1}")]
    TableParse(String, String),

    #[error("Invalid interaction rule at index {index}: {reason}")]
    InvalidRule { index: usize, reason: String },
}
