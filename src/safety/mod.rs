//! Medication safety checks for prescription entry.
//!
//! Two detections run over plain string inputs:
//! - allergy cross-match of each prescribed drug against the patient's allergies
//! - pairwise drug/drug interactions from the [`InteractionTable`]
//!
//! Allergy warnings come first, then interaction warnings in table order.
//! Evaluation is pure: no I/O, no logging, no shared mutable state.

pub mod checker;
pub mod messages;
pub mod normalize;
pub mod profile;
pub mod table;
pub mod types;

pub use checker::{
    check_interactions, detect_allergy_matches, detect_pairwise_interactions, SafetyCheckRequest,
};
pub use normalize::normalize;
pub use profile::{parse_list, ListInput};
pub use table::InteractionTable;
pub use types::{
    InteractionRule, SafetyError, SafetyReport, SafetyWarning, Severity, WarningCounts,
};
