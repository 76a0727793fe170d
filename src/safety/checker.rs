use std::time::Instant;

use serde::Deserialize;

use super::messages::MessageTemplates;
use super::normalize::normalize;
use super::profile::ListInput;
use super::table::InteractionTable;
use super::types::{SafetyReport, SafetyWarning, Severity};

// ---------------------------------------------------------------------------
// ALLERGY detection
// ---------------------------------------------------------------------------

/// Cross-match every prescribed drug against every allergy.
///
/// A match is containment in either direction after normalization, so
/// "Penicillin-VK" matches "penicillin" and vice versa. One warning per
/// matching (drug, allergy) pair, ordered by drug then allergy.
pub fn detect_allergy_matches<D, A>(prescribed: &[D], allergies: &[A]) -> Vec<SafetyWarning>
where
    D: AsRef<str>,
    A: AsRef<str>,
{
    let normalized_allergies: Vec<(String, &str)> = allergies
        .iter()
        .map(|a| (normalize(a.as_ref()), a.as_ref()))
        .collect();

    let mut warnings = Vec::new();

    for drug in prescribed {
        let drug = drug.as_ref();
        let d = normalize(drug);

        for (a, allergy_display) in &normalized_allergies {
            if d.contains(a.as_str()) || a.contains(d.as_str()) {
                warnings.push(SafetyWarning {
                    kind: Severity::Contraindication,
                    drug: drug.to_string(),
                    message: MessageTemplates::allergy(allergy_display),
                });
            }
        }
    }

    warnings
}

// ---------------------------------------------------------------------------
// PAIRWISE detection
// ---------------------------------------------------------------------------

/// Flag every two-token rule whose tokens both occur in the candidate pool.
///
/// The pool is prescribed drugs followed by current medications, so pairs
/// already present in the patient's medications are flagged too. Presence
/// is substring containment ("aspirin 81mg" holds "aspirin"). Output follows
/// table declaration order.
pub fn detect_pairwise_interactions<D, M>(
    prescribed: &[D],
    medications: &[M],
    table: &InteractionTable,
) -> Vec<SafetyWarning>
where
    D: AsRef<str>,
    M: AsRef<str>,
{
    let pool: Vec<String> = prescribed
        .iter()
        .map(|d| normalize(d.as_ref()))
        .chain(medications.iter().map(|m| normalize(m.as_ref())))
        .collect();

    let present = |token: &str| pool.iter().any(|candidate| candidate.contains(token));

    table
        .pairwise()
        .filter(|&(d1, d2, _)| present(d1) && present(d2))
        .map(|(d1, d2, rule)| SafetyWarning {
            kind: rule.severity,
            drug: MessageTemplates::interaction_label(d1, d2),
            message: rule.message.clone(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Combined check
// ---------------------------------------------------------------------------

/// Run the allergy check, then the pairwise check, and concatenate.
///
/// Pure and total: empty inputs give an empty result, identical inputs give
/// identical output. Nothing is deduplicated or re-sorted.
pub fn check_interactions<D, M, A>(
    prescribed: &[D],
    medications: &[M],
    allergies: &[A],
    table: &InteractionTable,
) -> Vec<SafetyWarning>
where
    D: AsRef<str>,
    M: AsRef<str>,
    A: AsRef<str>,
{
    let mut warnings = detect_allergy_matches(prescribed, allergies);
    warnings.extend(detect_pairwise_interactions(prescribed, medications, table));
    warnings
}

/// Inputs for one evaluation, as received from the prescription UI.
/// Absent fields are empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SafetyCheckRequest {
    #[serde(default)]
    pub prescribed_drugs: ListInput,
    #[serde(default)]
    pub patient_medications: ListInput,
    #[serde(default)]
    pub patient_allergies: ListInput,
}

impl SafetyCheckRequest {
    pub fn evaluate(&self, table: &InteractionTable) -> SafetyReport {
        let start = Instant::now();

        let prescribed = self.prescribed_drugs.to_list();
        let medications = self.patient_medications.to_list();
        let allergies = self.patient_allergies.to_list();

        let warnings = check_interactions(&prescribed, &medications, &allergies, table);

        let elapsed_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        SafetyReport::new(warnings, elapsed_us)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::safety::types::InteractionRule;

    const NONE: &[&str] = &[];

    fn check(prescribed: &[&str], meds: &[&str], allergies: &[&str]) -> Vec<SafetyWarning> {
        check_interactions(prescribed, meds, allergies, InteractionTable::builtin())
    }

    #[test]
    fn empty_inputs_yield_nothing() {
        assert!(check(NONE, NONE, NONE).is_empty());
    }

    #[test]
    fn allergy_drug_contains_allergy() {
        let warnings = check(&["Penicillin-VK"], NONE, &["penicillin"]);
        assert_eq!(
            warnings,
            vec![SafetyWarning {
                kind: Severity::Contraindication,
                drug: "Penicillin-VK".into(),
                message: "Patient is allergic to penicillin.".into(),
            }]
        );
    }

    #[test]
    fn allergy_allergy_contains_drug() {
        let warnings = check(&["penicillin"], NONE, &["Penicillin-VK"]);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, Severity::Contraindication);
        assert_eq!(warnings[0].drug, "penicillin");
        assert_eq!(warnings[0].message, "Patient is allergic to Penicillin-VK.");
    }

    #[test]
    fn allergy_case_insensitive_keeps_original_casing() {
        let warnings = check(&["AMOXICILLIN"], NONE, &["Amoxicillin"]);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].drug, "AMOXICILLIN");
        assert!(warnings[0].message.contains("Amoxicillin"));
    }

    #[test]
    fn allergy_multiple_matches_not_deduplicated() {
        let warnings = check(&["Penicillin G"], NONE, &["penicillin", "Penicillin", "sulfa"]);
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].message, "Patient is allergic to penicillin.");
        assert_eq!(warnings[1].message, "Patient is allergic to Penicillin.");
    }

    #[test]
    fn allergy_order_is_drug_then_allergy() {
        let warnings = check(&["sulfamethoxazole", "codeine"], NONE, &["codeine", "sulfa"]);
        let pairs: Vec<(&str, &str)> = warnings
            .iter()
            .map(|w| (w.drug.as_str(), w.message.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("sulfamethoxazole", "Patient is allergic to sulfa."),
                ("codeine", "Patient is allergic to codeine."),
            ]
        );
    }

    #[test]
    fn allergy_only_checks_prescribed_not_current_meds() {
        assert!(check(NONE, &["Penicillin"], &["penicillin"]).is_empty());
    }

    #[test]
    fn empty_allergy_string_matches_every_drug() {
        let warnings = check(&["Ibuprofen", "Metformin"], NONE, &[""]);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.message == "Patient is allergic to ."));
    }

    #[test]
    fn pairwise_warfarin_aspirin() {
        let warnings = check(&["Warfarin"], &["Aspirin 81mg"], NONE);
        assert_eq!(
            warnings,
            vec![SafetyWarning {
                kind: Severity::Contraindication,
                drug: "warfarin + aspirin".into(),
                message: "Increased risk of bleeding.".into(),
            }]
        );
    }

    #[test]
    fn no_false_positive_for_unpaired_drugs() {
        assert!(check(&["Ibuprofen"], &["Metformin"], NONE).is_empty());
    }

    #[test]
    fn single_sided_presence_is_silent() {
        assert!(check(&["Levodopa"], NONE, NONE).is_empty());
        assert!(check(NONE, &["Metoclopramide 10mg"], NONE).is_empty());
    }

    #[test]
    fn pairwise_caution_severity() {
        let warnings = check(&["CoQ10 100mg"], &["Warfarin 5mg"], NONE);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, Severity::Caution);
        assert_eq!(warnings[0].drug, "coq10 + warfarin");
    }

    #[test]
    fn pairwise_flags_preexisting_medication_pairs() {
        let warnings = check(NONE, &["Sildenafil", "Nitrates (isosorbide)"], NONE);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].drug, "sildenafil + nitrates");
        assert_eq!(warnings[0].message, "Hypotension risk.");
    }

    #[test]
    fn pairwise_follows_table_order() {
        let warnings = check(&["coq10", "aspirin"], &["warfarin"], NONE);
        let drugs: Vec<&str> = warnings.iter().map(|w| w.drug.as_str()).collect();
        assert_eq!(drugs, vec!["warfarin + aspirin", "coq10 + warfarin"]);
    }

    #[test]
    fn single_token_rule_is_never_evaluated() {
        assert!(check(&["Penicillin"], &["penicillin"], NONE).is_empty());
    }

    #[test]
    fn same_entry_can_satisfy_both_tokens() {
        let warnings = check(&["warfarin/aspirin combo"], NONE, NONE);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].drug, "warfarin + aspirin");
    }

    #[test]
    fn allergy_warnings_precede_interactions() {
        let warnings = check(&["Warfarin", "Aspirin"], NONE, &["warfarin"]);
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].drug, "Warfarin");
        assert_eq!(warnings[0].message, "Patient is allergic to warfarin.");
        assert_eq!(warnings[1].drug, "warfarin + aspirin");
    }

    #[test]
    fn evaluation_is_idempotent() {
        let prescribed = ["Warfarin", "CoQ10"];
        let meds = ["Aspirin 81mg"];
        let allergies = ["Warf"];
        let first = check(&prescribed, &meds, &allergies);
        let second = check(&prescribed, &meds, &allergies);
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn custom_table_is_respected() {
        let table = InteractionTable::from_rules(vec![InteractionRule {
            drugs: vec!["clopidogrel".into(), "omeprazole".into()],
            severity: Severity::Caution,
            message: "Reduced antiplatelet effect.".into(),
        }])
        .unwrap();

        let warnings = check_interactions(&["Clopidogrel"], &["Omeprazole 20mg"], NONE, &table);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].drug, "clopidogrel + omeprazole");

        assert!(check_interactions(&["Warfarin"], &["Aspirin"], NONE, &table).is_empty());
    }

    #[test]
    fn accepts_owned_strings() {
        let prescribed = vec!["Warfarin".to_string()];
        let meds = vec!["Aspirin".to_string()];
        let allergies: Vec<String> = Vec::new();
        let warnings =
            check_interactions(&prescribed, &meds, &allergies, InteractionTable::builtin());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn request_evaluates_into_report() {
        let request: SafetyCheckRequest = serde_json::from_str(
            r#"{
                "prescribed_drugs": ["Warfarin"],
                "patient_medications": "Aspirin 81mg, CoQ10",
                "patient_allergies": "None known"
            }"#,
        )
        .unwrap();

        let report = request.evaluate(InteractionTable::builtin());
        assert_eq!(report.counts.contraindications, 1);
        assert_eq!(report.counts.cautions, 1);
        assert_eq!(report.warnings[0].drug, "warfarin + aspirin");
        assert_eq!(report.warnings[1].drug, "coq10 + warfarin");
    }

    #[test]
    fn request_missing_fields_are_empty() {
        let request: SafetyCheckRequest = serde_json::from_str("{}").unwrap();
        let report = request.evaluate(InteractionTable::builtin());
        assert!(report.is_clear());
    }
}
