/// Wording of generated warnings. Rule messages come from the table as-is.
pub struct MessageTemplates;

impl MessageTemplates {
    /// ALLERGY message. `allergy` is shown exactly as the caller supplied it.
    pub fn allergy(allergy: &str) -> String {
        format!("Patient is allergic to {}.", allergy)
    }

    /// Label for a pairwise interaction, built from the rule's own tokens.
    pub fn interaction_label(d1: &str, d2: &str) -> String {
        format!("{} + {}", d1, d2)
    }
}
