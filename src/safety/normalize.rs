/// Comparison form of a drug or allergy name: lower-cased, nothing else.
///
/// No trimming and no synonym resolution. Matching elsewhere relies on
/// substring containment over exactly this form.
pub fn normalize(name: &str) -> String {
    name.to_lowercase()
}
