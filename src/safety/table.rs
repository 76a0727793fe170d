use std::path::Path;
use std::sync::LazyLock;

use super::normalize::normalize;
use super::types::{InteractionRule, SafetyError};

/// Bundled interaction table, compiled into the binary.
const BUILTIN_TABLE_JSON: &str = include_str!("../../resources/interactions.json");

static BUILTIN: LazyLock<InteractionTable> = LazyLock::new(|| {
    InteractionTable::from_json(BUILTIN_TABLE_JSON, "interactions.json (bundled)")
        .expect("bundled interaction table must be valid")
});

/// Immutable registry of known interactions, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionTable {
    rules: Vec<InteractionRule>,
}

impl InteractionTable {
    /// The bundled table. Parsed once, on first use.
    pub fn builtin() -> &'static InteractionTable {
        &BUILTIN
    }

    /// Build a table from rules, validating arity and normalizing tokens.
    pub fn from_rules(rules: Vec<InteractionRule>) -> Result<Self, SafetyError> {
        let mut validated = Vec::with_capacity(rules.len());

        for (index, mut rule) in rules.into_iter().enumerate() {
            if rule.drugs.is_empty() || rule.drugs.len() > 2 {
                return Err(SafetyError::InvalidRule {
                    index,
                    reason: format!("expected 1 or 2 drug tokens, found {}", rule.drugs.len()),
                });
            }
            if rule.drugs.iter().any(|d| d.is_empty()) {
                return Err(SafetyError::InvalidRule {
                    index,
                    reason: "drug token is empty".into(),
                });
            }
            rule.drugs = rule.drugs.iter().map(|d| normalize(d)).collect();
            validated.push(rule);
        }

        Ok(Self { rules: validated })
    }

    /// Parse a JSON array of rules. `source` names the input in errors.
    pub fn from_json(json: &str, source: &str) -> Result<Self, SafetyError> {
        let rules: Vec<InteractionRule> = serde_json::from_str(json)
            .map_err(|e| SafetyError::TableParse(source.to_string(), e.to_string()))?;
        Self::from_rules(rules)
    }

    /// Load a table from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SafetyError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| SafetyError::TableLoad(path.display().to_string(), e.to_string()))?;
        let table = Self::from_json(&json, &path.display().to_string())?;

        tracing::info!(
            path = %path.display(),
            pairwise = table.pairwise().count(),
            allergy_markers = table.allergy_markers().count(),
            "Interaction table loaded"
        );

        Ok(table)
    }

    pub fn rules(&self) -> &[InteractionRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Two-token rules with their tokens, in declaration order.
    pub fn pairwise(&self) -> impl Iterator<Item = (&str, &str, &InteractionRule)> {
        self.rules
            .iter()
            .filter_map(|rule| rule.pair().map(|(d1, d2)| (d1, d2, rule)))
    }

    /// Single-token allergy markers. Never evaluated.
    pub fn allergy_markers(&self) -> impl Iterator<Item = &InteractionRule> {
        self.rules.iter().filter(|rule| rule.is_allergy_marker())
    }
}
