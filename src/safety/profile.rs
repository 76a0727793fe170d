use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Separators used in free-text profile fields.
static RE_LIST_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;\r\n]+").unwrap());

/// Entries that mean "nothing recorded" rather than a substance.
const PLACEHOLDERS: &[&str] = &[
    "none",
    "none known",
    "none listed",
    "n/a",
    "na",
    "nkda",
    "no known allergies",
    "no known drug allergies",
];

/// Split a free-text profile field into entries.
/// Handles: "Aspirin 81mg, Metformin", "penicillin; sulfa", one per line.
/// Entries are trimmed; empty and placeholder entries are dropped.
pub fn parse_list(text: &str) -> Vec<String> {
    RE_LIST_SEPARATOR
        .split(text)
        .map(str::trim)
        .filter(|entry| !entry.is_empty() && !is_placeholder(entry))
        .map(str::to_string)
        .collect()
}

fn is_placeholder(entry: &str) -> bool {
    let lower = entry.to_lowercase();
    PLACEHOLDERS.contains(&lower.as_str())
}

/// A profile field as the upstream source supplies it: a structured list,
/// comma-separated text, or nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListInput {
    /// Already-parsed entries, used verbatim.
    Items(Vec<String>),
    /// Free text, run through [`parse_list`].
    Text(String),
    #[default]
    Missing,
}

impl ListInput {
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Self::Items(items) => items.clone(),
            Self::Text(text) => parse_list(text),
            Self::Missing => Vec::new(),
        }
    }
}

impl From<Vec<String>> for ListInput {
    fn from(items: Vec<String>) -> Self {
        Self::Items(items)
    }
}

impl From<&str> for ListInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}
