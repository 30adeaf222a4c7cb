use std::fmt;
use tracing::debug;

use super::normalize_text;
use crate::catalog::Catalog;

/// The deduplicated symptom phrases recognized in one input text.
///
/// Phrases keep their catalog spelling. Iteration follows insertion order,
/// which for [`extract_symptoms`] is catalog vocabulary order, so repeated
/// analyses of the same text are identical. Equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct ExtractedSymptoms {
    phrases: Vec<String>,
}

impl ExtractedSymptoms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a phrase; returns false if it was already present.
    pub fn insert(&mut self, phrase: impl Into<String>) -> bool {
        let phrase = phrase.into();
        if self.contains(&phrase) {
            return false;
        }
        self.phrases.push(phrase);
        true
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.phrases.iter().any(|p| p == phrase)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }
}

impl PartialEq for ExtractedSymptoms {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|p| other.contains(p))
    }
}

impl Eq for ExtractedSymptoms {}

impl<S: Into<String>> FromIterator<S> for ExtractedSymptoms {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut symptoms = Self::new();
        for phrase in iter {
            symptoms.insert(phrase);
        }
        symptoms
    }
}

impl fmt::Display for ExtractedSymptoms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.phrases.join(", "))
    }
}

/// Find every catalog symptom phrase mentioned in `input`.
///
/// A phrase matches when each of its words occurs somewhere in the lowercased
/// input, or when the whole phrase occurs as one substring. Containment is raw
/// substring containment, not word matching: "cold" matches inside "scold",
/// and the words of "high fever" may come from unrelated parts of the text.
pub fn extract_symptoms(catalog: &Catalog, input: &str) -> ExtractedSymptoms {
    let normalized = normalize_text(input);
    let mut found = ExtractedSymptoms::new();
    if normalized.is_empty() {
        return found;
    }

    for phrase in catalog.vocabulary() {
        if phrase_matches(&normalized, phrase) {
            found.insert(phrase);
        }
    }

    debug!(count = found.len(), symptoms = %found, "Extracted symptoms");
    found
}

fn phrase_matches(normalized_input: &str, phrase: &str) -> bool {
    let phrase = normalize_text(phrase);
    if phrase.is_empty() {
        return false;
    }
    phrase
        .split_whitespace()
        .all(|word| normalized_input.contains(word))
        || normalized_input.contains(phrase.as_str())
}
