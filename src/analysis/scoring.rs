use serde::Serialize;
use std::borrow::Cow;
use tracing::{debug, trace};

use super::extract::ExtractedSymptoms;
use super::normalize_text;
use crate::catalog::{Catalog, Disease};

/// Score added when a symptom only loosely matches one of a disease's own
/// symptom phrases. Deliberately weaker than most curated weights.
pub const FALLBACK_MATCH_SCORE: f64 = 0.5;

/// Per-symptom score that counts as a full match when normalizing.
const FULL_MATCH_SCORE: f64 = 0.9;

/// Probabilities never exceed this.
pub const MAX_PROBABILITY: u8 = 95;

/// At most this many predictions are returned.
pub const MAX_PREDICTIONS: usize = 5;

/// One ranked disease candidate.
///
/// Rule-based predictions borrow the disease from the catalog. Remote AI
/// predictions for conditions outside the catalog own a synthesized one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult<'c> {
    pub disease: Cow<'c, Disease>,
    /// Heuristic confidence, 1..=95 for rule-based results
    pub probability: u8,
    pub matched_symptoms: Vec<String>,
}

/// Score every catalog disease against `symptoms` and return the best matches.
///
/// For each symptom a disease gains its curated weight from the weight table,
/// and, if that didn't already match, [`FALLBACK_MATCH_SCORE`] when the symptom
/// and one of the disease's own symptom phrases contain one another. The total
/// is divided by `0.9` per extracted symptom, capped at 95% and rounded.
/// Diseases rounding to zero are dropped; the rest are sorted by probability
/// (ties keep catalog order) and truncated to [`MAX_PREDICTIONS`].
pub fn calculate_probabilities<'c>(
    catalog: &'c Catalog,
    symptoms: &ExtractedSymptoms,
) -> Vec<PredictionResult<'c>> {
    if symptoms.is_empty() {
        return Vec::new();
    }

    let normalized: Vec<(&str, String)> = symptoms
        .iter()
        .map(|s| (s, normalize_text(s)))
        .collect();
    let max_possible_score = symptoms.len() as f64 * FULL_MATCH_SCORE;

    let mut results: Vec<PredictionResult<'c>> = catalog
        .diseases()
        .iter()
        .filter_map(|disease| {
            let (score, matched) = score_disease(catalog, disease, &normalized);
            let probability = to_probability(score, max_possible_score);
            trace!(disease = %disease.id, score, probability, "Scored disease");
            (probability > 0).then(|| PredictionResult {
                disease: Cow::Borrowed(disease),
                probability,
                matched_symptoms: matched,
            })
        })
        .collect();

    // sort_by is stable, so equal probabilities keep catalog order
    results.sort_by(|a, b| b.probability.cmp(&a.probability));
    results.truncate(MAX_PREDICTIONS);

    debug!(
        predictions = results.len(),
        top = results.first().map(|p| p.disease.id.as_str()),
        "Calculated disease probabilities"
    );
    results
}

fn score_disease(
    catalog: &Catalog,
    disease: &Disease,
    symptoms: &[(&str, String)],
) -> (f64, Vec<String>) {
    let disease_symptoms: Vec<String> = disease
        .symptoms
        .iter()
        .map(|s| normalize_text(s))
        .collect();
    let mut score = 0.0;
    let mut matched: Vec<String> = Vec::new();

    for (original, symptom) in symptoms {
        let mut is_matched = false;

        if let Some(weight) = catalog.weight(symptom, &disease.id) {
            score += weight;
            is_matched = true;
        }

        if !is_matched
            && disease_symptoms
                .iter()
                .any(|ds| ds.contains(symptom.as_str()) || symptom.contains(ds.as_str()))
        {
            score += FALLBACK_MATCH_SCORE;
            is_matched = true;
        }

        if is_matched && !matched.iter().any(|m| m == original) {
            matched.push((*original).to_string());
        }
    }

    (score, matched)
}

fn to_probability(score: f64, max_possible_score: f64) -> u8 {
    if max_possible_score <= 0.0 {
        return 0;
    }
    let percent = (score / max_possible_score * 100.0).min(f64::from(MAX_PROBABILITY));
    percent.round() as u8
}
