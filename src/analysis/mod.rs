//! The rule-based screening pipeline.
//!
//! `text → extract_symptoms → calculate_probabilities → generate_recommendations
//! + compose_summary`. Every step is a pure function of its arguments and the
//! immutable [`Catalog`], so the pipeline can be called from sync or async code,
//! concurrently, and always returns the same result for the same input.

mod extract;
mod recommend;
mod scoring;

pub use extract::{ExtractedSymptoms, extract_symptoms};
pub use recommend::{
    GENERAL_ADVICE, MAX_RECOMMENDATIONS, MODERATE_ADVISORY, NO_DETECTION_RECOMMENDATIONS,
    NO_DETECTION_SUMMARY, SEVERE_ADVISORY, compose_summary, generate_recommendations,
};
pub use scoring::{
    FALLBACK_MATCH_SCORE, MAX_PREDICTIONS, MAX_PROBABILITY, PredictionResult,
    calculate_probabilities,
};

use serde::Serialize;
use tracing::{info, instrument};

use crate::catalog::Catalog;

/// Lowercase and trim, the only normalization symptom matching applies.
pub fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Output of one screening: ranked predictions plus guidance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult<'c> {
    /// Descending by probability, at most five
    pub predictions: Vec<PredictionResult<'c>>,
    pub summary: String,
    /// At most six, no duplicates
    pub recommendations: Vec<String>,
}

impl AnalysisResult<'_> {
    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }
}

/// Run the full rule-based pipeline on one input text.
///
/// # Examples
///
/// ```
/// use symptom_screen::{Catalog, analyze_symptoms};
///
/// let result = analyze_symptoms(Catalog::bundled(), "runny nose, sneezing and itchy eyes");
/// assert_eq!(result.predictions[0].disease.id, "allergic_rhinitis");
/// assert!(result.recommendations.len() <= 6);
/// ```
#[instrument(name = "analyze_symptoms", skip_all, fields(input_len = input.len()))]
pub fn analyze_symptoms<'c>(catalog: &'c Catalog, input: &str) -> AnalysisResult<'c> {
    let symptoms = extract_symptoms(catalog, input);
    let predictions = calculate_probabilities(catalog, &symptoms);
    let recommendations = generate_recommendations(&predictions);
    let summary = compose_summary(&predictions);

    info!(
        symptoms = symptoms.len(),
        predictions = predictions.len(),
        top = predictions.first().map(|p| p.disease.id.as_str()),
        "Rule-based analysis complete"
    );

    AnalysisResult {
        predictions,
        summary,
        recommendations,
    }
}
