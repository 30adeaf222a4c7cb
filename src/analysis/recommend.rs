use super::scoring::PredictionResult;
use crate::catalog::Severity;

/// Returned as-is when no condition was detected.
pub const NO_DETECTION_RECOMMENDATIONS: [&str; 3] = [
    "No specific respiratory condition detected based on your symptoms.",
    "If symptoms persist, please consult a healthcare professional.",
    "Stay hydrated and get adequate rest.",
];

pub const SEVERE_ADVISORY: &str =
    "⚠️ Based on your symptoms, we recommend seeking medical attention promptly.";

pub const MODERATE_ADVISORY: &str =
    "Consider consulting a healthcare provider if symptoms persist or worsen.";

pub const GENERAL_ADVICE: [&str; 2] = [
    "Stay hydrated and get plenty of rest.",
    "Monitor your symptoms and note any changes.",
];

pub const NO_DETECTION_SUMMARY: &str = "Based on your input, we couldn't identify specific respiratory symptoms. Please provide more details about your condition.";

pub const MAX_RECOMMENDATIONS: usize = 6;

const PREVENTION_TIPS: usize = 3;
const STRONG_THRESHOLD: u8 = 70;
const HEDGED_THRESHOLD: u8 = 40;

/// Turn ranked predictions into up to six pieces of guidance.
///
/// Only the top prediction drives the output: a severity advisory for severe
/// or moderate conditions, its first three prevention tips, then general
/// advice. Duplicates are dropped keeping the first occurrence.
pub fn generate_recommendations(predictions: &[PredictionResult<'_>]) -> Vec<String> {
    let Some(top) = predictions.first() else {
        return NO_DETECTION_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect();
    };

    let advisory = match top.disease.severity {
        Severity::Severe => Some(SEVERE_ADVISORY),
        Severity::Moderate => Some(MODERATE_ADVISORY),
        _ => None,
    };

    let candidates = advisory
        .into_iter()
        .chain(top.disease.prevention.iter().take(PREVENTION_TIPS).map(String::as_str))
        .chain(GENERAL_ADVICE);

    let mut recommendations: Vec<String> = Vec::with_capacity(MAX_RECOMMENDATIONS);
    for candidate in candidates {
        if !recommendations.iter().any(|r| r == candidate) {
            recommendations.push(candidate.to_string());
        }
    }
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

/// One-paragraph narrative for the top prediction.
pub fn compose_summary(predictions: &[PredictionResult<'_>]) -> String {
    let Some(top) = predictions.first() else {
        return NO_DETECTION_SUMMARY.to_string();
    };
    let disease = &top.disease;

    if top.probability > STRONG_THRESHOLD {
        format!(
            "Your symptoms strongly suggest {}. {}",
            disease.name, disease.description
        )
    } else if top.probability > HEDGED_THRESHOLD {
        format!(
            "Your symptoms may indicate {}, though other conditions are also possible. {}",
            disease.name, disease.description
        )
    } else {
        format!(
            "Based on your symptoms, you may have a mild respiratory condition. The most likely is {}.",
            disease.name
        )
    }
}
