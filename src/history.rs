//! The record a history store keeps for each screening.
//!
//! Storage itself lives outside this crate; this is only the row shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::orchestrator::{AnalysisSource, ScreeningResult, SymptomInput};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPrediction {
    pub disease_id: String,
    pub disease_name: String,
    pub probability: u8,
    pub matched_symptoms: Vec<String>,
}

/// One persisted analysis, keyed by the store's user identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// The text as the user typed it
    pub symptoms: String,
    pub has_audio: bool,
    pub analysis_method: AnalysisSource,
    pub predictions: Vec<HistoryPrediction>,
    pub urgency: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl HistoryRecord {
    pub fn from_screening(
        input: &SymptomInput,
        result: &ScreeningResult<'_>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            symptoms: input.text.clone(),
            has_audio: input.has_audio,
            analysis_method: result.source,
            predictions: result
                .analysis
                .predictions
                .iter()
                .map(|p| HistoryPrediction {
                    disease_id: p.disease.id.clone(),
                    disease_name: p.disease.name.clone(),
                    probability: p.probability,
                    matched_symptoms: p.matched_symptoms.clone(),
                })
                .collect(),
            urgency: result.urgency.clone(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::orchestrator::Orchestrator;
    use chrono::TimeZone;

    #[test]
    fn test_record_from_rule_based_result() {
        let input = SymptomInput::with_audio("sneezing and runny nose");
        let orchestrator = Orchestrator::local_only(Catalog::bundled());
        let result = orchestrator.analyze_locally(input.analysis_text());
        let created_at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();

        let record = HistoryRecord::from_screening(&input, &result, created_at);
        assert_eq!(record.analysis_method, AnalysisSource::RuleBased);
        assert!(record.has_audio);
        assert_eq!(record.predictions.len(), result.analysis.predictions.len());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["analysis_method"], "rule_based");
        assert_eq!(json["created_at"], "2026-03-01T09:30:00Z");
        assert_eq!(json["predictions"][0]["disease_id"], record.predictions[0].disease_id);

        let back: HistoryRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
