//! Remote-first analysis with a deterministic local fallback.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
#[cfg(feature = "remote")]
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::analysis::{
    AnalysisResult, MAX_PREDICTIONS, MAX_RECOMMENDATIONS, PredictionResult, analyze_symptoms,
};
use crate::catalog::{Catalog, Disease, Severity};
use crate::error::{Result, ScreenError};
use crate::predictor::{RemoteAnalysis, RemotePrediction, RemotePredictor};

/// Text analyzed when audio was supplied without any typed symptoms.
pub const AUDIO_PLACEHOLDER_TEXT: &str = "cough breathing difficulty respiratory symptoms";

const DEFAULT_AI_SUMMARY: &str = "Analysis complete.";

/// What the user submitted. Audio itself never reaches the analysis; only
/// the fact that it was attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymptomInput {
    pub text: String,
    pub has_audio: bool,
}

impl SymptomInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            has_audio: false,
        }
    }

    pub fn with_audio(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            has_audio: true,
        }
    }

    /// Nothing typed and no audio attached.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && !self.has_audio
    }

    /// The text the analysis runs on.
    pub fn analysis_text(&self) -> &str {
        if self.has_audio && self.text.trim().is_empty() {
            AUDIO_PLACEHOLDER_TEXT
        } else {
            &self.text
        }
    }
}

/// Which path produced a [`ScreeningResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    Ai,
    RuleBased,
}

impl AnalysisSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisSource::Ai => "ai",
            AnalysisSource::RuleBased => "rule_based",
        }
    }
}

/// The unified outcome of one screening, whichever path produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningResult<'c> {
    pub source: AnalysisSource,
    #[serde(flatten)]
    pub analysis: AnalysisResult<'c>,
    /// Only set by the AI path
    pub urgency: Option<String>,
    /// Only set by the AI path
    pub severity: Option<String>,
}

impl ScreeningResult<'_> {
    pub fn is_ai_powered(&self) -> bool {
        self.source == AnalysisSource::Ai
    }
}

/// Runs a remote predictor when one is configured and falls back to the
/// rule-based pipeline on any failure.
///
/// # Examples
///
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> symptom_screen::Result<()> {
/// use symptom_screen::{AnalysisSource, Catalog, Orchestrator, SymptomInput};
///
/// let orchestrator = Orchestrator::local_only(Catalog::bundled());
/// let result = orchestrator
///     .analyze(&SymptomInput::text("wheezing and chest tightness"))
///     .await?;
/// assert_eq!(result.source, AnalysisSource::RuleBased);
/// assert_eq!(result.analysis.predictions[0].disease.id, "asthma");
/// # Ok(())
/// # }
/// ```
pub struct Orchestrator<'c, P = Box<dyn RemotePredictor>> {
    catalog: &'c Catalog,
    predictor: Option<P>,
    #[cfg(feature = "remote")]
    deadline: Option<Duration>,
}

impl<'c> Orchestrator<'c> {
    /// An orchestrator that never calls out.
    pub fn local_only(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            predictor: None,
            #[cfg(feature = "remote")]
            deadline: None,
        }
    }
}

impl<'c, P: RemotePredictor> Orchestrator<'c, P> {
    pub fn new(catalog: &'c Catalog, predictor: P) -> Self {
        Self {
            catalog,
            predictor: Some(predictor),
            #[cfg(feature = "remote")]
            deadline: None,
        }
    }

    /// Give up on the remote predictor after `deadline` and fall back.
    #[cfg(feature = "remote")]
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Screen one submission.
    ///
    /// Fails only when nothing was submitted. Remote errors, error payloads
    /// and fallback requests all produce a rule-based result instead.
    #[instrument(name = "orchestrator_analyze", skip_all, fields(has_audio = input.has_audio))]
    pub async fn analyze(&self, input: &SymptomInput) -> Result<ScreeningResult<'c>> {
        if input.is_empty() {
            return Err(ScreenError::Validation(
                "Enter your symptoms or upload an audio file.".to_string(),
            ));
        }
        let text = input.analysis_text();

        let Some(predictor) = &self.predictor else {
            return Ok(self.analyze_locally(text));
        };

        match self
            .call_predictor(predictor, text)
            .await
            .and_then(RemoteAnalysis::into_checked)
        {
            Ok(remote) => {
                info!(predictions = remote.predictions.len(), "Using AI analysis");
                Ok(self.remote_result(remote))
            }
            Err(e) => {
                warn!(error = %e, "AI analysis failed, falling back to rule-based analysis");
                Ok(self.analyze_locally(text))
            }
        }
    }

    async fn call_predictor(&self, predictor: &P, text: &str) -> Result<RemoteAnalysis> {
        #[cfg(feature = "remote")]
        if let Some(deadline) = self.deadline {
            return tokio::time::timeout(deadline, predictor.predict(text))
                .await
                .map_err(|_| ScreenError::Timeout)?;
        }
        predictor.predict(text).await
    }

    /// Run only the rule-based pipeline.
    pub fn analyze_locally(&self, text: &str) -> ScreeningResult<'c> {
        ScreeningResult {
            source: AnalysisSource::RuleBased,
            analysis: analyze_symptoms(self.catalog, text),
            urgency: None,
            severity: None,
        }
    }

    fn remote_result(&self, remote: RemoteAnalysis) -> ScreeningResult<'c> {
        let mut predictions: Vec<PredictionResult<'c>> = remote
            .predictions
            .into_iter()
            .map(|p| self.map_prediction(p))
            .collect();
        predictions.sort_by(|a, b| b.probability.cmp(&a.probability));
        predictions.truncate(MAX_PREDICTIONS);

        let mut recommendations: Vec<String> = Vec::new();
        for rec in remote.recommendations.unwrap_or_default() {
            if !recommendations.contains(&rec) {
                recommendations.push(rec);
            }
        }
        recommendations.truncate(MAX_RECOMMENDATIONS);

        ScreeningResult {
            source: AnalysisSource::Ai,
            analysis: AnalysisResult {
                predictions,
                summary: remote
                    .summary
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_AI_SUMMARY.to_string()),
                recommendations,
            },
            urgency: remote.urgency,
            severity: remote.severity,
        }
    }

    /// Attach the catalog's disease record when the model named one we know.
    fn map_prediction(&self, prediction: RemotePrediction) -> PredictionResult<'c> {
        let wanted_name = prediction.disease_name.as_deref().map(str::to_lowercase);
        let local = self.catalog.diseases().iter().find(|d| {
            prediction.disease_id.as_deref() == Some(d.id.as_str())
                || wanted_name.as_deref() == Some(d.name.to_lowercase().as_str())
        });

        let probability = clamp_probability(prediction.probability);
        let disease = match local {
            Some(disease) => Cow::Borrowed(disease),
            None => Cow::Owned(synthesize_disease(&prediction)),
        };

        PredictionResult {
            disease,
            probability,
            matched_symptoms: prediction.matched_symptoms,
        }
    }
}

fn clamp_probability(raw: f64) -> u8 {
    if raw.is_finite() {
        raw.clamp(0.0, 100.0).round() as u8
    } else {
        0
    }
}

fn synthesize_disease(prediction: &RemotePrediction) -> Disease {
    let id = prediction
        .disease_id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .or_else(|| {
            prediction
                .disease_name
                .as_deref()
                .map(|name| name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("_"))
                .filter(|id| !id.is_empty())
        })
        .unwrap_or_else(|| "unknown".to_string());

    Disease {
        id,
        name: prediction
            .disease_name
            .clone()
            .unwrap_or_else(|| "Unknown Condition".to_string()),
        description: prediction.description.clone().unwrap_or_default(),
        symptoms: prediction.matched_symptoms.clone(),
        causes: Vec::new(),
        prevention: Vec::new(),
        severity: prediction
            .severity
            .as_deref()
            .map(Severity::from_label)
            .unwrap_or(Severity::Unknown),
        seek_help: String::new(),
        medicines: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_placeholder() {
        assert_eq!(SymptomInput::with_audio("  ").analysis_text(), AUDIO_PLACEHOLDER_TEXT);
        assert_eq!(SymptomInput::with_audio("wheezing").analysis_text(), "wheezing");
        assert_eq!(SymptomInput::text("").analysis_text(), "");
        assert!(SymptomInput::text(" ").is_empty());
        assert!(!SymptomInput::with_audio("").is_empty());
    }

    #[test]
    fn test_clamp_probability() {
        assert_eq!(clamp_probability(74.6), 75);
        assert_eq!(clamp_probability(-3.0), 0);
        assert_eq!(clamp_probability(250.0), 100);
        assert_eq!(clamp_probability(f64::NAN), 0);
    }

    #[test]
    fn test_synthesized_disease_ids() {
        let named = RemotePrediction {
            disease_name: Some("Whooping  Cough".into()),
            severity: Some("Severe".into()),
            ..Default::default()
        };
        let disease = synthesize_disease(&named);
        assert_eq!(disease.id, "whooping_cough");
        assert_eq!(disease.severity, Severity::Severe);

        let anonymous = synthesize_disease(&RemotePrediction::default());
        assert_eq!(anonymous.id, "unknown");
        assert_eq!(anonymous.name, "Unknown Condition");
        assert_eq!(anonymous.severity, Severity::Unknown);
    }

    #[test]
    fn test_remote_mapping_prefers_catalog_records() {
        let orchestrator = Orchestrator::local_only(Catalog::bundled());
        let remote = RemoteAnalysis {
            predictions: vec![
                RemotePrediction {
                    disease_name: Some("whooping cough".into()),
                    probability: 20.0,
                    ..Default::default()
                },
                RemotePrediction {
                    disease_name: Some("common cold".into()),
                    probability: 62.4,
                    matched_symptoms: vec!["sneezing".into()],
                    ..Default::default()
                },
            ],
            recommendations: Some(vec!["Rest".into(), "Rest".into(), "Fluids".into()]),
            urgency: Some("Not urgent".into()),
            ..Default::default()
        };

        let result = orchestrator.remote_result(remote);
        assert!(result.is_ai_powered());
        assert_eq!(result.analysis.summary, "Analysis complete.");
        assert_eq!(result.analysis.recommendations, vec!["Rest", "Fluids"]);
        assert_eq!(result.urgency.as_deref(), Some("Not urgent"));

        let top = &result.analysis.predictions[0];
        assert_eq!(top.probability, 62);
        assert!(matches!(top.disease, Cow::Borrowed(_)));
        assert_eq!(top.disease.id, "common_cold");
        assert!(matches!(result.analysis.predictions[1].disease, Cow::Owned(_)));
    }

    #[test]
    fn test_remote_result_is_capped() {
        let orchestrator = Orchestrator::local_only(Catalog::bundled());
        let remote = RemoteAnalysis {
            predictions: (1..=7)
                .map(|i| RemotePrediction {
                    disease_name: Some(format!("condition {i}")),
                    probability: f64::from(i * 10),
                    ..Default::default()
                })
                .collect(),
            recommendations: Some((1..=8).map(|i| format!("advice {i}")).collect()),
            ..Default::default()
        };

        let result = orchestrator.remote_result(remote);
        let probabilities: Vec<u8> = result
            .analysis
            .predictions
            .iter()
            .map(|p| p.probability)
            .collect();
        assert_eq!(probabilities, vec![70, 60, 50, 40, 30]);
        assert_eq!(result.analysis.predictions[0].disease.id, "condition_7");
        assert_eq!(
            result.analysis.recommendations,
            (1..=6).map(|i| format!("advice {i}")).collect::<Vec<_>>()
        );
    }
}
