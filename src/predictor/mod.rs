//! Remote AI predictors.
//!
//! A [`RemotePredictor`] turns symptom text into a [`RemoteAnalysis`]. The
//! [`Orchestrator`](crate::Orchestrator) tries it first and falls back to the
//! rule-based pipeline whenever it errors or asks for a fallback.

#[cfg(feature = "remote")]
pub mod function;
#[cfg(feature = "remote")]
pub mod gateway;
pub mod prompt;
#[cfg(feature = "remote")]
pub(crate) mod utils;

#[cfg(feature = "remote")]
pub use function::{FunctionClient, FunctionConfig};
#[cfg(feature = "remote")]
pub use gateway::{GatewayClient, GatewayConfig};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::error::{Result, ScreenError};
use crate::schema::{Schema, SchemaBuilder, SchemaType};

/// The interface every remote AI predictor implements.
///
/// Implementations should return `Err` for transport and protocol failures.
/// A payload carrying `error` or `fallback: true` may be returned as `Ok`;
/// [`RemoteAnalysis::into_checked`] turns it into an error.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use symptom_screen::{RemoteAnalysis, RemotePredictor, Result};
///
/// struct Offline;
///
/// #[async_trait]
/// impl RemotePredictor for Offline {
///     async fn predict(&self, _symptoms: &str) -> Result<RemoteAnalysis> {
///         Ok(RemoteAnalysis {
///             fallback: true,
///             ..Default::default()
///         })
///     }
/// }
/// ```
#[async_trait]
pub trait RemotePredictor: Send + Sync {
    async fn predict(&self, symptoms: &str) -> Result<RemoteAnalysis>;
}

#[async_trait]
impl<P: RemotePredictor + ?Sized> RemotePredictor for Box<P> {
    async fn predict(&self, symptoms: &str) -> Result<RemoteAnalysis> {
        (**self).predict(symptoms).await
    }
}

#[async_trait]
impl<P: RemotePredictor + ?Sized> RemotePredictor for Arc<P> {
    async fn predict(&self, symptoms: &str) -> Result<RemoteAnalysis> {
        (**self).predict(symptoms).await
    }
}

/// One condition as named by the remote model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePrediction {
    pub disease_id: Option<String>,
    pub disease_name: Option<String>,
    #[serde(default)]
    pub probability: f64,
    #[serde(default)]
    pub matched_symptoms: Vec<String>,
    pub description: Option<String>,
    pub severity: Option<String>,
}

/// The JSON payload a remote predictor answers with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteAnalysis {
    #[serde(default)]
    pub predictions: Vec<RemotePrediction>,
    pub summary: Option<String>,
    pub recommendations: Option<Vec<String>>,
    pub severity: Option<String>,
    pub urgency: Option<String>,
    /// Set by a hosted endpoint that failed internally
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Set by a hosted endpoint that wants the caller to use local analysis
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

impl RemoteAnalysis {
    /// Reject payloads that carry an error or request a fallback.
    pub fn into_checked(self) -> Result<Self> {
        match (&self.error, self.fallback) {
            (Some(error), _) => Err(ScreenError::FallbackRequested(error.clone())),
            (None, true) => Err(ScreenError::FallbackRequested(
                "AI analysis failed".to_string(),
            )),
            (None, false) => Ok(self),
        }
    }
}

impl SchemaType for RemoteAnalysis {
    fn schema() -> Schema {
        let prediction = SchemaBuilder::object()
            .property(
                "diseaseId",
                json!({
                    "type": "string",
                    "description": "Identifier from the diseases database, e.g. \"common_cold\""
                }),
                true,
            )
            .property("diseaseName", json!({"type": "string"}), true)
            .property(
                "probability",
                json!({"type": "integer", "minimum": 0, "maximum": 100}),
                true,
            )
            .property(
                "matchedSymptoms",
                json!({"type": "array", "items": {"type": "string"}}),
                true,
            )
            .property(
                "description",
                json!({"type": "string", "description": "Brief description of the condition"}),
                true,
            )
            .build();

        SchemaBuilder::object()
            .title("RespiratoryAnalysis")
            .property(
                "predictions",
                json!({"type": "array", "items": prediction.schema}),
                true,
            )
            .property(
                "summary",
                json!({
                    "type": "string",
                    "description": "A brief 1-2 sentence summary of the analysis"
                }),
                true,
            )
            .property(
                "recommendations",
                json!({"type": "array", "items": {"type": "string"}}),
                true,
            )
            .property(
                "severity",
                json!({"type": "string", "enum": ["mild", "moderate", "severe"]}),
                true,
            )
            .property(
                "urgency",
                json!({
                    "type": "string",
                    "description": "A brief note about when to seek medical care"
                }),
                true,
            )
            .build()
    }

    fn schema_name() -> Option<String> {
        Some("RespiratoryAnalysis".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_payload() {
        let payload = r#"{
            "predictions": [
                {"diseaseId": "influenza", "diseaseName": "Influenza (Flu)", "probability": 75,
                 "matchedSymptoms": ["fever", "chills"], "description": "Viral illness"}
            ],
            "summary": "Likely flu.",
            "recommendations": ["Rest"],
            "severity": "moderate",
            "urgency": "See a doctor if breathing becomes difficult"
        }"#;
        let analysis: RemoteAnalysis = serde_json::from_str(payload).unwrap();
        assert_eq!(analysis.predictions.len(), 1);
        assert_eq!(analysis.predictions[0].disease_id.as_deref(), Some("influenza"));
        assert_eq!(analysis.predictions[0].probability, 75.0);
        assert_eq!(analysis.clone().into_checked().unwrap(), analysis);
    }

    #[test]
    fn test_error_and_fallback_payloads_rejected() {
        let failed: RemoteAnalysis =
            serde_json::from_str(r#"{"error": "AI gateway error: 500", "fallback": true}"#)
                .unwrap();
        assert_eq!(
            failed.into_checked(),
            Err(ScreenError::FallbackRequested("AI gateway error: 500".into()))
        );

        let fallback: RemoteAnalysis = serde_json::from_str(r#"{"fallback": true}"#).unwrap();
        assert!(matches!(
            fallback.into_checked(),
            Err(ScreenError::FallbackRequested(_))
        ));
    }

    #[test]
    fn test_sparse_prediction_defaults() {
        let analysis: RemoteAnalysis =
            serde_json::from_str(r#"{"predictions": [{"diseaseName": "Sinusitis"}]}"#).unwrap();
        let prediction = &analysis.predictions[0];
        assert_eq!(prediction.probability, 0.0);
        assert!(prediction.matched_symptoms.is_empty());
        assert!(analysis.summary.is_none());
    }

    #[test]
    fn test_schema_requires_core_fields() {
        let schema = RemoteAnalysis::schema();
        let json = schema.to_json();
        assert_eq!(
            json["required"],
            json!(["predictions", "summary", "recommendations", "severity", "urgency"])
        );
        assert_eq!(
            json["properties"]["predictions"]["items"]["properties"]["probability"]["maximum"],
            100
        );
    }
}
