//! symptom-screen: respiratory symptom screening
//!
//! # Overview
//!
//! Free-text symptoms go in; ranked disease predictions, a summary and
//! recommendations come out. The heart of the crate is a deterministic
//! rule-based engine that scores a static disease catalog:
//!
//! - [`extract_symptoms`] finds catalog symptom phrases in the text
//! - [`calculate_probabilities`] scores each disease with curated weights
//! - [`generate_recommendations`] and [`compose_summary`] turn the ranking into guidance
//!
//! An [`Orchestrator`] can put a [`RemotePredictor`] (for example a
//! [`GatewayClient`] talking to an LLM) in front of the engine. Whenever the
//! remote call fails, the rule-based result is returned instead and marked
//! as such.
//!
//! # Quick Start
//!
//! ```
//! use symptom_screen::{Catalog, analyze_symptoms};
//!
//! let result = analyze_symptoms(
//!     Catalog::bundled(),
//!     "I have a persistent cough with phlegm and mild fever",
//! );
//!
//! let top = &result.predictions[0];
//! println!("{} ({}%)", top.disease.name, top.probability);
//! println!("{}", result.summary);
//! for rec in &result.recommendations {
//!     println!("- {rec}");
//! }
//! ```
pub mod analysis;
pub mod catalog;
mod error;
pub mod history;
#[cfg(feature = "logging")]
pub mod logging;
pub mod orchestrator;
pub mod predictor;
pub mod schema;

// Re-exports for convenience
pub use analysis::{
    AnalysisResult, ExtractedSymptoms, PredictionResult, analyze_symptoms,
    calculate_probabilities, compose_summary, extract_symptoms, generate_recommendations,
};
pub use catalog::{Catalog, Disease, Medicine, Severity, SymptomWeights};
pub use error::{Result, ScreenError};
pub use history::{HistoryPrediction, HistoryRecord};
pub use orchestrator::{AnalysisSource, Orchestrator, ScreeningResult, SymptomInput};
pub use predictor::{RemoteAnalysis, RemotePrediction, RemotePredictor};
pub use schema::{Schema, SchemaBuilder, SchemaType};

#[cfg(feature = "remote")]
pub use predictor::{FunctionClient, GatewayClient};
