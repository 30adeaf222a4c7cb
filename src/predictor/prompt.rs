//! Prompt construction for chat-completion predictors.

use std::fmt::Write;

use super::RemoteAnalysis;
use crate::catalog::Catalog;
use crate::schema::SchemaType;

const ROLE: &str = "You are a medical AI assistant specialized in respiratory disease screening. You analyze symptoms and provide probability-based predictions for common respiratory conditions.";

const RULES: [&str; 6] = [
    "Return EXACTLY 3 diseases ranked by probability (0-100%)",
    "Total probabilities don't need to sum to 100%",
    "Be conservative - don't over-diagnose",
    "Always recommend consulting a healthcare professional",
    "Include matched symptoms for each prediction",
    "Use the diseaseId from the database when a prediction matches a listed disease",
];

/// System prompt: the assistant role, a knowledge base rendered from the
/// catalog, and the answering rules.
pub fn build_system_prompt(catalog: &Catalog) -> String {
    let mut prompt = String::with_capacity(4096);
    prompt.push_str(ROLE);
    prompt.push_str("\n\nDISEASES DATABASE:\n");

    for (i, disease) in catalog.diseases().iter().enumerate() {
        // writing into a String cannot fail
        let _ = writeln!(
            prompt,
            "{}. {} (diseaseId: {}) - {}\n   Key symptoms: {}\n   Severity: {}\n",
            i + 1,
            disease.name,
            disease.id,
            disease.description,
            disease.symptoms.join(", "),
            disease.severity,
        );
    }

    prompt.push_str("RULES:\n");
    for rule in RULES {
        let _ = writeln!(prompt, "- {rule}");
    }
    prompt
}

/// User prompt asking for a JSON answer shaped like [`RemoteAnalysis`].
pub fn build_user_prompt(symptoms: &str) -> String {
    format!(
        "Analyze these symptoms and return a JSON response with disease predictions.\n\n\
         Patient symptoms: \"{}\"\n\n\
         Respond with ONLY valid JSON matching this JSON Schema:\n{}",
        symptoms.trim(),
        RemoteAnalysis::schema().to_pretty_string()
    )
}
