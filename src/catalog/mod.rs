//! Static disease catalog and symptom weight table.
//!
//! The catalog is loaded once, validated, and never mutated afterwards. Every
//! analysis borrows from it, so a `&'static Catalog` from [`Catalog::bundled`]
//! can be shared freely across threads and tasks.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::analysis::normalize_text;
use crate::error::{Result, ScreenError};

const BUNDLED_JSON: &str = include_str!("../../data/diseases.json");

static BUNDLED: LazyLock<Catalog> = LazyLock::new(|| match Catalog::from_json(BUNDLED_JSON) {
    Ok(catalog) => catalog,
    Err(e) => panic!("bundled disease catalog is invalid: {e}"),
});

/// How serious a condition typically is.
///
/// Catalog data must use one of the first five variants; loading rejects
/// anything else. `Unknown` marks diseases synthesized from a remote AI answer
/// that named a severity we don't recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
    Chronic,
    Variable,
    #[serde(other)]
    Unknown,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
            Severity::Chronic => "chronic",
            Severity::Variable => "variable",
            Severity::Unknown => "unknown",
        }
    }

    /// Parse a free-form severity label, falling back to `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match normalize_text(label).as_str() {
            "mild" => Severity::Mild,
            "moderate" => Severity::Moderate,
            "severe" => Severity::Severe,
            "chronic" => Severity::Chronic,
            "variable" | "varies" => Severity::Variable,
            _ => Severity::Unknown,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An over-the-counter medicine suggestion attached to a disease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub usage: String,
}

/// One condition the screener knows about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disease {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Symptom phrases in display order
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub causes: Vec<String>,
    #[serde(default)]
    pub prevention: Vec<String>,
    pub severity: Severity,
    #[serde(default)]
    pub seek_help: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub medicines: Vec<Medicine>,
}

/// Normalized symptom phrase → disease id → weight.
pub type SymptomWeights = BTreeMap<String, BTreeMap<String, f64>>;

/// The validated, immutable disease catalog.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    diseases: Vec<Disease>,
    symptom_weights: SymptomWeights,
}

// Unvalidated wire form; only reachable through `Catalog::from_json`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogData {
    diseases: Vec<Disease>,
    symptom_weights: SymptomWeights,
}

impl Catalog {
    /// Build a catalog from parts, validating it.
    pub fn new(diseases: Vec<Disease>, symptom_weights: SymptomWeights) -> Result<Self> {
        let catalog = Self {
            diseases,
            symptom_weights,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a catalog from its JSON form (`{"diseases": [...], "symptomWeights": {...}}`).
    pub fn from_json(json: &str) -> Result<Self> {
        let data: CatalogData = serde_json::from_str(json)
            .map_err(|e| ScreenError::Catalog(format!("failed to parse catalog JSON: {e}")))?;
        let catalog = Self::new(data.diseases, data.symptom_weights)?;
        info!(
            diseases = catalog.diseases.len(),
            weighted_symptoms = catalog.symptom_weights.len(),
            "Disease catalog loaded"
        );
        Ok(catalog)
    }

    /// The catalog embedded in the crate, parsed and validated on first use.
    ///
    /// # Panics
    ///
    /// Panics on first access if the embedded data fails validation.
    pub fn bundled() -> &'static Catalog {
        &BUNDLED
    }

    fn validate(&self) -> Result<()> {
        let mut ids = HashSet::with_capacity(self.diseases.len());
        for disease in &self.diseases {
            if disease.id.trim().is_empty() {
                return Err(ScreenError::Catalog(format!(
                    "disease '{}' has an empty id",
                    disease.name
                )));
            }
            if disease.severity == Severity::Unknown {
                return Err(ScreenError::Catalog(format!(
                    "disease '{}' has unknown severity",
                    disease.id
                )));
            }
            if !ids.insert(disease.id.as_str()) {
                return Err(ScreenError::Catalog(format!(
                    "duplicate disease id '{}'",
                    disease.id
                )));
            }
        }

        for (symptom, weights) in &self.symptom_weights {
            if *symptom != normalize_text(symptom) {
                return Err(ScreenError::Catalog(format!(
                    "weight table key '{symptom}' is not normalized"
                )));
            }
            for (disease_id, weight) in weights {
                if !ids.contains(disease_id.as_str()) {
                    return Err(ScreenError::Catalog(format!(
                        "weight table entry '{symptom}' references unknown disease '{disease_id}'"
                    )));
                }
                if !weight.is_finite() || *weight <= 0.0 {
                    return Err(ScreenError::Catalog(format!(
                        "weight for '{symptom}' -> '{disease_id}' must be positive, got {weight}"
                    )));
                }
            }
        }

        debug!("Catalog referential integrity verified");
        Ok(())
    }

    /// Diseases in catalog order.
    pub fn diseases(&self) -> &[Disease] {
        &self.diseases
    }

    pub fn symptom_weights(&self) -> &SymptomWeights {
        &self.symptom_weights
    }

    /// Look up the curated weight of `symptom` (already normalized) for `disease_id`.
    pub fn weight(&self, symptom: &str, disease_id: &str) -> Option<f64> {
        self.symptom_weights
            .get(symptom)
            .and_then(|weights| weights.get(disease_id))
            .copied()
    }

    pub fn disease(&self, id: &str) -> Option<&Disease> {
        self.diseases.iter().find(|d| d.id == id)
    }

    /// Case-insensitive lookup by display name.
    pub fn find_by_name(&self, name: &str) -> Option<&Disease> {
        let wanted = normalize_text(name);
        self.diseases
            .iter()
            .find(|d| normalize_text(&d.name) == wanted)
    }

    /// Every symptom phrase the extractor can recognize.
    ///
    /// Weight table keys come first in key order, then each disease's symptoms
    /// in catalog order. Phrases appear once, in their catalog spelling.
    pub fn vocabulary(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.symptom_weights
            .keys()
            .map(String::as_str)
            .chain(
                self.diseases
                    .iter()
                    .flat_map(|d| d.symptoms.iter().map(String::as_str)),
            )
            .filter(|phrase| seen.insert(*phrase))
            .collect()
    }
}
