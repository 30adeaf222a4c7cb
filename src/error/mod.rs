use thiserror::Error;

/// Error types for the symptom-screen library.
///
/// The rule-based pipeline itself never fails: empty or unrecognized input
/// degrades to empty predictions. Errors come from loading catalog data and
/// from talking to a remote AI predictor, where every variant is treated by
/// the [`Orchestrator`](crate::Orchestrator) as a reason to fall back.
///
/// # Examples
///
/// ```
/// use symptom_screen::{Catalog, ScreenError};
///
/// let broken = r#"{"diseases": [], "symptomWeights": {"cough": {"asthma": 0.5}}}"#;
/// match Catalog::from_json(broken) {
///     Err(ScreenError::Catalog(msg)) => assert!(msg.contains("asthma")),
///     other => panic!("expected a catalog error, got {:?}", other.map(|_| ())),
/// }
/// ```
#[derive(Error, Debug)]
pub enum ScreenError {
    /// Catalog data is malformed or violates referential integrity
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Error interacting with the remote AI predictor
    #[error("API error: {0}")]
    Api(String),

    /// The remote predictor answered but asked the caller to fall back
    #[error("Remote predictor requested fallback: {0}")]
    FallbackRequested(String),

    /// The remote provider is rate limiting requests (HTTP 429)
    #[error("Rate limit exceeded. Please try again in a moment.")]
    RateLimited,

    /// The remote provider's usage quota is exhausted (HTTP 402)
    #[error("AI service limit reached. Please try again later.")]
    QuotaExceeded,

    /// Input or remote output did not have the expected shape
    #[error("Validation error: {0}")]
    Validation(String),

    /// Required configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operation timed out
    #[error("Timeout error")]
    Timeout,

    /// HTTP client error (from reqwest)
    #[cfg(feature = "remote")]
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error (from serde_json)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// Http and Json wrap foreign errors without PartialEq, so they never compare equal
impl PartialEq for ScreenError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Catalog(a), Self::Catalog(b)) => a == b,
            (Self::Api(a), Self::Api(b)) => a == b,
            (Self::FallbackRequested(a), Self::FallbackRequested(b)) => a == b,
            (Self::RateLimited, Self::RateLimited) => true,
            (Self::QuotaExceeded, Self::QuotaExceeded) => true,
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::Config(a), Self::Config(b)) => a == b,
            (Self::Timeout, Self::Timeout) => true,
            _ => false,
        }
    }
}

/// A specialized Result type for symptom-screen operations.
pub type Result<T> = std::result::Result<T, ScreenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ScreenError::Catalog("duplicate disease id 'asthma'".into()).to_string(),
            "Catalog error: duplicate disease id 'asthma'"
        );
        assert_eq!(
            ScreenError::RateLimited.to_string(),
            "Rate limit exceeded. Please try again in a moment."
        );
        assert_eq!(ScreenError::Timeout.to_string(), "Timeout error");
    }

    #[test]
    fn test_foreign_errors_never_equal() {
        let a: ScreenError = serde_json::from_str::<u8>("x").unwrap_err().into();
        let b: ScreenError = serde_json::from_str::<u8>("x").unwrap_err().into();
        assert_ne!(a, b);
        assert_eq!(ScreenError::QuotaExceeded, ScreenError::QuotaExceeded);
    }
}
