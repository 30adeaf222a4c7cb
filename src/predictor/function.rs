use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info, instrument, trace, warn};

use super::utils::{check_response_status, handle_http_error};
use super::{RemoteAnalysis, RemotePredictor};
use crate::error::{Result, ScreenError};

/// Environment variable holding the hosted analyze endpoint URL.
pub const URL_ENV: &str = "ANALYZE_FUNCTION_URL";
/// Environment variable holding the bearer key for that endpoint.
pub const KEY_ENV: &str = "ANALYZE_FUNCTION_KEY";

const PROVIDER: &str = "Analyze function";

/// Configuration for the hosted analyze-function client
#[derive(Debug, Clone)]
pub struct FunctionConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub timeout: Option<Duration>,
}

/// Predictor backed by a hosted `analyze-symptoms` endpoint.
///
/// The endpoint does the model call itself and answers with a
/// [`RemoteAnalysis`] payload, or with `{"error": ..., "fallback": true}` when
/// it failed. Such payloads are returned as-is; the orchestrator decides.
pub struct FunctionClient {
    config: FunctionConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    symptoms: &'a str,
}

impl FunctionClient {
    #[instrument(name = "function_client_new", skip(url))]
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ScreenError::Config(format!(
                "analyze function URL must be http(s), got '{url}'"
            )));
        }

        info!(url = %url, "Creating analyze function client");
        Ok(Self {
            config: FunctionConfig {
                url,
                api_key: None,
                timeout: None,
            },
            client: reqwest::Client::new(),
        })
    }

    /// Create a client from `ANALYZE_FUNCTION_URL` and optional `ANALYZE_FUNCTION_KEY`.
    #[instrument(name = "function_client_from_env")]
    pub fn from_env() -> Result<Self> {
        let url = std::env::var(URL_ENV)
            .map_err(|_| ScreenError::Config(format!("{URL_ENV} is not configured")))?;
        let client = Self::new(url)?;
        Ok(match std::env::var(KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => client.api_key(key),
            _ => client,
        })
    }

    /// Bearer key sent with every request
    #[instrument(skip_all)]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        trace!("API key length: {}", key.len());
        self.config.api_key = Some(key);
        self
    }

    /// Set the timeout for each HTTP request. Applied by [`build`](Self::build).
    #[instrument(skip(self))]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        debug!(
            previous_timeout = ?self.config.timeout,
            new_timeout = ?timeout,
            "Setting timeout"
        );
        self.config.timeout = Some(timeout);
        self
    }

    /// Build the client (chainable after configuration)
    #[instrument(skip(self))]
    pub fn build(mut self) -> Self {
        let mut client_builder = reqwest::Client::builder();
        if let Some(timeout) = self.config.timeout {
            client_builder = client_builder.timeout(timeout);
        }
        self.client = client_builder.build().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to build reqwest client with timeout, using default");
            reqwest::Client::new()
        });
        self
    }

    pub fn config(&self) -> &FunctionConfig {
        &self.config
    }
}

#[async_trait]
impl RemotePredictor for FunctionClient {
    #[instrument(
        name = "function_predict",
        skip(self, symptoms),
        fields(url = %self.config.url, symptoms_len = symptoms.len())
    )]
    async fn predict(&self, symptoms: &str) -> Result<RemoteAnalysis> {
        if symptoms.trim().is_empty() {
            return Err(ScreenError::Validation("Symptoms text is required".to_string()));
        }

        let mut request = self
            .client
            .post(&self.config.url)
            .json(&AnalyzeRequest { symptoms });
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| handle_http_error(e, PROVIDER))?;
        let response = check_response_status(response, PROVIDER).await?;

        let analysis: RemoteAnalysis = response.json().await.map_err(|e| {
            error!(error = %e, "Analyze function returned malformed JSON");
            ScreenError::Http(e)
        })?;

        debug!(
            predictions = analysis.predictions.len(),
            error = ?analysis.error,
            fallback = analysis.fallback,
            "Analyze function responded"
        );
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_url() {
        assert!(matches!(
            FunctionClient::new("ftp://example.com/analyze"),
            Err(ScreenError::Config(_))
        ));
    }

    #[test]
    fn test_builder() {
        let url = "https://example.supabase.co/functions/v1/analyze-symptoms";
        let client = FunctionClient::new(url)
            .unwrap()
            .api_key("anon-key")
            .timeout(Duration::from_secs(10))
            .build();
        assert_eq!(client.config().api_key.as_deref(), Some("anon-key"));
        assert_eq!(client.config().timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_request_body() {
        let body = serde_json::to_value(AnalyzeRequest { symptoms: "sneezing" }).unwrap();
        assert_eq!(body, serde_json::json!({"symptoms": "sneezing"}));
    }

    #[tokio::test]
    async fn test_blank_symptoms_rejected_before_request() {
        let client = FunctionClient::new("http://127.0.0.1:9/analyze").unwrap();
        assert!(matches!(
            client.predict("").await,
            Err(ScreenError::Validation(_))
        ));
    }
}
