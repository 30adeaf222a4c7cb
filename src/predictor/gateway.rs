use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, instrument, trace, warn};

use super::prompt::{build_system_prompt, build_user_prompt};
use super::utils::{check_response_status, handle_http_error, parse_remote_analysis};
use super::{RemoteAnalysis, RemotePredictor};
use crate::catalog::Catalog;
use crate::error::{Result, ScreenError};

/// Environment variable holding the gateway API key.
pub const API_KEY_ENV: &str = "AI_GATEWAY_API_KEY";
/// Environment variable overriding the gateway base URL.
pub const BASE_URL_ENV: &str = "AI_GATEWAY_URL";

const DEFAULT_BASE_URL: &str = "https://ai.gateway.lovable.dev/v1";
const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";
const PROVIDER: &str = "AI gateway";

/// Configuration for the gateway client
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub timeout: Option<Duration>,
    /// Custom base URL for any OpenAI-compatible endpoint
    pub base_url: Option<String>,
}

/// Predictor that asks an OpenAI-compatible chat-completions gateway to
/// analyze symptoms against the catalog's knowledge base.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> symptom_screen::Result<()> {
/// use std::time::Duration;
/// use symptom_screen::{GatewayClient, RemotePredictor};
///
/// let client = GatewayClient::from_env()?
///     .timeout(Duration::from_secs(20))
///     .build();
/// let analysis = client.predict("fever, chills and body aches").await?;
/// println!("{:?}", analysis.summary);
/// # Ok(())
/// # }
/// ```
pub struct GatewayClient {
    config: GatewayConfig,
    client: reqwest::Client,
    system_prompt: String,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatCompletionChoice>,
}

impl GatewayClient {
    /// Create a new client with default configuration and the bundled catalog
    #[instrument(name = "gateway_client_new", skip(api_key))]
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ScreenError::Config(format!("{API_KEY_ENV} is not configured")));
        }

        info!("Creating new AI gateway client");
        trace!("API key length: {}", api_key.len());

        let config = GatewayConfig {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.3,
            max_tokens: Some(1000),
            timeout: None,
            base_url: None,
        };

        Ok(Self {
            config,
            client: reqwest::Client::new(),
            system_prompt: build_system_prompt(Catalog::bundled()),
        })
    }

    /// Create a client from `AI_GATEWAY_API_KEY` and, if set, `AI_GATEWAY_URL`.
    #[instrument(name = "gateway_client_from_env")]
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| ScreenError::Config(format!("{API_KEY_ENV} is not configured")))?;
        let client = Self::new(api_key)?;
        Ok(match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => client.base_url(url),
            _ => client,
        })
    }

    /// Set the model identifier sent to the gateway
    #[instrument(skip(self, model))]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        debug!(previous_model = %self.config.model, new_model = %model, "Setting gateway model");
        self.config.model = model;
        self
    }

    /// Set the temperature (0.0 to 1.0, lower = more deterministic)
    #[instrument(skip(self))]
    pub fn temperature(mut self, temp: f32) -> Self {
        debug!(
            previous_temp = self.config.temperature,
            new_temp = temp,
            "Setting temperature"
        );
        self.config.temperature = temp;
        self
    }

    /// Set the maximum tokens to generate
    #[instrument(skip(self))]
    pub fn max_tokens(mut self, max: u32) -> Self {
        debug!(previous_max = ?self.config.max_tokens, new_max = max, "Setting max_tokens");
        self.config.max_tokens = Some(max.max(1));
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

    /// Point the client at a different OpenAI-compatible endpoint
    #[instrument(skip(self, url))]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        debug!(base_url = %url, "Setting custom base URL");
        self.config.base_url = Some(url.trim_end_matches('/').to_string());
        self
    }

    /// Describe a different catalog in the system prompt
    pub fn knowledge_base(mut self, catalog: &Catalog) -> Self {
        self.system_prompt = build_system_prompt(catalog);
        self
    }

    /// Build the client (chainable after configuration)
    #[instrument(skip(self))]
    pub fn build(mut self) -> Self {
        info!(
            model = %self.config.model,
            temperature = self.config.temperature,
            max_tokens = ?self.config.max_tokens,
            timeout = ?self.config.timeout,
            "AI gateway client configuration complete"
        );

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

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        let base = self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        format!("{base}/chat/completions")
    }

    fn request_for<'a>(&'a self, symptoms: &str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: self.system_prompt.clone(),
                },
                ChatMessage {
                    role: "user",
                    content: build_user_prompt(symptoms),
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }
}

#[async_trait]
impl RemotePredictor for GatewayClient {
    #[instrument(
        name = "gateway_predict",
        skip(self, symptoms),
        fields(model = %self.config.model, symptoms_len = symptoms.len())
    )]
    async fn predict(&self, symptoms: &str) -> Result<RemoteAnalysis> {
        if symptoms.trim().is_empty() {
            return Err(ScreenError::Validation("Symptoms text is required".to_string()));
        }

        info!("Requesting AI symptom analysis");
        let request = self.request_for(symptoms);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| handle_http_error(e, PROVIDER))?;

        let response = check_response_status(response, PROVIDER).await?;

        debug!("AI gateway response received");
        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse JSON response from AI gateway");
            ScreenError::Http(e)
        })?;

        let Some(choice) = completion.choices.into_iter().next() else {
            error!("AI gateway returned empty choices array");
            return Err(ScreenError::Api("No content in AI response".to_string()));
        };
        trace!(finish_reason = ?choice.finish_reason, "Completion finish reason");

        let content = choice
            .message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| {
                error!("No content in AI gateway response");
                ScreenError::Api("No content in AI response".to_string())
            })?;

        let analysis = parse_remote_analysis(&content)?;
        info!(
            predictions = analysis.predictions.len(),
            "AI symptom analysis parsed"
        );
        Ok(analysis)
    }
}
