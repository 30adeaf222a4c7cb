use reqwest::{Response, StatusCode};
use tracing::{error, warn};

use super::RemoteAnalysis;
use crate::error::{Result, ScreenError};

/// Strip a markdown code fence (```json ... ``` or ``` ... ```) around JSON.
///
/// Models often wrap their answer in a fence, sometimes with prose before it.
/// Content without a complete fence is returned trimmed.
pub fn extract_json_from_markdown(content: &str) -> &str {
    let trimmed = content.trim();

    if let Some(start_idx) = trimmed.find("```") {
        let after_start = &trimmed[start_idx + 3..];
        let after_start = after_start.strip_prefix("json").unwrap_or(after_start);
        if let Some(end_idx) = after_start.find("```") {
            return after_start[..end_idx].trim();
        }
    }

    trimmed
}

/// Parse model output into a [`RemoteAnalysis`].
pub fn parse_remote_analysis(content: &str) -> Result<RemoteAnalysis> {
    let json = extract_json_from_markdown(content);
    serde_json::from_str(json).map_err(|e| {
        error!(error = %e, content_len = content.len(), "Failed to parse AI response");
        ScreenError::Validation(format!("Failed to parse AI analysis: {e}"))
    })
}

/// Convert a reqwest error, handling timeouts specially.
pub fn handle_http_error(e: reqwest::Error, provider_name: &str) -> ScreenError {
    error!(error = %e, "HTTP request to {} failed", provider_name);
    if e.is_timeout() {
        ScreenError::Timeout
    } else {
        ScreenError::Http(e)
    }
}

/// Check HTTP response status and map unsuccessful ones to errors.
pub async fn check_response_status(response: Response, provider_name: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            warn!(status = %status, "{} rate limit exceeded", provider_name);
            Err(ScreenError::RateLimited)
        }
        StatusCode::PAYMENT_REQUIRED => {
            warn!(status = %status, "{} usage quota exhausted", provider_name);
            Err(ScreenError::QuotaExceeded)
        }
        _ => {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                status = %status,
                error = %error_text,
                "{} API returned error response", provider_name
            );
            Err(ScreenError::Api(format!(
                "{provider_name} API error ({status}): {error_text}"
            )))
        }
    }
}
