//! FalClient - handles communication with the fal.ai model endpoints.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::types::ErrorBody;

/// The environment variable name for the fal.ai API key.
pub const FAL_API_KEY_ENV: &str = "FAL_KEY";

/// Default base URL for the synchronous fal.ai API.
pub const FAL_API_BASE_URL: &str = "https://fal.run";

/// Default timeout for a single model run (5 minutes).
///
/// Synchronous runs hold the connection open until the media is ready, and
/// video jobs routinely take well over a minute.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP status code for rate limiting.
const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// HTTP status code for bad request (often content policy).
const HTTP_STATUS_BAD_REQUEST: u16 = 400;

/// HTTP status code for forbidden (content policy violation).
const HTTP_STATUS_FORBIDDEN: u16 = 403;

/// Keywords that indicate a content policy violation in error messages.
const CONTENT_POLICY_KEYWORDS: &[&str] = &[
    "content policy",
    "policy violation",
    "inappropriate",
    "not allowed",
    "prohibited",
    "blocked",
    "unsafe",
    "violates",
    "moderation",
    "nsfw",
];

/// Check if an error message indicates a content policy violation.
fn is_content_policy_error(error_text: &str) -> bool {
    let lower = error_text.to_lowercase();
    CONTENT_POLICY_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Parse the Retry-After header value to get retry delay in seconds.
///
/// Only the integer seconds format is understood; HTTP-date values yield None.
fn parse_retry_after(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
}

/// Pull the provider's message out of an error body, falling back to the raw text.
fn provider_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message())
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "Unknown error".to_string()
            } else {
                trimmed.to_string()
            }
        })
}

/// Client for communicating with the fal.ai API.
///
/// The API key is always passed in explicitly; reading it from the
/// environment is the caller's job (see `config::FalConfig::api_key`).
#[derive(Debug, Clone)]
pub struct FalClient {
    api_key: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl FalClient {
    /// Create a new FalClient with an explicit API key against the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns `FalError::MissingApiKey` if the key is empty.
    pub fn with_api_key(api_key: String) -> Result<Self, FalError> {
        Self::with_options(api_key, FAL_API_BASE_URL.to_string(), DEFAULT_TIMEOUT)
    }

    /// Create a new FalClient with a custom base URL.
    ///
    /// Useful for testing against a mock server.
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, FalError> {
        Self::with_options(api_key, base_url, DEFAULT_TIMEOUT)
    }

    /// Create a new FalClient with a custom base URL and request timeout.
    ///
    /// A trailing slash on `base_url` is dropped so model paths join cleanly.
    pub fn with_options(
        api_key: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, FalError> {
        if api_key.trim().is_empty() {
            return Err(FalError::MissingApiKey);
        }

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// Get the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the run URL for a model: `{base_url}/{model}`.
    pub fn model_url(&self, model: &str) -> String {
        format!("{}/{}", self.base_url, model.trim_start_matches('/'))
    }

    /// Run a model synchronously and decode its output.
    ///
    /// Sends a POST request to `{base_url}/{model}` with `input` as the JSON
    /// body and waits for the model to finish. The response body is decoded
    /// into `O`, so each caller picks the output shape it expects.
    ///
    /// # Arguments
    ///
    /// * `model` - The fal.ai model identifier, e.g. `fal-ai/flux/dev`
    /// * `input` - The model input object
    ///
    /// # Errors
    ///
    /// Returns `FalError::ContentPolicyViolation` if the API rejects the input for content policy,
    /// `FalError::RateLimit` if the API returns a 429 status code,
    /// `FalError::ApiError` if the API returns another error response,
    /// `FalError::InvalidResponse` if the body doesn't match `O`,
    /// or `FalError::HttpError` if the request fails.
    pub async fn run<I, O>(&self, model: &str, input: &I) -> Result<O, FalError>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let url = self.model_url(model);
        log::debug!("POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Key {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(input)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Check for rate limit (429 Too Many Requests)
            if status.as_u16() == HTTP_STATUS_TOO_MANY_REQUESTS {
                let retry_after_secs = parse_retry_after(&response);
                let error_text = response.text().await.unwrap_or_default();
                let message = if error_text.trim().is_empty() {
                    "Rate limit exceeded".to_string()
                } else {
                    provider_message(&error_text)
                };
                log::warn!(
                    "Rate limited by fal.ai API. Retry-After: {:?} seconds",
                    retry_after_secs
                );
                return Err(FalError::RateLimit {
                    message,
                    retry_after_secs,
                });
            }

            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = provider_message(&error_text);

            if (status.as_u16() == HTTP_STATUS_BAD_REQUEST
                || status.as_u16() == HTTP_STATUS_FORBIDDEN)
                && is_content_policy_error(&message)
            {
                log::warn!("Input rejected by content policy: {}", message);
                return Err(FalError::ContentPolicyViolation { message });
            }

            log::warn!("fal.ai request to {} failed with status {}", model, status);
            return Err(FalError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            log::error!("Unexpected response shape from {}: {}", model, e);
            FalError::InvalidResponse(e.to_string())
        })
    }
}

/// Errors that can occur during fal.ai operations.
#[derive(Debug, thiserror::Error)]
pub enum FalError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-2xx response. Displays the provider's own message.
    #[error("{message}")]
    ApiError {
        /// HTTP status returned by the provider
        status: u16,
        /// Message extracted from the provider's error body
        message: String,
    },

    #[error("{message}")]
    RateLimit {
        /// Human-readable rate limit message
        message: String,
        /// Retry-After header value in seconds, if provided
        retry_after_secs: Option<u64>,
    },

    #[error("{message}")]
    ContentPolicyViolation {
        /// Human-readable explanation of the policy violation
        message: String,
    },

    #[error("Invalid response from provider: {0}")]
    InvalidResponse(String),
}
