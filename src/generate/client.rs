//! Core `RecipeGenerator` trait and `ChatCompletionsGenerator` implementation.
//!
//! `ChatCompletionsGenerator` calls any OpenAI-compatible
//! `/v1/chat/completions` endpoint: OpenAI, Groq, Ollama (OpenAI mode),
//! LM Studio, vLLM, etc.  All connection details come from
//! [`GenerationConfig`]; nothing is hardcoded.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::GenerationConfig;

// ---------------------------------------------------------------------------
// GenerationError
// ---------------------------------------------------------------------------

/// Errors that can occur while generating a recipe narrative.
///
/// The orchestrator converts every variant into a degraded narrative; none
/// of these escapes `acquire()`.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("generation request timed out")]
    Timeout,

    /// The service rejected the request's credentials.
    #[error("generation service rejected the API key")]
    Auth,

    /// The service's rate limit was exceeded.
    #[error("generation service rate limit exceeded")]
    RateLimited,

    /// The HTTP response could not be parsed as expected JSON.
    #[error("failed to parse generation response: {0}")]
    Parse(String),

    /// The service returned a response with no usable text content.
    #[error("generation service returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GenerationError::Timeout
        } else {
            GenerationError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// RecipeGenerator trait
// ---------------------------------------------------------------------------

/// Async trait for recipe-narrative generation backends.
///
/// Implementors must be `Send + Sync` so they can be shared across tasks
/// (e.g. wrapped in `Arc<dyn RecipeGenerator>`).
///
/// # Arguments
/// * `prompt` – The full generation instruction from `PromptBuilder::build`.
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

// ---------------------------------------------------------------------------
// ChatCompletionsGenerator
// ---------------------------------------------------------------------------

/// Calls an OpenAI-compatible `/v1/chat/completions` endpoint.
///
/// # No hardcoded URLs
/// All connection details (`base_url`, `api_key`, `model`) come exclusively
/// from the [`GenerationConfig`] passed to
/// [`ChatCompletionsGenerator::from_config`].
pub struct ChatCompletionsGenerator {
    client: reqwest::Client,
    config: GenerationConfig,
}

impl ChatCompletionsGenerator {
    /// Build a generator from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`.  A default (no-timeout) client is used as a
    /// last-resort fallback if the builder fails (should never happen in
    /// practice).
    pub fn from_config(config: &GenerationConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl RecipeGenerator for ChatCompletionsGenerator {
    /// Send `prompt` as a single user message and return the generated
    /// narrative text.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let body = serde_json::json!({
            "model":       self.config.model,
            "messages": [
                { "role": "user", "content": prompt }
            ],
            "stream":      false,
            "temperature": self.config.temperature,
        });

        let mut req = self.client.post(&url).json(&body);

        // Attach Authorization header only when api_key is a non-empty string.
        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(GenerationError::Auth);
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GenerationError::RateLimited);
        }
        if !status.is_success() {
            return Err(GenerationError::Request(format!(
                "generation service returned HTTP {status}"
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GenerationError::Parse(e.to_string()))?;

        let narrative = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(GenerationError::EmptyResponse)?
            .trim()
            .to_string();

        if narrative.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        Ok(narrative)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
