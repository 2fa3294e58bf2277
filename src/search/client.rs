//! Core `RecipeSearch` trait and `SpoonacularClient` implementation.
//!
//! `SpoonacularClient` calls a Spoonacular-compatible
//! `/recipes/complexSearch` endpoint with the `diet=vegan` filter and a
//! bounded result count.  All connection details come from [`SearchConfig`].

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::config::SearchConfig;
use crate::search::recipe::RelatedRecipe;

// ---------------------------------------------------------------------------
// SearchError
// ---------------------------------------------------------------------------

/// Errors that can occur while searching for related recipes.
///
/// The orchestrator converts every variant into an empty related list; none
/// of these escapes `acquire()`.
#[derive(Debug, Error)]
pub enum SearchError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("search request timed out")]
    Timeout,

    /// The service rejected the request's credentials.
    #[error("search service rejected the API key")]
    Auth,

    /// The HTTP response could not be parsed as expected JSON.
    #[error("failed to parse search response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SearchError::Timeout
        } else {
            SearchError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// RecipeSearch trait
// ---------------------------------------------------------------------------

/// Async trait for related-recipe search backends.
///
/// Implementors must be `Send + Sync` so they can be shared across tasks
/// (e.g. wrapped in `Arc<dyn RecipeSearch>`).
///
/// # Arguments
/// * `query` – The user's original free-text query.
/// * `limit` – Maximum number of results to request.
///
/// # Contract
/// Results are vegan-compatible, ordered as returned by the service, and at
/// most `limit` long.  An empty `Vec` is a valid, non-error outcome.
#[async_trait]
pub trait RecipeSearch: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<RelatedRecipe>, SearchError>;
}

// ---------------------------------------------------------------------------
// SpoonacularClient
// ---------------------------------------------------------------------------

/// Response envelope for `complexSearch`.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RelatedRecipe>,
}

/// Calls a Spoonacular-compatible `/recipes/complexSearch` endpoint.
pub struct SpoonacularClient {
    client: reqwest::Client,
    config: SearchConfig,
}

impl SpoonacularClient {
    /// Build a search client from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`.
    pub fn from_config(config: &SearchConfig) -> Self {
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
impl RecipeSearch for SpoonacularClient {
    /// Search vegan recipes matching `query`, capped at `limit` results.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<RelatedRecipe>, SearchError> {
        let url = format!(
            "{}/recipes/complexSearch",
            self.config.base_url.trim_end_matches('/')
        );

        let number = limit.to_string();
        let mut params: Vec<(&str, &str)> = vec![
            ("query", query),
            ("diet", "vegan"),
            ("number", &number),
        ];

        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            params.push(("apiKey", key));
        }

        let response = self.client.get(&url).query(&params).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::PAYMENT_REQUIRED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(SearchError::Auth);
        }
        if !status.is_success() {
            return Err(SearchError::Request(format!(
                "search service returned HTTP {status}"
            )));
        }

        let envelope: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;

        let mut results = envelope.results;
        results.truncate(limit);
        Ok(results)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;

    fn make_config() -> SearchConfig {
        SearchConfig {
            base_url: "https://api.spoonacular.com".into(),
            api_key: Some("test-key".into()),
            max_results: 3,
            timeout_secs: 5,
        }
    }

    #[test]
    fn from_config_builds_without_panic() {
        let _client = SpoonacularClient::from_config(&make_config());
    }

    /// Verify that the client is object-safe (usable as `dyn RecipeSearch`).
    #[test]
    fn search_client_is_object_safe() {
        let client: Box<dyn RecipeSearch> =
            Box::new(SpoonacularClient::from_config(&make_config()));
        drop(client);
    }

    #[test]
    fn response_envelope_parses_results() {
        let json = r#"{
            "results": [
                { "id": 1, "title": "Vegan Buddha Bowl", "readyInMinutes": 30 },
                { "id": 2, "title": "Plant-Based Stir Fry" }
            ],
            "offset": 0,
            "totalResults": 2
        }"#;
        let envelope: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.results.len(), 2);
        assert_eq!(envelope.results[0].title, "Vegan Buddha Bowl");
    }

    #[test]
    fn response_envelope_tolerates_missing_results_field() {
        let envelope: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(envelope.results.is_empty());
    }
}
