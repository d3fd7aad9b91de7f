//! Address-field autocomplete boundary. Simple request/response; debouncing
//! belongs to the input layer, not here.

use serde::Deserialize;
use thiserror::Error;

use crate::FetchSettings;

/// One ranked completion candidate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Suggestion {
    /// Text to show in the dropdown.
    pub display: String,
    /// Present for postal-code suggestions.
    #[serde(default)]
    pub postcode: Option<String>,
    /// Present for postal-code suggestions.
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutocompleteError {
    #[error("autocomplete backend error: {0}")]
    Upstream(String),
    #[error("network error: {0}")]
    Network(String),
}

#[async_trait::async_trait]
pub trait AutocompleteClient: Send + Sync {
    /// Completions for a partial postal code.
    async fn postcode_suggestions(&self, query: &str)
        -> Result<Vec<Suggestion>, AutocompleteError>;

    /// Completions for a street fragment within a city.
    async fn street_suggestions(
        &self,
        query: &str,
        city: &str,
    ) -> Result<Vec<Suggestion>, AutocompleteError>;
}

/// [`AutocompleteClient`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAutocompleteClient {
    settings: FetchSettings,
}

impl HttpAutocompleteClient {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    async fn fetch(&self, params: &[(&str, &str)]) -> Result<Vec<Suggestion>, AutocompleteError> {
        let client = self
            .settings
            .build_client()
            .map_err(|err| AutocompleteError::Network(err.to_string()))?;

        let response = client
            .get(self.settings.endpoint("autocomplete"))
            .query(params)
            .send()
            .await
            .map_err(|err| AutocompleteError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AutocompleteError::Upstream(format!("http status {status}")));
        }
        response
            .json()
            .await
            .map_err(|err| AutocompleteError::Network(err.to_string()))
    }
}

#[async_trait::async_trait]
impl AutocompleteClient for HttpAutocompleteClient {
    async fn postcode_suggestions(
        &self,
        query: &str,
    ) -> Result<Vec<Suggestion>, AutocompleteError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch(&[("q", query), ("field", "plz")]).await
    }

    async fn street_suggestions(
        &self,
        query: &str,
        city: &str,
    ) -> Result<Vec<Suggestion>, AutocompleteError> {
        let query = query.trim();
        let city = city.trim();
        if query.is_empty() || city.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch(&[("q", query), ("field", "street"), ("city", city)])
            .await
    }
}
