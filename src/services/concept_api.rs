//! Concept metadata service client
//!
//! Fetches per-concept display metadata from the backend API. One attempt
//! per request, client-default timeout, no retry; callers fall back to
//! slug-derived metadata when the fetch fails.

use serde::Deserialize;
use tracing::debug;

use crate::types::{LintelError, Result};

/// Concept metadata returned by the backend API
#[derive(Debug, Clone, Deserialize)]
pub struct ConceptData {
    /// Display title for the concept
    pub title: String,
    /// Markdown body used as the preview description
    pub description_markdown: String,
}

/// Client for the concept metadata API
#[derive(Debug, Clone)]
pub struct ConceptApi {
    client: reqwest::Client,
    base_url: String,
}

impl ConceptApi {
    /// Create a client for the given API base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Lookup URL for one concept
    fn concept_data_url(&self, slug: &str) -> String {
        format!(
            "{}/concept_data?id_or_slug={}",
            self.base_url,
            urlencoding::encode(slug)
        )
    }

    /// Fetch title and markdown description for a concept.
    ///
    /// Transport failures, non-success statuses, and JSON-parse failures
    /// all surface as `LintelError::Api`.
    pub async fn fetch_concept(&self, slug: &str) -> Result<ConceptData> {
        let url = self.concept_data_url(slug);
        debug!(url = %url, "Fetching concept metadata");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LintelError::Api(format!("concept_data request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(LintelError::Api(format!(
                "concept_data returned {} for '{}'",
                response.status(),
                slug
            )));
        }

        response
            .json::<ConceptData>()
            .await
            .map_err(|e| LintelError::Api(format!("concept_data parse failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concept_data_url() {
        let api = ConceptApi::new("http://localhost:8090/api/");
        assert_eq!(
            api.concept_data_url("network-protocols"),
            "http://localhost:8090/api/concept_data?id_or_slug=network-protocols"
        );
    }

    #[test]
    fn test_concept_data_url_encodes_slug() {
        let api = ConceptApi::new("http://localhost:8090/api");
        assert_eq!(
            api.concept_data_url("a b&c"),
            "http://localhost:8090/api/concept_data?id_or_slug=a%20b%26c"
        );
    }

    #[test]
    fn test_concept_data_parses_documented_payload() {
        let data: ConceptData = serde_json::from_str(
            r#"{"title": "Custom Title", "description_markdown": "Custom desc"}"#,
        )
        .unwrap();
        assert_eq!(data.title, "Custom Title");
        assert_eq!(data.description_markdown, "Custom desc");
    }

    #[tokio::test]
    async fn test_fetch_concept_unreachable_service_is_api_error() {
        // Nothing listens on this port; the fetch must fail, not panic
        let api = ConceptApi::new("http://127.0.0.1:9");
        let err = api.fetch_concept("network-protocols").await.unwrap_err();
        assert!(matches!(err, LintelError::Api(_)));
    }
}
