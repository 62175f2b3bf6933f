pub mod error;
pub mod types;

pub use error::{ExaError, Result};
pub use types::{ContentsOptions, ExaResult, SearchRequest, SearchResponse};

use std::time::Duration;

const BASE_URL: &str = "https://api.exa.ai";

pub struct ExaClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl ExaClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Run a search with inlined page text. One request, no polling.
    pub async fn search_and_contents(&self, request: &SearchRequest) -> Result<SearchResponse> {
        tracing::info!(
            query = %request.query,
            num_results = request.num_results,
            autoprompt = request.use_autoprompt,
            "Exa search"
        );

        let url = format!("{}/search", self.base_url);
        let resp = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ExaError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        let response: SearchResponse = serde_json::from_str(&body)?;

        if let Some(ref rewritten) = response.autoprompt_string {
            tracing::debug!(rewritten = %rewritten, "Exa autoprompt rewrote query");
        }
        tracing::info!(count = response.results.len(), "Exa search complete");

        Ok(response)
    }

    /// Convenience wrapper: autoprompt on, text contents on.
    pub async fn search(&self, query: &str, num_results: u32) -> Result<Vec<ExaResult>> {
        let response = self
            .search_and_contents(&SearchRequest::new(query, num_results))
            .await?;
        Ok(response.results)
    }
}
