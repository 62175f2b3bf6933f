use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use exa_client::{ExaClient, SearchRequest};
use tracing::{info, warn};

use blogwriter_common::{BlogWriterError, Config, SearchResult};

use crate::traits::SearchProvider;

// --- Exa-backed provider ---

pub struct ExaSearcher {
    base_url: Option<String>,
}

impl ExaSearcher {
    pub fn new() -> Self {
        Self { base_url: None }
    }

    pub fn from_config(config: &Config) -> Self {
        let searcher = Self::new();
        match config.exa_base_url {
            Some(ref url) => searcher.with_base_url(url),
            None => searcher,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
}

impl Default for ExaSearcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for ExaSearcher {
    async fn search(
        &self,
        query: &str,
        api_key: &str,
        result_count: u32,
    ) -> Result<Vec<SearchResult>> {
        let mut client = ExaClient::new(api_key)?;
        if let Some(ref url) = self.base_url {
            client = client.with_base_url(url);
        }

        let request = SearchRequest::new(query, result_count);
        let response = client.search_and_contents(&request).await?;

        Ok(response
            .results
            .into_iter()
            .map(|r| SearchResult {
                content: r.content(),
                title: r.title,
                url: r.url,
            })
            .collect())
    }
}

// --- Search client ---

/// Key-checked front for a `SearchProvider`. The key check happens before
/// any request leaves the process.
#[derive(Clone)]
pub struct SearchClient {
    provider: Arc<dyn SearchProvider>,
}

impl SearchClient {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    pub async fn search(
        &self,
        query: &str,
        api_key: &str,
        result_count: u32,
    ) -> blogwriter_common::Result<Vec<SearchResult>> {
        if api_key.trim().is_empty() {
            return Err(BlogWriterError::Configuration(
                "Metaphor API Key is missing!".to_string(),
            ));
        }

        match self.provider.search(query, api_key, result_count).await {
            Ok(results) => {
                info!(query, requested = result_count, count = results.len(), "Search complete");
                Ok(results)
            }
            Err(e) => {
                warn!(query, error = %e, "Search failed");
                Err(BlogWriterError::Search {
                    query: query.to_string(),
                    source: e,
                })
            }
        }
    }
}
