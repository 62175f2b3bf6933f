// Trait abstractions for the two remote services the pipeline talks to.
//
// TextGenerator is one model call, SearchProvider is one search call. Both
// take the API key per call so nothing credential-shaped outlives a request.
// MockGenerator and MockSearcher (testing.rs) stand in for them in tests:
// no network, no keys.

use anyhow::Result;
use async_trait::async_trait;

use blogwriter_common::SearchResult;

// ---------------------------------------------------------------------------
// TextGenerator: one attempt against the generation service
// ---------------------------------------------------------------------------

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt`. A single attempt: retry lives in
    /// `TextGenerationClient`.
    async fn generate(&self, prompt: &str, api_key: &str, max_output_tokens: u32)
        -> Result<String>;
}

// ---------------------------------------------------------------------------
// SearchProvider: one query against the search service
// ---------------------------------------------------------------------------

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Ranked results for `query`, at most `result_count` of them.
    async fn search(&self, query: &str, api_key: &str, result_count: u32)
        -> Result<Vec<SearchResult>>;
}
