// Test mocks for the blog pipeline.
//
// Two mocks matching the two trait boundaries:
// - MockGenerator (TextGenerator): prompt-substring rules, scripted failures
// - MockSearcher (SearchProvider): fixed result list or fixed failure
//
// Both record every call so tests can assert on what reached the boundary.
// Plus helpers for constructing SearchResult and Summary values.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use blogwriter_common::{SearchResult, Summary};

use crate::traits::{SearchProvider, TextGenerator};

const DEFAULT_REPLY: &str = "mock response";

// ---------------------------------------------------------------------------
// MockGenerator
// ---------------------------------------------------------------------------

/// One recorded `TextGenerator::generate` call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationCall {
    pub prompt: String,
    pub api_key: String,
    pub max_output_tokens: u32,
}

enum Reply {
    Text(String),
    Fail(String),
}

/// Rule-based text generator. The first rule whose pattern occurs in the
/// prompt decides the reply; otherwise the default reply is used.
/// Builder pattern: `.on_prompt()`, `.fail_on_prompt()`, `.with_default()`.
pub struct MockGenerator {
    rules: Vec<(String, Reply)>,
    default_reply: Reply,
    /// Number of leading calls that fail before rules apply.
    fail_first: u32,
    attempts: AtomicU32,
    calls: Mutex<Vec<GenerationCall>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            default_reply: Reply::Text(DEFAULT_REPLY.to_string()),
            fail_first: 0,
            attempts: AtomicU32::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Reply with `response` whenever the prompt contains `pattern`.
    pub fn on_prompt(mut self, pattern: &str, response: &str) -> Self {
        self.rules
            .push((pattern.to_string(), Reply::Text(response.to_string())));
        self
    }

    /// Fail with `message` whenever the prompt contains `pattern`.
    pub fn fail_on_prompt(mut self, pattern: &str, message: &str) -> Self {
        self.rules
            .push((pattern.to_string(), Reply::Fail(message.to_string())));
        self
    }

    pub fn with_default(mut self, response: &str) -> Self {
        self.default_reply = Reply::Text(response.to_string());
        self
    }

    /// Every call without a matching rule fails with `message`.
    pub fn failing(mut self, message: &str) -> Self {
        self.default_reply = Reply::Fail(message.to_string());
        self
    }

    /// The first `n` calls fail with a transient error regardless of rules.
    pub fn fail_first(mut self, n: u32) -> Self {
        self.fail_first = n;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<GenerationCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Prompts of recorded calls that contain `pattern`.
    pub fn prompts_containing(&self, pattern: &str) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.prompt.contains(pattern))
            .map(|c| c.prompt.clone())
            .collect()
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(
        &self,
        prompt: &str,
        api_key: &str,
        max_output_tokens: u32,
    ) -> Result<String> {
        self.calls.lock().unwrap().push(GenerationCall {
            prompt: prompt.to_string(),
            api_key: api_key.to_string(),
            max_output_tokens,
        });

        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.fail_first {
            bail!("MockGenerator: scripted failure {}", attempt + 1);
        }

        let reply = self
            .rules
            .iter()
            .find(|(pattern, _)| prompt.contains(pattern.as_str()))
            .map(|(_, reply)| reply)
            .unwrap_or(&self.default_reply);

        match reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Fail(message) => bail!("{message}"),
        }
    }
}

// ---------------------------------------------------------------------------
// MockSearcher
// ---------------------------------------------------------------------------

/// One recorded `SearchProvider::search` call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCall {
    pub query: String,
    pub api_key: String,
    pub result_count: u32,
}

/// Search provider returning a fixed result list, or a fixed failure.
pub struct MockSearcher {
    outcome: std::result::Result<Vec<SearchResult>, String>,
    calls: Mutex<Vec<SearchCall>>,
}

impl MockSearcher {
    pub fn returning(results: Vec<SearchResult>) -> Self {
        Self {
            outcome: Ok(results),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<SearchCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for MockSearcher {
    async fn search(
        &self,
        query: &str,
        api_key: &str,
        result_count: u32,
    ) -> Result<Vec<SearchResult>> {
        self.calls.lock().unwrap().push(SearchCall {
            query: query.to_string(),
            api_key: api_key.to_string(),
            result_count,
        });

        match self.outcome {
            Ok(ref results) => Ok(results
                .iter()
                .take(result_count as usize)
                .cloned()
                .collect()),
            Err(ref message) => bail!("MockSearcher: {message}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

pub fn search_result(title: &str, url: &str, content: Option<&str>) -> SearchResult {
    SearchResult {
        title: Some(title.to_string()),
        url: Some(url.to_string()),
        content: content.map(String::from),
    }
}

pub fn summary(title: &str, url: &str, text: &str) -> Summary {
    Summary {
        title: Some(title.to_string()),
        url: Some(url.to_string()),
        summary: text.to_string(),
    }
}
