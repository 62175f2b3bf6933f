use std::sync::Arc;

use ai_client::{Gemini, RetryPolicy};
use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, warn};

use blogwriter_common::config::DEFAULT_GEMINI_MODEL;
use blogwriter_common::{BlogWriterError, Config};

use crate::traits::TextGenerator;

// --- Gemini-backed generator ---

/// Builds a fresh `Gemini` agent per call from the key it is handed.
pub struct GeminiGenerator {
    model: String,
    base_url: Option<String>,
}

impl GeminiGenerator {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            base_url: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let generator = Self::new(&config.gemini_model);
        match config.gemini_base_url {
            Some(ref url) => generator.with_base_url(url),
            None => generator,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
}

impl Default for GeminiGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_GEMINI_MODEL)
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(
        &self,
        prompt: &str,
        api_key: &str,
        max_output_tokens: u32,
    ) -> Result<String> {
        let mut agent = Gemini::new(api_key, &self.model);
        if let Some(ref url) = self.base_url {
            agent = agent.with_base_url(url);
        }
        agent.generate(prompt, max_output_tokens).await
    }
}

// --- Retrying client ---

/// The text-generation surface every stage uses: one prompt, one key, a
/// token budget, retried under `RetryPolicy`.
#[derive(Clone)]
pub struct TextGenerationClient {
    generator: Arc<dyn TextGenerator>,
    retry: RetryPolicy,
}

impl TextGenerationClient {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Generate with retry. Exhaustion, a blank key, and blank output all
    /// come back as `Err`; quota failures are told apart from the rest.
    pub async fn try_generate(
        &self,
        prompt: &str,
        api_key: &str,
        max_output_tokens: u32,
    ) -> blogwriter_common::Result<String> {
        if api_key.trim().is_empty() {
            return Err(BlogWriterError::Configuration(
                "Gemini API Key is missing!".to_string(),
            ));
        }

        let text = self
            .retry
            .run("generate", move |attempt| {
                debug!(attempt, prompt_len = prompt.len(), max_output_tokens, "Generation attempt");
                self.generator.generate(prompt, api_key, max_output_tokens)
            })
            .await
            .map_err(|e| BlogWriterError::from_generation_failure(format!("{e:#}")))?;

        if text.trim().is_empty() {
            return Err(BlogWriterError::Generation(
                "model returned an empty response".to_string(),
            ));
        }

        Ok(text)
    }

    /// Generate with retry, absorbing failure into `None`.
    pub async fn generate(
        &self,
        prompt: &str,
        api_key: &str,
        max_output_tokens: u32,
    ) -> Option<String> {
        match self.try_generate(prompt, api_key, max_output_tokens).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(error = %e, "Generation failed, no result");
                None
            }
        }
    }
}
