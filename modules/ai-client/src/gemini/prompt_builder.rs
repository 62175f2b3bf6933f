use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tracing::debug;

use crate::traits::PromptBuilder;

use super::types::*;
use super::Gemini;

pub struct GeminiPromptBuilder {
    agent: Gemini,
    input: String,
    max_output_tokens: Option<u32>,
}

impl GeminiPromptBuilder {
    pub(crate) fn new(agent: Gemini, input: String) -> Self {
        Self {
            agent,
            input,
            max_output_tokens: None,
        }
    }

    pub(crate) fn build_request(&self) -> GenerateRequest {
        let request = GenerateRequest::new().content(Content::user(&self.input));
        match self.max_output_tokens {
            Some(tokens) => request.max_output_tokens(tokens),
            None => request,
        }
    }
}

#[async_trait]
impl PromptBuilder for GeminiPromptBuilder {
    fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    async fn send(self) -> Result<String> {
        let request = self.build_request();
        let response = self.agent.client().generate(&self.agent.model, &request).await?;

        if let Some(reason) = response.block_reason() {
            return Err(anyhow!("Gemini blocked the prompt: {}", reason));
        }

        debug!(
            finish_reason = response.finish_reason().unwrap_or("unknown"),
            "Gemini response received"
        );

        response
            .text()
            .ok_or_else(|| anyhow!("No text in Gemini response"))
    }
}
