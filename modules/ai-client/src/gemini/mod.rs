mod client;
pub mod prompt_builder;
pub(crate) mod types;

pub use prompt_builder::GeminiPromptBuilder;

use crate::traits::{Agent, PromptBuilder};
use anyhow::Result;

use client::GeminiClient;

// =============================================================================
// Gemini Agent
// =============================================================================

#[derive(Clone)]
pub struct Gemini {
    api_key: String,
    pub(crate) model: String,
    base_url: Option<String>,
}

impl Gemini {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub(crate) fn client(&self) -> GeminiClient {
        let client = GeminiClient::new(&self.api_key);
        if let Some(ref url) = self.base_url {
            client.with_base_url(url)
        } else {
            client
        }
    }

    /// Single-turn generation bounded by `max_output_tokens`.
    pub async fn generate(&self, prompt: &str, max_output_tokens: u32) -> Result<String> {
        self.prompt(prompt)
            .max_output_tokens(max_output_tokens)
            .send()
            .await
    }
}

// =============================================================================
// Agent Implementation
// =============================================================================

impl Agent for Gemini {
    type PromptBuilder = GeminiPromptBuilder;

    fn prompt(&self, input: impl Into<String>) -> GeminiPromptBuilder {
        GeminiPromptBuilder::new(self.clone(), input.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_gemini_new() {
        let ai = Gemini::new("gm-test", "gemini-2.0-flash");
        assert_eq!(ai.model, "gemini-2.0-flash");
        assert_eq!(ai.api_key, "gm-test");
    }

    #[test]
    fn test_gemini_with_base_url() {
        let ai = Gemini::new("gm-test", "gemini-2.0-flash").with_base_url("https://custom.api.com");
        assert_eq!(ai.base_url, Some("https://custom.api.com".to_string()));
    }

    #[tokio::test]
    async fn generate_sends_key_and_budget() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .and(header("x-goog-api-key", "gm-test"))
            .and(body_partial_json(serde_json::json!({
                "generationConfig": {"maxOutputTokens": 1024}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "- point one"}]},
                    "finishReason": "STOP"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ai = Gemini::new("gm-test", "gemini-2.0-flash").with_base_url(server.uri());
        let text = ai.generate("Summarize this", 1024).await.unwrap();

        assert_eq!(text, "- point one");
    }

    #[tokio::test]
    async fn error_status_includes_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_string(r#"{"error":{"status":"RESOURCE_EXHAUSTED","message":"Quota exceeded for metric"}}"#),
            )
            .mount(&server)
            .await;

        let ai = Gemini::new("gm-test", "gemini-2.0-flash").with_base_url(server.uri());
        let err = ai.generate("hi", 64).await.unwrap_err().to_string();

        assert!(err.contains("429"));
        assert!(err.contains("Quota exceeded"));
    }

    #[tokio::test]
    async fn empty_candidates_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": []
            })))
            .mount(&server)
            .await;

        let ai = Gemini::new("gm-test", "gemini-2.0-flash").with_base_url(server.uri());
        assert!(ai.generate("hi", 64).await.is_err());
    }
}
