use anyhow::Result;
use async_trait::async_trait;

/// A model provider that turns one input into a configurable request.
pub trait Agent: Clone + Send + Sync {
    type PromptBuilder: PromptBuilder;

    fn prompt(&self, input: impl Into<String>) -> Self::PromptBuilder;
}

/// Single-turn request under construction. `send` consumes it.
#[async_trait]
pub trait PromptBuilder: Send + Sized {
    fn max_output_tokens(self, max_output_tokens: u32) -> Self;
    async fn send(self) -> Result<String>;
}
