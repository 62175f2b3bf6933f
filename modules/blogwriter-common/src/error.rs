use thiserror::Error;

pub type Result<T> = std::result::Result<T, BlogWriterError>;

#[derive(Error, Debug)]
pub enum BlogWriterError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Keywords are required to generate a blog post")]
    MissingKeywords,

    #[error("Search failed for '{query}': {source}")]
    Search {
        query: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),
}

impl BlogWriterError {
    /// Map a failed generation call onto the taxonomy. Quota exhaustion is
    /// recognized from the service's message text.
    pub fn from_generation_failure(message: impl Into<String>) -> Self {
        let message = message.into();
        if is_quota_message(&message) {
            BlogWriterError::QuotaExceeded(message)
        } else {
            BlogWriterError::Generation(message)
        }
    }

    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, BlogWriterError::QuotaExceeded(_))
    }

    /// Text shown to the person running the pipeline.
    pub fn user_message(&self) -> String {
        match self {
            BlogWriterError::Configuration(msg) => msg.clone(),
            BlogWriterError::MissingKeywords => {
                "Provide inputs to generate a blog post. Keywords are required!".to_string()
            }
            BlogWriterError::QuotaExceeded(_) => {
                "API limit exceeded! Please provide your own API key.".to_string()
            }
            BlogWriterError::Generation(_) => {
                "Failed to generate blog post. Please try again!".to_string()
            }
            other => format!("An unexpected error occurred: {other}"),
        }
    }
}

/// Whether a generation-service failure reads as quota exhaustion.
pub fn is_quota_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("quota exceeded")
        || lower.contains("resource_exhausted")
        || lower.contains("429 too many requests")
}
