use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExaError>;

#[derive(Debug, Error)]
pub enum ExaError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ExaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ExaError::Parse(err.to_string())
        } else {
            ExaError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ExaError {
    fn from(err: serde_json::Error) -> Self {
        ExaError::Parse(err.to_string())
    }
}
