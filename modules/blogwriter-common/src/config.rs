use std::env;
use std::str::FromStr;

use tracing::info;

use crate::error::{BlogWriterError, Result};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_SUMMARY_LIMIT: usize = 5;
pub const DEFAULT_SUMMARY_CONCURRENCY: usize = 3;
pub const DEFAULT_GENERATION_MAX_ATTEMPTS: u32 = 6;

/// Pipeline configuration loaded from environment variables.
///
/// API keys here are only defaults: a key passed explicitly by the host
/// always wins (see [`Config::resolve_key`]).
#[derive(Debug, Clone)]
pub struct Config {
    // Search (Exa, formerly Metaphor)
    pub search_api_key: Option<String>,
    pub exa_base_url: Option<String>,

    // Text generation (Gemini)
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: Option<String>,

    // Pipeline tuning
    pub summary_limit: usize,
    pub summary_concurrency: usize,
    pub generation_max_attempts: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_api_key: None,
            exa_base_url: None,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: None,
            summary_limit: DEFAULT_SUMMARY_LIMIT,
            summary_concurrency: DEFAULT_SUMMARY_CONCURRENCY,
            generation_max_attempts: DEFAULT_GENERATION_MAX_ATTEMPTS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            search_api_key: non_empty("METAPHOR_API_KEY").or_else(|| non_empty("EXA_API_KEY")),
            exa_base_url: non_empty("EXA_BASE_URL"),
            gemini_api_key: non_empty("GEMINI_API_KEY"),
            gemini_model: non_empty("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: non_empty("GEMINI_BASE_URL"),
            summary_limit: parsed(&non_empty, "SUMMARY_LIMIT", DEFAULT_SUMMARY_LIMIT)?,
            summary_concurrency: parsed(
                &non_empty,
                "SUMMARY_CONCURRENCY",
                DEFAULT_SUMMARY_CONCURRENCY,
            )?
            .max(1),
            generation_max_attempts: parsed(
                &non_empty,
                "GENERATION_MAX_ATTEMPTS",
                DEFAULT_GENERATION_MAX_ATTEMPTS,
            )?
            .max(1),
        })
    }

    /// Pick the explicitly supplied key when it is non-empty, otherwise the
    /// environment default.
    pub fn resolve_key(explicit: Option<&str>, default: Option<&str>) -> Option<String> {
        explicit
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .or_else(|| default.map(str::trim).filter(|k| !k.is_empty()))
            .map(String::from)
    }

    /// Log config values with API keys reduced to set/unset.
    pub fn log_redacted(&self) {
        info!(
            search_api_key = redact(&self.search_api_key),
            gemini_api_key = redact(&self.gemini_api_key),
            gemini_model = %self.gemini_model,
            summary_limit = self.summary_limit,
            summary_concurrency = self.summary_concurrency,
            generation_max_attempts = self.generation_max_attempts,
            "Config loaded"
        );
    }
}

fn redact(key: &Option<String>) -> &'static str {
    if key.is_some() {
        "[set]"
    } else {
        "[unset]"
    }
}

fn parsed<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| {
            BlogWriterError::Configuration(format!("{key} must be a number, got '{raw}'"))
        }),
        None => Ok(default),
    }
}
