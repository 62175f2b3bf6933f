use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// --- Research types ---

/// A ranked competitor page returned by search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: Option<String>,
    pub url: Option<String>,
    /// First non-blank of the upstream content-like fields.
    pub content: Option<String>,
}

impl SearchResult {
    pub fn has_content(&self) -> bool {
        self.content
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty())
    }
}

/// Condensed view of one competitor page. `summary` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub title: Option<String>,
    pub url: Option<String>,
    pub summary: String,
}

impl Summary {
    /// Placeholder for a result that had nothing to summarize.
    pub fn no_content(title: Option<String>, url: Option<String>) -> Self {
        let summary = format!(
            "(No content available to summarize. Title: {}, URL: {})",
            display_or_unknown(&title),
            display_or_unknown(&url)
        );
        Self {
            title,
            url,
            summary,
        }
    }

    /// Placeholder for a result whose summarization call produced nothing.
    pub fn failed(title: Option<String>, url: Option<String>) -> Self {
        let summary = format!(
            "(Failed to summarize. Title: {}, URL: {})",
            display_or_unknown(&title),
            display_or_unknown(&url)
        );
        Self {
            title,
            url,
            summary,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.summary.starts_with("(No content available to summarize.")
            || self.summary.starts_with("(Failed to summarize.")
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("unknown")
    }
}

fn display_or_unknown(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("unknown")
}

/// A product mentioned by competitors. Only `name` is required; no other
/// validation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Product {
    /// Specific product name, e.g. "Salomon X Ultra 4 GTX"
    pub name: String,
    /// Where the product is sold or reviewed, if the source gave one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Product {
    pub fn new(name: impl Into<String>, url: Option<&str>) -> Self {
        Self {
            name: name.into(),
            url: url.map(String::from),
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.url {
            Some(ref url) => write!(f, "{} ({})", self.name, url),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Bullet list of topics competitors under-cover. Empty when analysis was
/// skipped or failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentGapReport(String);

impl ContentGapReport {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into().trim().to_string())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentGapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Post options ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostType {
    #[default]
    General,
    HowToGuide,
    Listicle,
    JobPost,
    CheatSheet,
    Custom(String),
}

impl PostType {
    pub const OPTIONS: &'static [&'static str] = &[
        "General",
        "How-to Guides",
        "Listicles",
        "Job Posts",
        "Cheat Sheets",
    ];

    pub fn label(&self) -> &str {
        match self {
            PostType::General => "General",
            PostType::HowToGuide => "How-to Guides",
            PostType::Listicle => "Listicles",
            PostType::JobPost => "Job Posts",
            PostType::CheatSheet => "Cheat Sheets",
            PostType::Custom(s) => s,
        }
    }
}

impl FromStr for PostType {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match normalize(trimmed).as_str() {
            "" | "general" => PostType::General,
            "how-to guides" | "how-to guide" | "how-to" | "howto" => PostType::HowToGuide,
            "listicles" | "listicle" => PostType::Listicle,
            "job posts" | "job post" => PostType::JobPost,
            "cheat sheets" | "cheat sheet" => PostType::CheatSheet,
            _ => PostType::Custom(trimmed.to_string()),
        })
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    General,
    Professional,
    Casual,
    Custom(String),
}

impl Tone {
    pub const OPTIONS: &'static [&'static str] = &["General", "Professional", "Casual"];

    pub fn label(&self) -> &str {
        match self {
            Tone::General => "General",
            Tone::Professional => "Professional",
            Tone::Casual => "Casual",
            Tone::Custom(s) => s,
        }
    }
}

impl FromStr for Tone {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match normalize(trimmed).as_str() {
            "" | "general" => Tone::General,
            "professional" => Tone::Professional,
            "casual" => Tone::Casual,
            _ => Tone::Custom(trimmed.to_string()),
        })
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Vietnamese,
    Chinese,
    Hindi,
    Spanish,
    Custom(String),
}

impl Language {
    pub const OPTIONS: &'static [&'static str] =
        &["English", "Vietnamese", "Chinese", "Hindi", "Spanish"];

    pub fn label(&self) -> &str {
        match self {
            Language::English => "English",
            Language::Vietnamese => "Vietnamese",
            Language::Chinese => "Chinese",
            Language::Hindi => "Hindi",
            Language::Spanish => "Spanish",
            Language::Custom(s) => s,
        }
    }
}

impl FromStr for Language {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match normalize(trimmed).as_str() {
            "" | "english" => Language::English,
            "vietnamese" => Language::Vietnamese,
            "chinese" => Language::Chinese,
            "hindi" => Language::Hindi,
            "spanish" => Language::Spanish,
            _ => Language::Custom(trimmed.to_string()),
        })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn normalize(s: &str) -> String {
    s.to_lowercase()
}

// --- Result count ---

pub const MIN_RESULT_COUNT: u32 = 10;
pub const MAX_RESULT_COUNT: u32 = 100;
pub const DEFAULT_RESULT_COUNT: u32 = 10;

/// Clamp a requested search-result count into the supported range.
pub fn clamp_result_count(requested: u32) -> u32 {
    requested.clamp(MIN_RESULT_COUNT, MAX_RESULT_COUNT)
}

// --- Synthesis input ---

/// Everything the final article prompt is rendered from. Built right before
/// synthesis and dropped afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub keywords: String,
    pub post_type: PostType,
    pub tone: Tone,
    pub language: Language,
    pub result_count: u32,
    pub products: Vec<Product>,
    pub gaps: ContentGapReport,
    pub summaries: Vec<Summary>,
}
