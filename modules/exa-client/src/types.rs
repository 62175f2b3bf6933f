use std::borrow::Cow;

use serde::{Deserialize, Serialize};

// --- Search request ---

/// Which page contents Exa should inline into each result.
#[derive(Debug, Clone, Serialize)]
pub struct ContentsOptions {
    pub text: bool,
}

/// Body for `POST /search`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    pub num_results: u32,
    /// Let Exa rewrite the query for recall. Results are not reproducible
    /// bit-for-bit when this is on.
    pub use_autoprompt: bool,
    pub contents: ContentsOptions,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, num_results: u32) -> Self {
        Self {
            query: query.into(),
            num_results,
            use_autoprompt: true,
            contents: ContentsOptions { text: true },
        }
    }
}

// --- Search response ---

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<ExaResult>,
    /// The rewritten query, when autoprompt was applied.
    #[serde(default)]
    pub autoprompt_string: Option<String>,
}

/// A single search hit. The upstream schema varies by endpoint and content
/// options, so every content-like field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExaResult {
    pub id: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub published_date: Option<String>,
    pub author: Option<String>,
    pub score: Option<f64>,
    pub content: Option<String>,
    pub text: Option<String>,
    pub extract: Option<String>,
    pub description: Option<String>,
    pub snippet: Option<String>,
    pub summary: Option<String>,
    pub highlights: Option<Vec<String>>,
}

type ContentAccessor = for<'a> fn(&'a ExaResult) -> Option<Cow<'a, str>>;

/// Resolution order for a result's body text. First non-blank wins.
const CONTENT_ACCESSORS: &[ContentAccessor] = &[
    content_field,
    text_field,
    extract_field,
    description_field,
    snippet_field,
    summary_field,
    highlights_field,
];

fn borrowed(field: &Option<String>) -> Option<Cow<'_, str>> {
    field.as_deref().map(Cow::Borrowed)
}

fn content_field(r: &ExaResult) -> Option<Cow<'_, str>> {
    borrowed(&r.content)
}

fn text_field(r: &ExaResult) -> Option<Cow<'_, str>> {
    borrowed(&r.text)
}

fn extract_field(r: &ExaResult) -> Option<Cow<'_, str>> {
    borrowed(&r.extract)
}

fn description_field(r: &ExaResult) -> Option<Cow<'_, str>> {
    borrowed(&r.description)
}

fn snippet_field(r: &ExaResult) -> Option<Cow<'_, str>> {
    borrowed(&r.snippet)
}

fn summary_field(r: &ExaResult) -> Option<Cow<'_, str>> {
    borrowed(&r.summary)
}

fn highlights_field(r: &ExaResult) -> Option<Cow<'_, str>> {
    r.highlights
        .as_ref()
        .filter(|h| !h.is_empty())
        .map(|h| Cow::Owned(h.join("\n")))
}

impl ExaResult {
    /// Body text resolved across the candidate content fields.
    pub fn content(&self) -> Option<String> {
        CONTENT_ACCESSORS
            .iter()
            .filter_map(|accessor| accessor(self))
            .find(|value| !value.trim().is_empty())
            .map(Cow::into_owned)
    }
}
