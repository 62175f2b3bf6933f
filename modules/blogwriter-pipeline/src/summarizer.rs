use ai_client::util::truncate_to_char_boundary;
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use blogwriter_common::config::DEFAULT_SUMMARY_CONCURRENCY;
use blogwriter_common::{SearchResult, Summary};

use crate::generation::TextGenerationClient;

pub const SUMMARY_MAX_TOKENS: u32 = 1024;

/// Upper bound on page content embedded in one summary prompt.
pub const MAX_CONTENT_BYTES: usize = 30_000;

fn summary_prompt(title: &str, url: &str, content: &str) -> String {
    format!(
        "Summarize the following blog content for competitive analysis. Identify the main \
topics, structure, and any unique value or product recommendations. Keep the summary \
concise (5-7 bullet points):

Title: {title}
URL: {url}
Content:
{content}
"
    )
}

/// Summarize the first `limit` results, one model call each, at the default
/// concurrency. Never fails: a result degrades to a placeholder instead.
pub async fn summarize(
    client: &TextGenerationClient,
    results: &[SearchResult],
    api_key: &str,
    limit: usize,
) -> Vec<Summary> {
    summarize_with_concurrency(client, results, api_key, limit, DEFAULT_SUMMARY_CONCURRENCY).await
}

/// Same as [`summarize`] with an explicit cap on in-flight model calls.
/// Output order always equals input order.
pub async fn summarize_with_concurrency(
    client: &TextGenerationClient,
    results: &[SearchResult],
    api_key: &str,
    limit: usize,
    concurrency: usize,
) -> Vec<Summary> {
    let summaries: Vec<Summary> = stream::iter(results.iter().take(limit))
        .map(|result| summarize_one(client, result, api_key))
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let placeholders = summaries.iter().filter(|s| s.is_placeholder()).count();
    info!(
        total = summaries.len(),
        placeholders, "Summarization complete"
    );
    summaries
}

async fn summarize_one(
    client: &TextGenerationClient,
    result: &SearchResult,
    api_key: &str,
) -> Summary {
    let title = result.title.clone();
    let url = result.url.clone();

    let Some(content) = result.content.as_deref().filter(|_| result.has_content()) else {
        return Summary::no_content(title, url);
    };

    let prompt = summary_prompt(
        title.as_deref().unwrap_or_default(),
        url.as_deref().unwrap_or_default(),
        truncate_to_char_boundary(content, MAX_CONTENT_BYTES),
    );

    match client.generate(&prompt, api_key, SUMMARY_MAX_TOKENS).await {
        Some(text) => Summary {
            title,
            url,
            summary: text.trim().to_string(),
        },
        None => {
            warn!(url = url.as_deref().unwrap_or("unknown"), "Summary unavailable, using placeholder");
            Summary::failed(title, url)
        }
    }
}

/// "Title: ...\nSummary: ..." blocks separated by blank lines, the form every
/// downstream prompt embeds.
pub fn render_summaries(summaries: &[Summary]) -> String {
    summaries
        .iter()
        .map(|s| format!("Title: {}\nSummary: {}", s.display_title(), s.summary))
        .collect::<Vec<_>>()
        .join("\n\n")
}
