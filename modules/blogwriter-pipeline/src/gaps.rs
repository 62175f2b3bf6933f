use tracing::info;

use blogwriter_common::{ContentGapReport, Summary};

use crate::generation::TextGenerationClient;
use crate::summarizer::render_summaries;

pub const GAP_MAX_TOKENS: u32 = 1024;

fn gap_prompt(summaries: &[Summary]) -> String {
    format!(
        "You are an SEO content strategist. Below are summaries of the top-ranking \
competitor articles for the same search query.

Identify the topics, questions, and angles that these competitors, taken together, \
cover poorly or not at all. Look for the gaps BETWEEN them: what a reader would still \
be searching for after reading every article. Do not summarize any single article.

Respond with a concise bullet list (one gap per line, starting with \"- \"). No \
introduction, no conclusion.

COMPETITOR SUMMARIES:
{}
",
        render_summaries(summaries)
    )
}

/// Topics the competitor set under-covers, as a bullet list. Empty when
/// there is nothing to analyze or the model gave nothing back.
pub async fn analyze_gaps(
    client: &TextGenerationClient,
    summaries: &[Summary],
    api_key: &str,
) -> ContentGapReport {
    if summaries.is_empty() || api_key.trim().is_empty() {
        return ContentGapReport::empty();
    }

    match client
        .generate(&gap_prompt(summaries), api_key, GAP_MAX_TOKENS)
        .await
    {
        Some(text) => {
            let report = ContentGapReport::new(text);
            info!(lines = report.as_str().lines().count(), "Content gaps identified");
            report
        }
        None => ContentGapReport::empty(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ai_client::RetryPolicy;

    use super::*;
    use crate::testing::{summary, MockGenerator};

    fn client(mock: &Arc<MockGenerator>) -> TextGenerationClient {
        TextGenerationClient::new(mock.clone()).with_retry(RetryPolicy::immediate(3))
    }

    fn summaries() -> Vec<Summary> {
        vec![
            summary("Boot Guide", "https://g.example", "- fit and sizing"),
            summary("Top 10 Boots", "https://t.example", "- waterproofing"),
        ]
    }

    #[tokio::test]
    async fn returns_model_bullets_trimmed() {
        let mock = Arc::new(
            MockGenerator::new().with_default("\n- break-in period\n- resoling costs\n"),
        );

        let report = analyze_gaps(&client(&mock), &summaries(), "key").await;

        assert_eq!(report.as_str(), "- break-in period\n- resoling costs");
        let call = &mock.calls()[0];
        assert!(call.prompt.contains("Title: Boot Guide"));
        assert!(call.prompt.contains("Title: Top 10 Boots"));
        assert_eq!(call.max_output_tokens, GAP_MAX_TOKENS);
    }

    #[tokio::test]
    async fn empty_summaries_skip_the_model() {
        let mock = Arc::new(MockGenerator::new());

        let report = analyze_gaps(&client(&mock), &[], "key").await;

        assert!(report.is_empty());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_key_skips_the_model() {
        let mock = Arc::new(MockGenerator::new());

        let report = analyze_gaps(&client(&mock), &summaries(), " ").await;

        assert!(report.is_empty());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn failure_yields_empty_report() {
        let mock = Arc::new(MockGenerator::new().failing("500 Internal Server Error"));

        let report = analyze_gaps(&client(&mock), &summaries(), "key").await;

        assert!(report.is_empty());
        assert_eq!(mock.call_count(), 3);
    }
}
