//! Chain tests: search → summarize → {products, gaps} → synthesize, with the
//! search and generation services replaced by mocks.

use std::sync::Arc;

use ai_client::RetryPolicy;
use blogwriter_common::{BlogWriterError, Product};
use blogwriter_pipeline::testing::{search_result, MockGenerator, MockSearcher};
use blogwriter_pipeline::{BlogPipeline, PipelineRequest};

// Stage markers: one phrase unique to each prompt template.
const ARTICLE: &str = "SEO strategist and creative content writer";
const PRODUCTS: &str = "list every specific product";
const GAPS: &str = "cover poorly or not at all";
const SUMMARY: &str = "Summarize the following blog content";

const CANNED_ARTICLE: &str = "# The Best Hiking Boots of the Year\n\nLace up.";
const GAP_TEXT: &str = "- how to break in new boots\n- resoling versus replacing";

fn request(keywords: &str) -> PipelineRequest {
    PipelineRequest::new(keywords)
        .with_search_key("exa-key")
        .with_gen_key("gemini-key")
}

fn pipeline(searcher: &Arc<MockSearcher>, generator: &Arc<MockGenerator>) -> BlogPipeline {
    BlogPipeline::new(searcher.clone(), generator.clone()).with_retry(RetryPolicy::immediate(2))
}

fn three_results() -> MockSearcher {
    MockSearcher::returning(vec![
        search_result("Boot Guide", "https://guide.example", Some("Salomon boots are great")),
        search_result("Top Boots", "https://top.example", Some("Merrell and Lowa reviewed")),
        search_result("Trail Gear", "https://gear.example", Some("Keen boots for wide feet")),
    ])
}

#[tokio::test]
async fn best_hiking_boots_end_to_end() {
    let searcher = Arc::new(three_results());
    let generator = Arc::new(
        MockGenerator::new()
            .on_prompt(ARTICLE, CANNED_ARTICLE)
            .on_prompt(
                PRODUCTS,
                r#"[{"name":"Salomon X Ultra 4 GTX","url":"https://salomon.example"},
                    {"name":"Merrell Moab 3","url":"https://merrell.example"},
                    {"name":"Keen Targhee III"}]"#,
            )
            .on_prompt(GAPS, GAP_TEXT)
            .on_prompt("Title: Boot Guide\nURL", "- Salomon X Ultra 4 GTX leads")
            .on_prompt("Title: Top Boots\nURL", "- Merrell Moab 3 for value")
            .on_prompt("Title: Trail Gear\nURL", "- Keen Targhee III for wide feet"),
    );

    let outcome = pipeline(&searcher, &generator)
        .run(&request("best hiking boots"))
        .await;

    assert_eq!(outcome.article.as_deref(), Some(CANNED_ARTICLE));
    assert!(outcome.error.is_none());
    assert!(outcome.warnings.is_empty());

    assert_eq!(outcome.summaries.len(), 3);
    assert!(outcome.summaries.iter().all(|s| !s.is_placeholder()));
    assert_eq!(outcome.summaries[0].summary, "- Salomon X Ultra 4 GTX leads");
    assert_eq!(outcome.summaries[2].summary, "- Keen Targhee III for wide feet");

    assert_eq!(
        outcome.products,
        vec![
            Product::new("Salomon X Ultra 4 GTX", Some("https://salomon.example")),
            Product::new("Merrell Moab 3", Some("https://merrell.example")),
            Product::new("Keen Targhee III", None),
        ]
    );
    assert_eq!(outcome.gaps.as_str(), GAP_TEXT);

    let article_prompts = generator.prompts_containing(ARTICLE);
    assert_eq!(article_prompts.len(), 1);
    let prompt = &article_prompts[0];
    assert!(prompt.contains("best hiking boots"));
    assert!(prompt.contains("Salomon X Ultra 4 GTX"));
    assert!(prompt.contains("Merrell Moab 3"));
    assert!(prompt.contains("Keen Targhee III"));
    assert!(prompt.contains(GAP_TEXT));

    // 3 summaries + products + gaps + article
    assert_eq!(generator.call_count(), 6);
    assert!(generator.calls().iter().all(|c| c.api_key == "gemini-key"));
}

#[tokio::test]
async fn missing_search_key_makes_no_network_calls() {
    let searcher = Arc::new(three_results());
    let generator = Arc::new(MockGenerator::new());

    let outcome = pipeline(&searcher, &generator)
        .run(&PipelineRequest::new("best hiking boots").with_gen_key("gemini-key"))
        .await;

    assert!(outcome.article.is_none());
    assert!(matches!(outcome.error, Some(BlogWriterError::Configuration(_))));
    assert_eq!(searcher.call_count(), 0);
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn search_failure_still_reaches_synthesis() {
    let searcher = Arc::new(MockSearcher::failing("connection refused"));
    let generator = Arc::new(MockGenerator::new().on_prompt(ARTICLE, CANNED_ARTICLE));

    let outcome = pipeline(&searcher, &generator)
        .run(&request("best hiking boots"))
        .await;

    assert_eq!(outcome.article.as_deref(), Some(CANNED_ARTICLE));
    assert!(outcome.summaries.is_empty());
    assert!(outcome.products.is_empty());
    assert!(outcome.gaps.is_empty());
    assert_eq!(outcome.warnings.len(), 1);

    // Empty summaries short-circuit products and gaps: synthesis is the only call
    assert_eq!(generator.call_count(), 1);
    let prompt = &generator.prompts_containing(ARTICLE)[0];
    assert!(prompt.contains("(No products selected)"));
    assert!(!prompt.contains("Content Gaps"));
}

#[tokio::test]
async fn summaries_keep_search_order_and_skip_empty_content() {
    let searcher = Arc::new(MockSearcher::returning(vec![
        search_result("First", "https://1.example", Some("one")),
        search_result("Empty", "https://2.example", None),
        search_result("Third", "https://3.example", Some("three")),
    ]));
    let generator = Arc::new(
        MockGenerator::new()
            .on_prompt(ARTICLE, CANNED_ARTICLE)
            .on_prompt(PRODUCTS, "[]")
            .on_prompt(GAPS, "- nothing")
            .on_prompt("Title: First\nURL", "- first")
            .on_prompt("Title: Third\nURL", "- third"),
    );

    let outcome = pipeline(&searcher, &generator)
        .with_summary_concurrency(3)
        .run(&request("best hiking boots"))
        .await;

    let titles: Vec<_> = outcome.summaries.iter().map(|s| s.display_title()).collect();
    assert_eq!(titles, ["First", "Empty", "Third"]);
    assert_eq!(outcome.summaries[0].summary, "- first");
    assert!(outcome.summaries[1].is_placeholder());
    assert_eq!(outcome.summaries[2].summary, "- third");

    assert_eq!(generator.prompts_containing(SUMMARY).len(), 2);
}

#[tokio::test]
async fn unparseable_products_warn_but_do_not_abort() {
    let searcher = Arc::new(three_results());
    let generator = Arc::new(
        MockGenerator::new()
            .on_prompt(ARTICLE, CANNED_ARTICLE)
            .on_prompt(PRODUCTS, "Sorry, I can't help with that.")
            .with_default("- a bullet"),
    );

    let outcome = pipeline(&searcher, &generator)
        .run(&request("best hiking boots"))
        .await;

    assert_eq!(outcome.article.as_deref(), Some(CANNED_ARTICLE));
    assert!(outcome.products.is_empty());
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].contains("product"));
}

#[tokio::test]
async fn failed_gap_analysis_leaves_gap_block_out() {
    let searcher = Arc::new(three_results());
    let generator = Arc::new(
        MockGenerator::new()
            .on_prompt(ARTICLE, CANNED_ARTICLE)
            .on_prompt(PRODUCTS, "[]")
            .fail_on_prompt(GAPS, "503 Service Unavailable")
            .with_default("- a bullet"),
    );

    let outcome = pipeline(&searcher, &generator)
        .run(&request("best hiking boots"))
        .await;

    assert_eq!(outcome.article.as_deref(), Some(CANNED_ARTICLE));
    assert!(outcome.gaps.is_empty());
    // Retried under the policy (2 attempts) before giving up
    assert_eq!(generator.prompts_containing(GAPS).len(), 2);
    assert!(!generator.prompts_containing(ARTICLE)[0].contains("Content Gaps"));
}
