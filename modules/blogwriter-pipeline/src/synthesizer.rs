use tracing::{info, warn};

use blogwriter_common::{GenerationRequest, Product};

use crate::generation::TextGenerationClient;
use crate::summarizer::render_summaries;

pub const ARTICLE_MAX_TOKENS: u32 = 8192;
pub const FAQ_COUNT: usize = 5;

const NO_PRODUCTS: &str = "(No products selected)";
const NO_SUMMARIES: &str = "(No competitor summaries available)";

fn products_block(products: &[Product]) -> String {
    if products.is_empty() {
        return NO_PRODUCTS.to_string();
    }
    products
        .iter()
        .map(|p| format!("- {p}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the article prompt. Deterministic: the same request always yields
/// the same text.
pub fn render_prompt(request: &GenerationRequest) -> String {
    let post_type = request.post_type.label();
    let tone = request.tone.label();
    let language = request.language.label();
    let keywords = request.keywords.trim();

    let summaries = if request.summaries.is_empty() {
        NO_SUMMARIES.to_string()
    } else {
        render_summaries(&request.summaries)
    };

    let mut prompt = format!(
        r#"You are an experienced SEO strategist and creative content writer who specializes in crafting {post_type} blog posts in {language}. Your blog posts are designed to rank highly in search results while deeply engaging readers with a professional yet personable tone.

### Task:
Write a comprehensive, engaging, and SEO-optimized blog post on the topic below. The blog should:
- Be structured for readability with clear headings, subheadings, and bullet points.
- Include actionable insights, real-world examples, and personal anecdotes to make the content relatable and practical.
- Be written in a {tone} tone that balances professionalism with a conversational style.

### Requirements:
1. **SEO Optimization**:
   - Use the provided keywords naturally and strategically throughout the content.
   - Incorporate semantic keywords and related terms to enhance search engine visibility.
   - Align the content with Google's E-E-A-T (Experience, Expertise, Authoritativeness, Trustworthiness) guidelines.

2. **Content Structure**:
   - Start with a compelling introduction that hooks the reader and outlines the blog's value.
   - Organize the content with logical headings and subheadings.
   - Use bullet points, numbered lists, and short paragraphs for readability.

3. **Engagement and Value**:
   - Provide actionable tips, real-world examples, and personal anecdotes.
   - Recommend the selected products where they genuinely fit, linking to them when a URL is given.
   - Include at least one engaging call-to-action (CTA) to encourage reader interaction.

4. **FAQs Section**:
   - Include {FAQ_COUNT} FAQs derived from "People also ask" queries and related search suggestions.
   - Provide thoughtful, well-researched answers to each question.

5. **Visual and Multimedia Suggestions**:
   - Recommend where to include images, infographics, or videos to enhance the content's appeal.

6. **SEO Metadata**:
   - Append the following metadata after the main blog content:
     - A **Blog Title** that is catchy and includes the primary keyword.
     - A **Meta Description** summarizing the blog post in under 160 characters.
     - A **URL Slug** that is short, descriptive, and formatted in lowercase with hyphens.
     - A list of **Hashtags** relevant to the content.

### Blog Details:
- **Title**: {keywords}
- **Keywords**: {keywords}
- **SERP Competitor Summaries**:
{summaries}

### Selected Products:
{products}
"#,
        products = products_block(&request.products),
    );

    if !request.gaps.is_empty() {
        prompt.push_str(&format!(
            "\n### Content Gaps to Cover:\nCompetitors under-cover the topics below. Address them so this post offers more than any single competitor:\n{}\n",
            request.gaps
        ));
    }

    prompt.push_str(
        "\nNow, craft an exceptional blog post that stands out in search results and delivers maximum value to readers.\n",
    );
    prompt
}

/// Render and generate the article. The model's output is returned verbatim.
pub async fn try_synthesize(
    client: &TextGenerationClient,
    request: &GenerationRequest,
    api_key: &str,
) -> blogwriter_common::Result<String> {
    let prompt = render_prompt(request);
    info!(
        prompt_len = prompt.len(),
        summaries = request.summaries.len(),
        products = request.products.len(),
        has_gaps = !request.gaps.is_empty(),
        "Synthesizing article"
    );
    client
        .try_generate(&prompt, api_key, ARTICLE_MAX_TOKENS)
        .await
}

pub async fn synthesize(
    client: &TextGenerationClient,
    request: &GenerationRequest,
    api_key: &str,
) -> Option<String> {
    match try_synthesize(client, request, api_key).await {
        Ok(article) => Some(article),
        Err(e) => {
            warn!(error = %e, "Article synthesis failed");
            None
        }
    }
}
