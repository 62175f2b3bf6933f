use std::sync::Arc;

use ai_client::RetryPolicy;
use tracing::{info, warn};

use blogwriter_common::{
    clamp_result_count, BlogWriterError, Config, ContentGapReport, GenerationRequest, Language,
    PostType, Product, Summary, Tone, DEFAULT_RESULT_COUNT,
};

use crate::gaps::analyze_gaps;
use crate::generation::{GeminiGenerator, TextGenerationClient};
use crate::products::extract_products_reported;
use crate::search::{ExaSearcher, SearchClient};
use crate::summarizer::summarize_with_concurrency;
use crate::synthesizer::try_synthesize;
use crate::traits::{SearchProvider, TextGenerator};

/// One run's inputs. Keys arrive already resolved; `None` or blank means the
/// run cannot start.
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    pub keywords: String,
    pub post_type: PostType,
    pub tone: Tone,
    pub language: Language,
    pub search_api_key: Option<String>,
    pub gen_api_key: Option<String>,
    pub result_count: u32,
}

impl PipelineRequest {
    pub fn new(keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            post_type: PostType::default(),
            tone: Tone::default(),
            language: Language::default(),
            search_api_key: None,
            gen_api_key: None,
            result_count: DEFAULT_RESULT_COUNT,
        }
    }

    pub fn with_post_type(mut self, post_type: PostType) -> Self {
        self.post_type = post_type;
        self
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_search_key(mut self, key: impl Into<String>) -> Self {
        self.search_api_key = Some(key.into());
        self
    }

    pub fn with_gen_key(mut self, key: impl Into<String>) -> Self {
        self.gen_api_key = Some(key.into());
        self
    }

    pub fn with_result_count(mut self, count: u32) -> Self {
        self.result_count = count;
        self
    }
}

/// The article, if any, plus every intermediate artifact so the host can
/// show its evidence.
#[derive(Debug, Default)]
pub struct PipelineOutcome {
    pub article: Option<String>,
    pub summaries: Vec<Summary>,
    pub products: Vec<Product>,
    pub gaps: ContentGapReport,
    /// Non-fatal problems met along the way.
    pub warnings: Vec<String>,
    /// Why there is no article.
    pub error: Option<BlogWriterError>,
}

impl PipelineOutcome {
    fn failed(error: BlogWriterError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }
}

fn present(key: &Option<String>) -> Option<&str> {
    key.as_deref().map(str::trim).filter(|k| !k.is_empty())
}

pub struct BlogPipeline {
    search: SearchClient,
    generation: TextGenerationClient,
    summary_limit: usize,
    summary_concurrency: usize,
}

impl BlogPipeline {
    pub fn new(search: Arc<dyn SearchProvider>, generator: Arc<dyn TextGenerator>) -> Self {
        let defaults = Config::default();
        Self {
            search: SearchClient::new(search),
            generation: TextGenerationClient::new(generator),
            summary_limit: defaults.summary_limit,
            summary_concurrency: defaults.summary_concurrency,
        }
    }

    /// Production wiring: Exa for search, Gemini for generation.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(ExaSearcher::from_config(config)),
            Arc::new(GeminiGenerator::from_config(config)),
        )
        .with_retry(RetryPolicy::new(config.generation_max_attempts))
        .with_summary_limit(config.summary_limit)
        .with_summary_concurrency(config.summary_concurrency)
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.generation = self.generation.with_retry(retry);
        self
    }

    pub fn with_summary_limit(mut self, limit: usize) -> Self {
        self.summary_limit = limit;
        self
    }

    pub fn with_summary_concurrency(mut self, concurrency: usize) -> Self {
        self.summary_concurrency = concurrency.max(1);
        self
    }

    /// Run search → summarize → {products, gaps} → synthesize.
    ///
    /// Only blank keywords, a missing key, or a failed synthesis leave the
    /// outcome without an article. Everything upstream of synthesis degrades
    /// to an empty or placeholder value and adds a warning.
    pub async fn run(&self, request: &PipelineRequest) -> PipelineOutcome {
        let keywords = request.keywords.trim();
        if keywords.is_empty() {
            return PipelineOutcome::failed(BlogWriterError::MissingKeywords);
        }

        let Some(search_key) = present(&request.search_api_key) else {
            return PipelineOutcome::failed(BlogWriterError::Configuration(
                "Metaphor API Key is not available! Please provide your API key.".to_string(),
            ));
        };
        let Some(gen_key) = present(&request.gen_api_key) else {
            return PipelineOutcome::failed(BlogWriterError::Configuration(
                "Gemini API Key is not available! Please provide your API key.".to_string(),
            ));
        };

        let result_count = clamp_result_count(request.result_count);
        if result_count != request.result_count {
            info!(
                requested = request.result_count,
                clamped = result_count,
                "Result count clamped"
            );
        }

        let mut warnings = Vec::new();

        // 1. Search
        let results = match self.search.search(keywords, search_key, result_count).await {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, "Continuing without search results");
                warnings.push(format!("Search failed, continuing without competitor research: {e}"));
                Vec::new()
            }
        };

        // 2. Summarize
        let limit = self.summary_limit.min(result_count as usize);
        let summaries = summarize_with_concurrency(
            &self.generation,
            &results,
            gen_key,
            limit,
            self.summary_concurrency,
        )
        .await;

        // 3. Products and gaps read the same summaries independently
        let (extraction, gaps) = tokio::join!(
            extract_products_reported(&self.generation, &summaries, gen_key),
            analyze_gaps(&self.generation, &summaries, gen_key),
        );
        if let Some(warning) = extraction.warning {
            warnings.push(warning);
        }

        // 4. Synthesize
        let generation_request = GenerationRequest {
            keywords: keywords.to_string(),
            post_type: request.post_type.clone(),
            tone: request.tone.clone(),
            language: request.language.clone(),
            result_count,
            products: extraction.products,
            gaps,
            summaries,
        };

        let (article, error) =
            match try_synthesize(&self.generation, &generation_request, gen_key).await {
                Ok(article) => (Some(article), None),
                Err(e) => {
                    warn!(error = %e, "No article produced");
                    (None, Some(e))
                }
            };

        info!(
            keywords,
            results = results.len(),
            summaries = generation_request.summaries.len(),
            products = generation_request.products.len(),
            has_gaps = !generation_request.gaps.is_empty(),
            article = article.is_some(),
            "Pipeline run complete"
        );

        let GenerationRequest {
            summaries,
            products,
            gaps,
            ..
        } = generation_request;

        PipelineOutcome {
            article,
            summaries,
            products,
            gaps,
            warnings,
            error,
        }
    }
}
