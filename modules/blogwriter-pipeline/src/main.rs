use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use blogwriter_common::{Config, Language, PostType, Tone, DEFAULT_RESULT_COUNT};
use blogwriter_pipeline::{BlogPipeline, PipelineOutcome, PipelineRequest};

#[derive(Parser)]
#[command(
    name = "blogwriter",
    about = "Research competitor content for a keyword and draft an SEO blog post"
)]
struct Cli {
    /// Blog keywords; used as both title and keyword list
    #[arg(long, short)]
    keywords: String,

    #[arg(long, default_value = "General", help = choices_help("Post type", PostType::OPTIONS))]
    post_type: String,

    #[arg(long, default_value = "General", help = choices_help("Tone", Tone::OPTIONS))]
    tone: String,

    #[arg(long, default_value = "English", help = choices_help("Language", Language::OPTIONS))]
    language: String,

    /// Number of search results to request (clamped to 10..=100)
    #[arg(long, default_value_t = DEFAULT_RESULT_COUNT)]
    results: u32,

    /// Search API key (overrides METAPHOR_API_KEY / EXA_API_KEY)
    #[arg(long)]
    search_key: Option<String>,

    /// Gemini API key (overrides GEMINI_API_KEY)
    #[arg(long)]
    gen_key: Option<String>,

    /// Maximum number of results to summarize
    #[arg(long)]
    summaries: Option<usize>,

    /// Print summaries, products, and content gaps to stderr
    #[arg(long)]
    show_research: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("blogwriter=info".parse()?))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(limit) = cli.summaries {
        config.summary_limit = limit;
    }
    config.log_redacted();

    let request = PipelineRequest {
        keywords: cli.keywords.clone(),
        post_type: cli.post_type.parse::<PostType>().unwrap_or_default(),
        tone: cli.tone.parse::<Tone>().unwrap_or_default(),
        language: cli.language.parse::<Language>().unwrap_or_default(),
        search_api_key: Config::resolve_key(
            cli.search_key.as_deref(),
            config.search_api_key.as_deref(),
        ),
        gen_api_key: Config::resolve_key(cli.gen_key.as_deref(), config.gemini_api_key.as_deref()),
        result_count: cli.results,
    };

    info!(
        keywords = request.keywords.as_str(),
        post_type = %request.post_type,
        tone = %request.tone,
        language = %request.language,
        "Generating blog post"
    );

    let outcome = BlogPipeline::from_config(&config).run(&request).await;

    if cli.show_research {
        print_research(&outcome);
    }
    for warning in &outcome.warnings {
        eprintln!("warning: {warning}");
    }

    match outcome.article {
        Some(article) => {
            println!("{article}");
            Ok(())
        }
        None => {
            let message = outcome
                .error
                .map(|e| e.user_message())
                .unwrap_or_else(|| "Failed to generate blog post. Please try again!".to_string());
            eprintln!("{message}");
            std::process::exit(1);
        }
    }
}

/// Known choices are listed, but any other value is accepted as custom.
fn choices_help(what: &str, known: &[&str]) -> String {
    format!("{what}: {}, or any custom value", known.join(", "))
}

fn print_research(outcome: &PipelineOutcome) {
    eprintln!("## Competitor summaries\n");
    for s in &outcome.summaries {
        eprintln!(
            "### {}\n{}\n{}\n",
            s.display_title(),
            s.url.as_deref().unwrap_or("unknown"),
            s.summary
        );
    }

    eprintln!("## Products\n");
    if outcome.products.is_empty() {
        eprintln!("(none found)\n");
    }
    for p in &outcome.products {
        eprintln!("- {p}");
    }

    eprintln!("\n## Content gaps\n");
    if outcome.gaps.is_empty() {
        eprintln!("(none identified)");
    } else {
        eprintln!("{}", outcome.gaps);
    }
    eprintln!();
}
