pub mod gaps;
pub mod generation;
pub mod pipeline;
pub mod products;
pub mod search;
pub mod summarizer;
pub mod synthesizer;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;

pub use generation::{GeminiGenerator, TextGenerationClient};
pub use pipeline::{BlogPipeline, PipelineOutcome, PipelineRequest};
pub use search::{ExaSearcher, SearchClient};
pub use traits::{SearchProvider, TextGenerator};
