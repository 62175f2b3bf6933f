pub mod gemini;
pub mod retry;
pub mod traits;
pub mod util;

pub use gemini::Gemini;
pub use retry::RetryPolicy;
pub use traits::{Agent, PromptBuilder};
