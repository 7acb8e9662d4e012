pub mod error;
pub mod gemini;
pub mod traits;
pub mod types;

pub use error::ProviderError;
pub use gemini::GeminiClient;
pub use traits::CompletionProvider;
pub use types::{Completion, GeminiConfig, RawCitation};
