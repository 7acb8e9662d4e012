use crate::providers::{Completion, ProviderError};
use async_trait::async_trait;

/// Generative model with web-search grounding
///
/// Implemented by the Gemini client; tests substitute their own double.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send one instruction pair and wait for the full answer
    async fn complete(
        &self,
        system_instruction: &str,
        user_prompt: &str,
    ) -> Result<Completion, ProviderError>;

    /// Model identifier used for logging
    fn model_name(&self) -> &str;
}
