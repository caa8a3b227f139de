//! LLM completion port.
//!
//! Defines a generic interface for large language model completion requests.
//! Used to turn transcribed speech into structured sets.

use async_trait::async_trait;

use crate::error::Result;

/// Client for large language model text completion.
///
/// Implementations wrap specific LLM providers (Anthropic, OpenAI) and
/// handle authentication and response parsing.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`): every chat is
/// handled on its own task and they share one client.
#[async_trait]
pub trait Llm: Send + Sync {
    /// Return the provider name for logging.
    fn name(&self) -> &'static str;

    /// Send a completion request and return the generated text.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response is invalid.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
