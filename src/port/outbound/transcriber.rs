//! Speech-to-text port.

use async_trait::async_trait;

use crate::error::Result;

/// Converts recorded speech into text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Return the provider name for logging.
    fn name(&self) -> &'static str;

    /// Transcribe an audio clip.
    ///
    /// `filename` is a hint for the container format (Telegram voice notes
    /// are `voice.ogg`).
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects the request or is unreachable.
    async fn transcribe(&self, audio: Vec<u8>, filename: &str) -> Result<String>;
}
