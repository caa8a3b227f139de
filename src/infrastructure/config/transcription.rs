//! Speech-to-text configuration.

use serde::{Deserialize, Serialize};

/// Whisper settings. The API key comes from `OPENAI_API_KEY`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    pub model: String,
    /// ISO-639-1 hint for the recognizer.
    pub language: String,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model: "whisper-1".into(),
            language: "ru".into(),
        }
    }
}
