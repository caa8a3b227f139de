//! OpenAI Whisper transcription client.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::debug;

use crate::domain::DomainError;
use crate::error::{Error, Result};
use crate::port::outbound::transcriber::Transcriber;

/// OpenAI audio transcription endpoint.
const API_URL: &str = "https://api.openai.com/v1/audio/transcriptions";

/// Whisper API client.
///
/// Sends the clip as `multipart/form-data` and asks for a plain-text reply.
#[derive(Debug, Clone)]
pub struct Whisper {
    client: Client,
    api_key: String,
    /// Model identifier (e.g., "whisper-1").
    model: String,
    /// ISO-639-1 language hint (e.g., "ru").
    language: String,
}

impl Whisper {
    /// Create a new Whisper client sharing an existing HTTP client.
    #[must_use]
    pub fn new(
        client: Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            language: language.into(),
        }
    }

    fn form(&self, audio: Vec<u8>, filename: &str) -> Result<Form> {
        let part = Part::bytes(audio)
            .file_name(filename.to_string())
            .mime_str(mime_for(filename))?;
        Ok(Form::new()
            .text("model", self.model.clone())
            .text("language", self.language.clone())
            .text("response_format", "text")
            .part("file", part))
    }
}

/// Content type for a clip based on its extension.
fn mime_for(filename: &str) -> &'static str {
    match filename.rsplit('.').next().map(str::to_ascii_lowercase).as_deref() {
        Some("ogg" | "oga") => "audio/ogg",
        Some("mp3") => "audio/mpeg",
        Some("m4a") => "audio/mp4",
        Some("wav") => "audio/wav",
        Some("webm") => "audio/webm",
        _ => "application/octet-stream",
    }
}

/// Trim the plain-text reply and reject silence.
fn clean_transcript(raw: &str) -> Result<String> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(DomainError::EmptyTranscript.into());
    }
    Ok(text.to_string())
}

#[async_trait]
impl Transcriber for Whisper {
    fn name(&self) -> &'static str {
        "whisper"
    }

    async fn transcribe(&self, audio: Vec<u8>, filename: &str) -> Result<String> {
        let bytes = audio.len();
        let form = self.form(audio, filename)?;

        let response = self
            .client
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Transcription(format!("{status}: {}", body.trim())));
        }

        debug!(bytes, chars = body.len(), "Transcribed voice message");
        clean_transcript(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_for_known_extensions() {
        assert_eq!(mime_for("voice.ogg"), "audio/ogg");
        assert_eq!(mime_for("VOICE.OGA"), "audio/ogg");
        assert_eq!(mime_for("clip.mp3"), "audio/mpeg");
        assert_eq!(mime_for("noext"), "application/octet-stream");
    }

    #[test]
    fn clean_transcript_trims_and_rejects_blank() {
        assert_eq!(clean_transcript("  жим 80 на 5\n").unwrap(), "жим 80 на 5");
        assert!(matches!(
            clean_transcript(" \n"),
            Err(Error::Domain(DomainError::EmptyTranscript))
        ));
    }

    #[test]
    fn form_builds_for_voice_note() {
        let whisper = Whisper::new(Client::new(), "key", "whisper-1", "ru");
        assert!(whisper.form(vec![0, 1, 2], "voice.ogg").is_ok());
        assert_eq!(whisper.name(), "whisper");
    }
}
