//! Scripted language-model and speech doubles.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::port::outbound::llm::Llm;
use crate::port::outbound::transcriber::Transcriber;

/// LLM double.
///
/// Queued replies are consumed first; afterwards every call gets the
/// default reply. Prompts are recorded for assertions.
#[derive(Debug, Default)]
pub struct MockLlm {
    default: Option<String>,
    queue: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl MockLlm {
    /// Always answer with `response`.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default: Some(response.into()),
            ..Self::default()
        }
    }

    /// Answer each call with the next scripted reply, then fail.
    pub fn scripted<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            default: None,
            queue: Mutex::new(responses.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Fail every call.
    pub fn failing() -> Self {
        Self::default()
    }

    /// Queue a reply ahead of the default.
    pub fn push(&self, response: impl Into<String>) {
        self.queue.lock().push_back(response.into());
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl Llm for MockLlm {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().push(prompt.to_string());
        if let Some(next) = self.queue.lock().pop_front() {
            return Ok(next);
        }
        self.default
            .clone()
            .ok_or_else(|| Error::Connection("mock llm has no reply".to_string()))
    }
}

/// Speech-to-text double that returns a fixed transcript.
#[derive(Debug)]
pub struct MockTranscriber {
    reply: std::result::Result<String, String>,
    calls: Mutex<Vec<(usize, String)>>,
}

impl MockTranscriber {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            reply: Err(reason.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(audio length, filename)` per call.
    pub fn calls(&self) -> Vec<(usize, String)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn transcribe(&self, audio: Vec<u8>, filename: &str) -> Result<String> {
        self.calls.lock().push((audio.len(), filename.to_string()));
        self.reply.clone().map_err(Error::Transcription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn queued_replies_come_before_default() {
        let llm = MockLlm::new("default");
        llm.push("first");
        assert_eq!(llm.complete("a").await.unwrap(), "first");
        assert_eq!(llm.complete("b").await.unwrap(), "default");
        assert_eq!(llm.prompts(), vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn scripted_llm_fails_when_exhausted() {
        let llm = MockLlm::scripted(["one"]);
        assert_eq!(llm.complete("x").await.unwrap(), "one");
        assert!(llm.complete("x").await.is_err());
    }

    #[tokio::test]
    async fn transcriber_records_calls() {
        let speech = MockTranscriber::new("присед 100 на 5");
        assert_eq!(
            speech.transcribe(vec![1, 2, 3], "voice.ogg").await.unwrap(),
            "присед 100 на 5"
        );
        assert_eq!(speech.calls(), vec![(3, "voice.ogg".to_string())]);
        assert!(MockTranscriber::failing("boom")
            .transcribe(vec![], "voice.ogg")
            .await
            .is_err());
    }
}
