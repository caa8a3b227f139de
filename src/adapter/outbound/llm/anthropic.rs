//! Anthropic Claude LLM client.
//!
//! Provides an implementation of the [`Llm`] trait for the Anthropic
//! Messages API. Used to extract sets from transcribed speech.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::port::outbound::llm::Llm;

/// Anthropic Messages API endpoint.
const API_URL: &str = "https://api.anthropic.com/v1/messages";

/// API version header value.
const API_VERSION: &str = "2023-06-01";

/// Anthropic Claude API client.
#[derive(Debug, Clone)]
pub struct Anthropic {
    client: Client,
    api_key: String,
    /// Model identifier (e.g., "claude-haiku-4-5").
    model: String,
    max_tokens: usize,
    temperature: f64,
}

impl Anthropic {
    /// Create a new Anthropic client sharing an existing HTTP client.
    #[must_use]
    pub fn new(
        client: Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
        max_tokens: usize,
        temperature: f64,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            max_tokens,
            temperature,
        }
    }

    fn request<'a>(&'a self, prompt: &'a str) -> Request<'a> {
        Request {
            model: &self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        }
    }
}

#[derive(Serialize)]
struct Request<'a> {
    model: &'a str,
    max_tokens: usize,
    temperature: f64,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct Response {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl Response {
    fn into_text(self) -> Result<String> {
        let text: String = self
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text)
            .collect();
        if text.trim().is_empty() {
            return Err(Error::Parse("anthropic returned no text".to_string()));
        }
        Ok(text)
    }
}

#[async_trait]
impl Llm for Anthropic {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        debug!(model = %self.model, "Sending completion request");
        let response = self
            .client
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&self.request(prompt))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Connection(e.to_string()))?
            .json::<Response>()
            .await?;

        response.into_text()
    }
}


/// Integration tests that require real API access.
/// Run with: `cargo test --features integration-tests -- --ignored`
#[cfg(all(test, feature = "integration-tests"))]
mod integration_tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    #[ignore = "requires ANTHROPIC_API_KEY and network access"]
    async fn simple_completion() {
        let Ok(key) = std::env::var("ANTHROPIC_API_KEY") else {
            eprintln!("Skipping Anthropic integration test: ANTHROPIC_API_KEY not set");
            return;
        };
        let client = Anthropic::new(Client::new(), key, "claude-haiku-4-5", 64, 0.0);

        let result = tokio::time::timeout(
            Duration::from_secs(30),
            client.complete("Say 'hello' and nothing else."),
        )
        .await
        .expect("Request timed out")
        .expect("API call failed");

        assert!(result.to_lowercase().contains("hello"), "{result}");
    }
}
