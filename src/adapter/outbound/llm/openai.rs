//! OpenAI LLM client.
//!
//! Provides an implementation of the [`Llm`] trait for the OpenAI
//! Chat Completions API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::port::outbound::llm::Llm;

/// OpenAI Chat Completions API endpoint.
const API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI API client.
#[derive(Debug, Clone)]
pub struct OpenAi {
    client: Client,
    api_key: String,
    /// Model identifier (e.g., "gpt-4o-mini").
    model: String,
    max_tokens: usize,
    temperature: f64,
}

impl OpenAi {
    /// Create a new OpenAI client sharing an existing HTTP client.
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
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl Response {
    fn into_text(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| Error::Parse("openai returned no text".to_string()))
    }
}

#[async_trait]
impl Llm for OpenAi {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        debug!(model = %self.model, "Sending completion request");
        let response = self
            .client
            .post(API_URL)
            .bearer_auth(&self.api_key)
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
