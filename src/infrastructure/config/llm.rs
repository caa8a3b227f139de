//! LLM provider configuration.
//!
//! The language model turns transcripts into structured sets. API keys are
//! read from `ANTHROPIC_API_KEY` or `OPENAI_API_KEY` at runtime, never from
//! the config file.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ConfigError, Result};

/// LLM provider configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LlmConfig {
    /// Defaults to Anthropic.
    #[serde(default)]
    pub provider: LlmProvider,

    #[serde(default, deserialize_with = "anthropic_section")]
    pub anthropic: ModelConfig,

    #[serde(default = "ModelConfig::openai", deserialize_with = "openai_section")]
    pub openai: ModelConfig,
}

/// LLM provider selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Anthropic Claude models.
    #[default]
    Anthropic,
    /// OpenAI GPT models.
    OpenAi,
}

impl LlmProvider {
    /// Environment variable holding the provider's API key.
    #[must_use]
    pub const fn api_key_var(self) -> &'static str {
        match self {
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::OpenAi => "OPENAI_API_KEY",
        }
    }
}

/// Per-provider model settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ModelConfig {
    pub model: String,

    /// Parsing wants deterministic output. Defaults to 0.
    #[serde(default)]
    pub temperature: f64,

    /// A parsed set is a tiny JSON object. Defaults to 1024.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

impl ModelConfig {
    fn openai() -> Self {
        Self {
            model: "gpt-4o-mini".into(),
            ..Self::default()
        }
    }

    /// `names` are the dotted keys reported in errors: model, temperature,
    /// max_tokens.
    #[allow(clippy::result_large_err)]
    fn validate(&self, names: [&'static str; 3]) -> Result<()> {
        let [model, temperature, max_tokens] = names;
        if self.model.trim().is_empty() {
            return Err(ConfigError::MissingField { field: model }.into());
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidValue {
                field: temperature,
                reason: "must be between 0 and 1".to_string(),
            }
            .into());
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                field: max_tokens,
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// A provider section where every key is optional.
#[derive(Deserialize)]
struct PartialModelConfig {
    model: Option<String>,
    temperature: Option<f64>,
    max_tokens: Option<usize>,
}

impl PartialModelConfig {
    fn over(self, base: ModelConfig) -> ModelConfig {
        ModelConfig {
            model: self.model.unwrap_or(base.model),
            temperature: self.temperature.unwrap_or(base.temperature),
            max_tokens: self.max_tokens.unwrap_or(base.max_tokens),
        }
    }
}

fn anthropic_section<'de, D>(deserializer: D) -> std::result::Result<ModelConfig, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(PartialModelConfig::deserialize(deserializer)?.over(ModelConfig::default()))
}

fn openai_section<'de, D>(deserializer: D) -> std::result::Result<ModelConfig, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(PartialModelConfig::deserialize(deserializer)?.over(ModelConfig::openai()))
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: "claude-3-5-sonnet-20241022".into(),
            temperature: 0.0,
            max_tokens: default_max_tokens(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            anthropic: ModelConfig::default(),
            openai: ModelConfig::openai(),
        }
    }
}

impl LlmConfig {
    /// Settings of the selected provider.
    #[must_use]
    pub fn active(&self) -> &ModelConfig {
        match self.provider {
            LlmProvider::Anthropic => &self.anthropic,
            LlmProvider::OpenAi => &self.openai,
        }
    }

    /// Checks both provider sections, active or not.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        self.anthropic.validate([
            "llm.anthropic.model",
            "llm.anthropic.temperature",
            "llm.anthropic.max_tokens",
        ])?;
        self.openai.validate([
            "llm.openai.model",
            "llm.openai.temperature",
            "llm.openai.max_tokens",
        ])
    }
}

const fn default_max_tokens() -> usize {
    1024
}
