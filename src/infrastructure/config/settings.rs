//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Settings come from an optional TOML file; secrets and the database path
//! come from the environment (a `.env` file is loaded by the binary).
//!
//! # Example
//!
//! ```no_run
//! use gymlog::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Some("gymlog.toml".as_ref()))?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::llm::LlmConfig;
use super::logging::LoggingConfig;
use super::telegram::TelegramAppConfig;
use super::transcription::TranscriptionConfig;
use crate::error::{ConfigError, Result};

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "gymlog.toml";

/// Database location when neither the environment nor the file names one.
pub const DEFAULT_DATABASE_PATH: &str = "data/gym.db";

pub const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";

/// API credentials. Only ever read from the environment.
#[derive(Clone, Default)]
pub struct Secrets {
    pub telegram_bot_token: Option<String>,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |v: &Option<String>| if v.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("Secrets")
            .field("telegram_bot_token", &mask(&self.telegram_bot_token))
            .field("openai_api_key", &mask(&self.openai_api_key))
            .field("anthropic_api_key", &mask(&self.anthropic_api_key))
            .finish()
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Path to the SQLite database file.
    ///
    /// `DATABASE_URL` or `DB_PATH` override it; defaults to `data/gym.db`.
    #[serde(default = "default_database_path")]
    pub database: PathBuf,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub telegram: TelegramAppConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub transcription: TranscriptionConfig,

    #[serde(skip)]
    pub secrets: Secrets,
}

fn default_database_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE_PATH)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            logging: LoggingConfig::default(),
            telegram: TelegramAppConfig::default(),
            llm: LlmConfig::default(),
            transcription: TranscriptionConfig::default(),
            secrets: Secrets::default(),
        }
    }
}

/// Strip an optional `sqlite://` or `sqlite:` scheme from a database URL.
#[must_use]
pub fn database_path_from_url(url: &str) -> PathBuf {
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);
    PathBuf::from(path)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Does not consult the environment; see [`Config::apply_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration and apply environment overrides.
    ///
    /// With `path = None`, `gymlog.toml` in the working directory is used if
    /// present, otherwise built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file cannot be read, the TOML
    /// is malformed, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::read(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::read(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Apply process environment overrides.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup.
    ///
    /// `DATABASE_URL` wins over `DB_PATH`; both win over the file.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        self.secrets = Secrets {
            telegram_bot_token: non_empty(lookup(TELEGRAM_BOT_TOKEN)),
            openai_api_key: non_empty(lookup(OPENAI_API_KEY)),
            anthropic_api_key: non_empty(lookup(ANTHROPIC_API_KEY)),
        };

        if let Some(url) = non_empty(lookup("DATABASE_URL")) {
            self.database = database_path_from_url(&url);
        } else if let Some(path) = non_empty(lookup("DB_PATH")) {
            self.database = PathBuf::from(path);
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.database.as_os_str().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }
        if self.telegram.history_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history_page_size",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.telegram.recent_sets == 0 {
            return Err(ConfigError::InvalidValue {
                field: "recent_sets",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.transcription.model.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "transcription.model",
            }
            .into());
        }
        if self.transcription.language.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "language",
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        self.llm.validate()?;
        Ok(())
    }

    /// Bot token, required to run the bot.
    #[allow(clippy::result_large_err)]
    pub fn telegram_bot_token(&self) -> Result<&str> {
        require(&self.secrets.telegram_bot_token, TELEGRAM_BOT_TOKEN)
    }

    /// Key for the speech-to-text API.
    #[allow(clippy::result_large_err)]
    pub fn openai_api_key(&self) -> Result<&str> {
        require(&self.secrets.openai_api_key, OPENAI_API_KEY)
    }

    /// Key for the selected LLM provider.
    #[allow(clippy::result_large_err)]
    pub fn llm_api_key(&self) -> Result<&str> {
        match self.llm.provider {
            super::llm::LlmProvider::Anthropic => {
                require(&self.secrets.anthropic_api_key, ANTHROPIC_API_KEY)
            }
            super::llm::LlmProvider::OpenAi => self.openai_api_key(),
        }
    }

    /// Effective settings rendered as TOML (secrets excluded).
    #[allow(clippy::result_large_err)]
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Other(e.to_string()).into())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn require<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| ConfigError::MissingField { field }.into())
}
