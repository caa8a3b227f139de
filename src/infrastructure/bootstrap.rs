//! Composition root: builds adapters from configuration and wires them into
//! the journal and the Telegram handler.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use teloxide::Bot;
use tracing::info;

use crate::adapter::inbound::telegram::{run_bot, TelegramHandler};
use crate::adapter::outbound::llm::{Anthropic, OpenAi};
use crate::adapter::outbound::parser::LlmSetParser;
use crate::adapter::outbound::sqlite::database::connection::{open, DbPool};
use crate::adapter::outbound::sqlite::SqliteJournalStore;
use crate::adapter::outbound::transcription::Whisper;
use crate::application::{Journal, JournalSettings};
use crate::domain::TelegramId;
use crate::error::Result;
use crate::infrastructure::config::llm::LlmProvider;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::clock::SystemClock;
use crate::port::outbound::llm::Llm;
use crate::port::outbound::transcriber::Transcriber;

/// Upper bound for a single LLM or transcription request.
const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared HTTP client for the outbound APIs.
pub(crate) fn build_http_client() -> Result<Client> {
    Ok(Client::builder().timeout(HTTP_TIMEOUT).build()?)
}

/// Open (creating if needed) and migrate the configured database.
pub(crate) fn open_database(config: &Config) -> Result<DbPool> {
    let pool = open(&config.database)?;
    info!(path = %config.database.display(), "Database ready");
    Ok(pool)
}

/// Build LLM client from configuration.
pub(crate) fn build_llm_client(config: &Config, http: Client) -> Result<Arc<dyn Llm>> {
    let api_key = config.llm_api_key()?;
    let model = config.llm.active();
    let client: Arc<dyn Llm> = match config.llm.provider {
        LlmProvider::Anthropic => Arc::new(Anthropic::new(
            http,
            api_key,
            &model.model,
            model.max_tokens,
            model.temperature,
        )),
        LlmProvider::OpenAi => Arc::new(OpenAi::new(
            http,
            api_key,
            &model.model,
            model.max_tokens,
            model.temperature,
        )),
    };

    info!(provider = client.name(), model = %model.model, "LLM client initialized");
    Ok(client)
}

pub(crate) fn build_transcriber(config: &Config, http: Client) -> Result<Arc<dyn Transcriber>> {
    let transcriber = Whisper::new(
        http,
        config.openai_api_key()?,
        &config.transcription.model,
        &config.transcription.language,
    );
    info!(
        model = %config.transcription.model,
        language = %config.transcription.language,
        "Transcriber initialized"
    );
    Ok(Arc::new(transcriber))
}

pub(crate) fn journal_settings(config: &Config) -> JournalSettings {
    JournalSettings {
        history_page_size: config.telegram.history_page_size,
        recent_sets: config.telegram.recent_sets,
    }
}

/// Wire the journal service over the real adapters.
pub(crate) fn build_journal(config: &Config, pool: DbPool) -> Result<Journal> {
    let http = build_http_client()?;
    let llm = build_llm_client(config, http.clone())?;
    let transcriber = build_transcriber(config, http)?;

    Ok(Journal::new(
        Arc::new(SqliteJournalStore::new(pool)),
        transcriber,
        Arc::new(LlmSetParser::new(llm)),
        Arc::new(SystemClock),
        journal_settings(config),
    ))
}

pub(crate) fn build_handler(config: &Config, journal: Journal) -> TelegramHandler {
    let allowed = config
        .telegram
        .allowed_users
        .iter()
        .copied()
        .map(TelegramId::new);
    TelegramHandler::new(Arc::new(journal), allowed, config.telegram.insight_limit)
}

/// Start the bot and block until shutdown.
pub async fn run(config: &Config) -> Result<()> {
    let token = config.telegram_bot_token()?.to_string();
    let pool = open_database(config)?;
    let journal = build_journal(config, pool)?;
    let handler = Arc::new(build_handler(config, journal));

    if config.telegram.allowed_users.is_empty() {
        info!("Bot is open to all Telegram users");
    } else {
        info!(users = config.telegram.allowed_users.len(), "Bot restricted to allow-list");
    }

    run_bot(Bot::new(token), handler).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Error};

    fn config_with_keys(pairs: &[(&'static str, &'static str)]) -> Config {
        let mut config = Config::default();
        let pairs = pairs.to_vec();
        config.apply_env_from(move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        });
        config
    }

    #[test]
    fn llm_client_follows_provider() {
        let config = config_with_keys(&[("ANTHROPIC_API_KEY", "a"), ("OPENAI_API_KEY", "o")]);
        let http = build_http_client().unwrap();
        assert_eq!(build_llm_client(&config, http.clone()).unwrap().name(), "anthropic");

        let mut config = config;
        config.llm.provider = LlmProvider::OpenAi;
        assert_eq!(build_llm_client(&config, http).unwrap().name(), "openai");
    }

    #[test]
    fn missing_keys_are_reported_by_name() {
        let config = config_with_keys(&[("ANTHROPIC_API_KEY", "a")]);
        let db = crate::testkit::TempJournalDb::new();
        let err = build_journal(&config, db.pool()).err().unwrap();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField {
                field: "OPENAI_API_KEY"
            })
        ));
    }

    #[test]
    fn settings_are_forwarded() {
        let mut config = Config::default();
        config.telegram.history_page_size = 8;
        config.telegram.recent_sets = 3;
        assert_eq!(
            journal_settings(&config),
            JournalSettings {
                history_page_size: 8,
                recent_sets: 3
            }
        );
    }
}
