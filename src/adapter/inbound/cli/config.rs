//! Handler for the `config` command group.

use crate::adapter::inbound::cli::command::SourceArgs;
use crate::adapter::inbound::cli::{load_config, output};
use crate::error::Result;
use crate::infrastructure::config::settings::{
    Config, ANTHROPIC_API_KEY, OPENAI_API_KEY, TELEGRAM_BOT_TOKEN,
};

/// Execute `config show`.
pub fn execute_show(source: &SourceArgs) -> Result<()> {
    let config = load_config(source)?;

    if output::is_json() {
        output::field("config", config.to_toml()?);
    } else {
        print!("{}", config.to_toml()?);
    }

    output::section("Secrets");
    for (name, set) in secret_status(&config) {
        output::field(name, output::secret_status(set));
    }
    Ok(())
}

/// Execute `config validate`.
///
/// Parsing and value checks happen on load; this additionally reports the
/// secrets `run` will need.
pub fn execute_validate(source: &SourceArgs) -> Result<()> {
    let config = load_config(source)?;
    output::success("Configuration is valid");

    let missing: Vec<&str> = [
        (TELEGRAM_BOT_TOKEN, config.telegram_bot_token().is_ok()),
        (OPENAI_API_KEY, config.openai_api_key().is_ok()),
        (config.llm.provider.api_key_var(), config.llm_api_key().is_ok()),
    ]
    .into_iter()
    .filter(|(_, set)| !set)
    .map(|(name, _)| name)
    .collect();

    for name in dedup(missing) {
        output::warning(&format!("{name} is not set; `gymlog run` will fail"));
    }
    Ok(())
}

fn secret_status(config: &Config) -> [(&'static str, bool); 3] {
    [
        (TELEGRAM_BOT_TOKEN, config.secrets.telegram_bot_token.is_some()),
        (OPENAI_API_KEY, config.secrets.openai_api_key.is_some()),
        (ANTHROPIC_API_KEY, config.secrets.anthropic_api_key.is_some()),
    ]
}

fn dedup(mut names: Vec<&str>) -> Vec<&str> {
    names.sort_unstable();
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_status_reflects_environment() {
        let mut config = Config::default();
        config.apply_env_from(|key| (key == OPENAI_API_KEY).then(|| "sk-test".to_string()));

        let status = secret_status(&config);
        assert_eq!(
            status,
            [
                (TELEGRAM_BOT_TOKEN, false),
                (OPENAI_API_KEY, true),
                (ANTHROPIC_API_KEY, false),
            ]
        );
    }

    #[test]
    fn dedup_collapses_repeated_names() {
        assert_eq!(
            dedup(vec![OPENAI_API_KEY, TELEGRAM_BOT_TOKEN, OPENAI_API_KEY]),
            vec![OPENAI_API_KEY, TELEGRAM_BOT_TOKEN]
        );
    }
}
