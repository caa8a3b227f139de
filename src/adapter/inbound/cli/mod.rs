//! CLI module graph.

pub mod command;
pub mod config;
pub mod export;
pub mod migrate;
pub mod output;
pub mod run;

use command::SourceArgs;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Load configuration for a command, applying the `--database` override last.
pub(crate) fn load_config(source: &SourceArgs) -> Result<Config> {
    let mut config = Config::load(source.config.as_deref())?;
    if let Some(database) = &source.database {
        config.database.clone_from(database);
    }
    Ok(config)
}
