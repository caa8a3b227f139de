//! Handler for the `run` command.

use tracing::info;

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::{load_config, output};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::logging::LogFormat;
use crate::infrastructure::config::settings::Config;

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let mut config = load_config(&args.source)?;
    apply_overrides(&mut config, args);
    config.init_logging();

    if !output::is_quiet() {
        output::header(env!("CARGO_PKG_VERSION"));
        print_startup(&config);
    }

    info!("gymlog starting");
    bootstrap::run(&config).await?;
    info!("gymlog stopped");
    Ok(())
}

fn apply_overrides(config: &mut Config, args: &RunArgs) {
    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    }
    if args.json_logs || output::is_json() {
        config.logging.format = LogFormat::Json;
    }
}

fn print_startup(config: &Config) {
    output::section("Startup");
    output::field("Database", config.database.display());
    output::field("LLM", format!("{:?}", config.llm.provider).to_lowercase());
    output::field("Model", &config.llm.active().model);
    output::field("Speech", &config.transcription.model);
    let access = if config.telegram.allowed_users.is_empty() {
        "everyone".to_string()
    } else {
        format!("{} user(s)", config.telegram.allowed_users.len())
    };
    output::field("Access", access);
    output::note("Press Ctrl-C to stop.");
}
