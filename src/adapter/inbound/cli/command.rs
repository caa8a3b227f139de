//! Command-line interface definitions.
//!
//! Defines the CLI structure for the gymlog binary using `clap`: running the
//! bot, preparing the database, exporting a journal and inspecting the
//! effective configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Voice-driven workout journal for Telegram
#[derive(Parser, Debug)]
#[command(name = "gymlog")]
#[command(version, about)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the gymlog CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the Telegram bot (foreground)
    Run(RunArgs),

    /// Create the database and apply pending migrations
    Migrate(SourceArgs),

    /// Export one user's journal as CSV
    Export(ExportArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `gymlog config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults and environment applied.
    Show(SourceArgs),
    /// Validate configuration and report missing secrets.
    Validate(SourceArgs),
}

/// Where configuration and data come from.
///
/// Without `--config`, `gymlog.toml` in the working directory is used when
/// present. `--database` wins over `DATABASE_URL`, `DB_PATH` and the file.
#[derive(Parser, Debug, Default, Clone)]
pub struct SourceArgs {
    /// Path to the configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite database file.
    #[arg(long)]
    pub database: Option<PathBuf>,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Override log level (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty-printed logs.
    #[arg(long)]
    pub json_logs: bool,
}

/// Arguments for the `export` subcommand.
#[derive(Parser, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Telegram user id whose journal to export.
    #[arg(long)]
    pub telegram_id: i64,

    /// Output file path (writes to stdout if not specified).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
        assert_eq!(Cli::command().get_name(), "gymlog");
        assert!(Cli::command().get_version().is_some());
    }

    #[test]
    fn run_defaults() {
        let cli = Cli::try_parse_from(["gymlog", "run"]).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("Expected Run command");
        };
        assert!(args.source.config.is_none());
        assert!(args.source.database.is_none());
        assert!(args.log_level.is_none());
        assert!(!args.json_logs);
        assert!(!cli.json);
        assert!(!cli.quiet);
    }

    #[test]
    fn run_overrides() {
        let cli = Cli::try_parse_from([
            "gymlog",
            "run",
            "-c",
            "custom.toml",
            "--database",
            "/tmp/gym.db",
            "--log-level",
            "debug",
            "--json-logs",
        ])
        .unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("Expected Run command");
        };
        assert_eq!(args.source.config, Some(PathBuf::from("custom.toml")));
        assert_eq!(args.source.database, Some(PathBuf::from("/tmp/gym.db")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.json_logs);
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["gymlog", "migrate", "--json", "-q"]).unwrap();
        assert!(cli.json);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Migrate(_)));
    }

    #[test]
    fn export_requires_telegram_id() {
        assert!(Cli::try_parse_from(["gymlog", "export"]).is_err());

        let cli = Cli::try_parse_from(["gymlog", "export", "--telegram-id", "42", "-o", "out.csv"])
            .unwrap();
        let Commands::Export(args) = cli.command else {
            panic!("Expected Export command");
        };
        assert_eq!(args.telegram_id, 42);
        assert_eq!(args.output, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn config_subcommands() {
        let cli = Cli::try_parse_from(["gymlog", "config", "show"]).unwrap();
        assert!(matches!(cli.command, Commands::Config(ConfigCommand::Show(_))));

        let cli = Cli::try_parse_from(["gymlog", "config", "validate", "-c", "x.toml"]).unwrap();
        let Commands::Config(ConfigCommand::Validate(args)) = cli.command else {
            panic!("Expected config validate");
        };
        assert_eq!(args.config, Some(PathBuf::from("x.toml")));
    }
}
