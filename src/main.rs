use clap::Parser;
use gymlog::adapter::inbound::cli::command::{Cli, Commands, ConfigCommand};
use gymlog::adapter::inbound::cli::output::{self, OutputConfig};
use gymlog::adapter::inbound::cli::{config, export, migrate, run};
use gymlog::error::Result;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    let result = tokio::select! {
        result = dispatch(cli.command) => result,
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
            Ok(())
        }
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run(args) => run::execute(&args).await,
        Commands::Migrate(source) => migrate::execute(&source),
        Commands::Export(args) => export::execute(&args).await,
        Commands::Config(ConfigCommand::Show(source)) => config::execute_show(&source),
        Commands::Config(ConfigCommand::Validate(source)) => config::execute_validate(&source),
    }
}
