//! Handler for the `migrate` command.

use crate::adapter::inbound::cli::command::SourceArgs;
use crate::adapter::inbound::cli::{load_config, output};
use crate::error::Result;
use crate::infrastructure::bootstrap;

/// Create the database file if needed and apply pending migrations.
pub fn execute(source: &SourceArgs) -> Result<()> {
    let config = load_config(source)?;
    bootstrap::open_database(&config)?;

    output::success("Database is up to date");
    output::field("Path", config.database.display());
    Ok(())
}
