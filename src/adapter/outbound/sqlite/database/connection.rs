//! Database connection management using Diesel ORM.
//!
//! Provides connection pooling, migration support, and connection
//! configuration for the SQLite journal database.

use std::path::Path;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Type alias for a SQLite connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Applies per-connection pragmas whenever the pool opens a connection.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        configure_sqlite_connection(conn).map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Enable foreign keys (for cascading user deletes) and wait on locks
/// instead of failing immediately.
///
/// # Errors
/// Returns an error if a pragma fails to apply.
pub fn configure_sqlite_connection(
    conn: &mut SqliteConnection,
) -> std::result::Result<(), diesel::result::Error> {
    conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
}

/// Create a connection pool for the given database URL.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(database_url: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(5)
        .connection_customizer(Box::new(SqlitePragmas))
        .build(manager)
        .map_err(|e| Error::Connection(e.to_string()))
}

/// Run all pending database migrations.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Database(e.to_string()))?;
    if applied.is_empty() {
        debug!("Database schema is up to date");
    } else {
        info!(count = applied.len(), "Applied database migrations");
    }
    Ok(())
}

/// Open the journal database at `path`, creating parent directories and
/// bringing the schema up to date.
///
/// # Errors
/// Returns an error if the directory cannot be created, the database cannot
/// be opened, or a migration fails.
pub fn open(path: &Path) -> Result<DbPool> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let url = path.to_string_lossy();
    let pool = create_pool(&url)?;
    run_migrations(&pool)?;
    info!(path = %path.display(), "Opened journal database");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::prelude::*;

    #[derive(diesel::QueryableByName)]
    struct TableName {
        #[diesel(sql_type = diesel::sql_types::Text)]
        name: String,
    }

    #[derive(diesel::QueryableByName)]
    struct PragmaValue {
        #[diesel(sql_type = diesel::sql_types::Integer)]
        foreign_keys: i32,
    }

    #[test]
    fn create_pool_with_memory_db() {
        let pool = create_pool(":memory:");
        assert!(pool.is_ok());
    }

    #[test]
    fn open_creates_parent_directories_and_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("gym.db");

        let pool = open(&path).unwrap();
        assert!(path.exists());

        let mut conn = pool.get().unwrap();
        let tables: Vec<String> = diesel::sql_query(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name",
        )
        .load::<TableName>(&mut conn)
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();

        assert_eq!(tables, vec!["entries".to_string(), "users".to_string()]);
    }

    #[test]
    fn run_migrations_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gym.db");
        let pool = open(&path).unwrap();

        run_migrations(&pool).unwrap();
        run_migrations(&pool).unwrap();

        let pool = open(&path).unwrap();
        assert!(pool.get().is_ok());
    }

    #[test]
    fn pooled_connections_enforce_foreign_keys() {
        let pool = create_pool(":memory:").unwrap();
        let mut conn = pool.get().unwrap();
        let value = diesel::sql_query("PRAGMA foreign_keys")
            .get_result::<PragmaValue>(&mut conn)
            .unwrap();
        assert_eq!(value.foreign_keys, 1);
    }
}
