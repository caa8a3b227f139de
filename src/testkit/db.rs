//! Temporary SQLite journals.
//!
//! `:memory:` cannot be used with a pool: each pooled connection would see
//! its own empty database.

use std::path::PathBuf;

use tempfile::TempDir;

use crate::adapter::outbound::sqlite::database::connection::{open, DbPool};
use crate::adapter::outbound::sqlite::SqliteJournalStore;

/// Migrated database file that is removed on drop.
pub struct TempJournalDb {
    dir: TempDir,
    pool: DbPool,
}

impl TempJournalDb {
    /// Create and migrate a fresh database.
    ///
    /// # Panics
    /// Panics if the temp directory or database cannot be created.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let pool = open(&dir.path().join("gym.db")).expect("open temp journal");
        Self { dir, pool }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("gym.db")
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn store(&self) -> SqliteJournalStore {
        SqliteJournalStore::new(self.pool())
    }
}

impl Default for TempJournalDb {
    fn default() -> Self {
        Self::new()
    }
}
