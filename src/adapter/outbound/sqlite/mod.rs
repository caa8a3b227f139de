//! SQLite persistence adapters.
//!
//! Provides the SQLite-backed journal store using Diesel ORM.

pub mod database;
pub mod store;

pub use store::SqliteJournalStore;
