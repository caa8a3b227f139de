//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the journal's use cases.

pub mod analytics;
pub mod journal;

pub use journal::{
    export_entries, Edited, ExerciseReport, HistoryPage, Journal, JournalSettings, LoggedSet,
    StatsOverview, TodayReport,
};
