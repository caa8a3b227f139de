//! Persistence port for the workout journal.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    Entry, EntryId, EntryPatch, ExerciseStats, NewEntry, TelegramId, TotalStats, Training, UserId,
};
use crate::error::Result;

/// Storage operations for users and their logged sets.
///
/// Dates are calendar days in the user's local time; "before" bounds are
/// exclusive.
#[async_trait]
pub trait JournalStore: Send + Sync {
    /// Look up a user by Telegram identity, registering it on first contact.
    async fn get_or_create_user(&self, telegram_id: TelegramId) -> Result<UserId>;

    /// Look up a user without registering.
    async fn find_user(&self, telegram_id: TelegramId) -> Result<Option<UserId>>;

    /// Insert a set and return the stored entry.
    async fn add_entry(&self, entry: NewEntry) -> Result<Entry>;

    async fn get_entry(&self, id: EntryId) -> Result<Option<Entry>>;

    /// Apply a patch. Returns `None` when the entry does not exist.
    async fn update_entry(&self, id: EntryId, patch: EntryPatch) -> Result<Option<Entry>>;

    /// Delete an entry. Returns whether a row was removed.
    async fn delete_entry(&self, id: EntryId) -> Result<bool>;

    /// Sets logged on `date`, oldest first.
    async fn entries_on(&self, user: UserId, date: NaiveDate) -> Result<Vec<Entry>>;

    /// Every set of the user, oldest first.
    async fn all_entries(&self, user: UserId) -> Result<Vec<Entry>>;

    /// Number of distinct days with at least one set.
    async fn training_count(&self, user: UserId) -> Result<i64>;

    async fn last_entry_date(&self, user: UserId) -> Result<Option<NaiveDate>>;

    /// Most recent sets of one exercise, newest first.
    async fn exercise_history(
        &self,
        user: UserId,
        exercise: &str,
        limit: i64,
    ) -> Result<Vec<Entry>>;

    async fn exercise_max_weight(&self, user: UserId, exercise: &str) -> Result<Option<f64>>;

    /// Best rep count, optionally restricted to one exact weight.
    async fn exercise_max_reps(
        &self,
        user: UserId,
        exercise: &str,
        weight: Option<f64>,
    ) -> Result<Option<i32>>;

    /// Most recent set of an exercise, optionally only from days before `before`.
    async fn last_exercise_entry(
        &self,
        user: UserId,
        exercise: &str,
        before: Option<NaiveDate>,
    ) -> Result<Option<Entry>>;

    /// Trainings grouped by day, newest day first; entries within a day oldest first.
    async fn recent_trainings(&self, user: UserId, offset: i64, limit: i64)
        -> Result<Vec<Training>>;

    /// Distinct exercise names, alphabetical.
    async fn exercises(&self, user: UserId) -> Result<Vec<String>>;

    async fn exercise_stats(&self, user: UserId, exercise: &str) -> Result<ExerciseStats>;

    async fn total_stats(&self, user: UserId) -> Result<TotalStats>;
}
