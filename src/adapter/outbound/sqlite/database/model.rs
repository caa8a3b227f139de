//! Database model types for Diesel ORM.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use super::schema::{entries, users};
use crate::domain::{Entry, EntryId, EntryPatch, NewEntry, UserId};
use crate::error::{Error, Result};

/// Storage format for `created_at` columns.
///
/// Local wall-clock time; lexicographic order equals chronological order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a timestamp for storage.
#[must_use]
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp.
///
/// # Errors
/// Returns a parse error if the column holds something else.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map_err(|e| Error::Parse(format!("bad timestamp `{raw}`: {e}")))
}

/// Database row for a user (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    pub telegram_id: i64,
    pub created_at: String,
}

/// Database row for a logged set (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EntryRow {
    pub id: i32,
    pub user_id: i32,
    pub exercise: String,
    pub exercise_raw: String,
    pub weight: Option<f64>,
    pub reps: Option<i32>,
    pub comment: Option<String>,
    pub created_at: String,
}

impl TryFrom<EntryRow> for Entry {
    type Error = Error;

    fn try_from(row: EntryRow) -> Result<Self> {
        Ok(Entry {
            id: EntryId::new(row.id),
            user_id: UserId::new(row.user_id),
            exercise: row.exercise,
            exercise_raw: row.exercise_raw,
            weight: row.weight,
            reps: row.reps,
            comment: row.comment,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

/// Database row for a logged set (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = entries)]
pub struct NewEntryRow {
    pub user_id: i32,
    pub exercise: String,
    pub exercise_raw: String,
    pub weight: Option<f64>,
    pub reps: Option<i32>,
    pub comment: Option<String>,
    pub created_at: String,
}

impl From<NewEntry> for NewEntryRow {
    fn from(entry: NewEntry) -> Self {
        Self {
            user_id: entry.user_id.get(),
            exercise: entry.exercise,
            exercise_raw: entry.exercise_raw,
            weight: entry.weight,
            reps: entry.reps,
            comment: entry.comment,
            created_at: format_timestamp(entry.created_at),
        }
    }
}

/// Partial update of a logged set.
///
/// `None` fields are left untouched; `comment: Some(None)` clears the column.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = entries)]
pub struct EntryChangeset {
    pub exercise: Option<String>,
    pub exercise_raw: Option<String>,
    pub weight: Option<f64>,
    pub reps: Option<i32>,
    pub comment: Option<Option<String>>,
}

impl From<EntryPatch> for EntryChangeset {
    fn from(patch: EntryPatch) -> Self {
        Self {
            exercise: patch.exercise,
            exercise_raw: patch.exercise_raw,
            weight: patch.weight,
            reps: patch.reps,
            comment: patch.comment,
        }
    }
}
