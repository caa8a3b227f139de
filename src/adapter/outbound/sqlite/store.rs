//! SQLite journal store implementation.
//!
//! Provides persistent storage for users and logged sets using SQLite and
//! Diesel ORM. Diesel is synchronous, so every operation runs on the
//! blocking thread pool.

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use diesel::dsl::max;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Integer, Nullable, Text};
use diesel::SqliteConnection;
use tracing::debug;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{
    format_timestamp, EntryChangeset, EntryRow, NewEntryRow, NewUserRow,
};
use crate::adapter::outbound::sqlite::database::schema::{entries, users};
use crate::domain::stats::round1;
use crate::domain::{
    Entry, EntryId, EntryPatch, ExerciseStats, NewEntry, TelegramId, TotalStats, Training, UserId,
};
use crate::error::{Error, Result};
use crate::port::outbound::store::JournalStore;

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = Integer)]
    #[diesel(column_name = "id")]
    id: i32,
}

#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

#[derive(QueryableByName)]
struct DayRow {
    #[diesel(sql_type = Text)]
    day: String,
}

#[derive(QueryableByName)]
struct ExerciseStatsRow {
    #[diesel(sql_type = BigInt)]
    total_sets: i64,
    #[diesel(sql_type = Nullable<Double>)]
    max_weight: Option<f64>,
    #[diesel(sql_type = Nullable<Integer>)]
    max_reps: Option<i32>,
    #[diesel(sql_type = Nullable<Double>)]
    avg_weight: Option<f64>,
    #[diesel(sql_type = Nullable<Text>)]
    first_at: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    last_at: Option<String>,
}

#[derive(QueryableByName)]
struct TotalStatsRow {
    #[diesel(sql_type = BigInt)]
    total_sets: i64,
    #[diesel(sql_type = BigInt)]
    total_exercises: i64,
    #[diesel(sql_type = BigInt)]
    total_trainings: i64,
    #[diesel(sql_type = Nullable<Text>)]
    first_at: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    last_at: Option<String>,
}

/// Lower bound of a calendar day in storage format.
fn day_start(date: NaiveDate) -> String {
    format!("{} 00:00:00", date.format("%Y-%m-%d"))
}

/// Parse the date prefix of a stored timestamp.
fn parse_day(raw: &str) -> Result<NaiveDate> {
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| Error::Parse(format!("bad date `{raw}`: {e}")))
}

fn parse_optional_day(raw: Option<String>) -> Result<Option<NaiveDate>> {
    raw.as_deref().map(parse_day).transpose()
}

fn to_entries(rows: Vec<EntryRow>) -> Result<Vec<Entry>> {
    rows.into_iter().map(Entry::try_from).collect()
}

fn load_day(conn: &mut SqliteConnection, user: i32, date: NaiveDate) -> Result<Vec<Entry>> {
    let start = day_start(date);
    let end = date
        .succ_opt()
        .map(day_start)
        .ok_or_else(|| Error::Parse(format!("date out of range: {date}")))?;

    let rows: Vec<EntryRow> = entries::table
        .filter(entries::user_id.eq(user))
        .filter(entries::created_at.ge(start))
        .filter(entries::created_at.lt(end))
        .order((entries::created_at.asc(), entries::id.asc()))
        .select(EntryRow::as_select())
        .load(conn)?;
    to_entries(rows)
}

fn load_entry(conn: &mut SqliteConnection, id: i32) -> Result<Option<Entry>> {
    let row: Option<EntryRow> = entries::table
        .find(id)
        .select(EntryRow::as_select())
        .first(conn)
        .optional()?;
    row.map(Entry::try_from).transpose()
}

/// SQLite-backed journal store.
///
/// Implements the [`JournalStore`] trait. Cloning shares the pool.
#[derive(Clone)]
pub struct SqliteJournalStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteJournalStore {
    /// Create a new journal store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Run `f` with a pooled connection on the blocking thread pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut conn)
        })
        .await
        .map_err(|e| Error::Database(format!("database task failed: {e}")))?
    }
}

#[async_trait]
impl JournalStore for SqliteJournalStore {
    async fn get_or_create_user(&self, telegram_id: TelegramId) -> Result<UserId> {
        let row = NewUserRow {
            telegram_id: telegram_id.get(),
            created_at: format_timestamp(Local::now().naive_local()),
        };
        self.with_conn(move |conn| {
            let inserted = diesel::insert_or_ignore_into(users::table)
                .values(&row)
                .execute(conn)?;
            let id: i32 = users::table
                .filter(users::telegram_id.eq(row.telegram_id))
                .select(users::id)
                .first(conn)?;
            if inserted > 0 {
                debug!(user_id = id, telegram_id = row.telegram_id, "Registered user");
            }
            Ok(UserId::new(id))
        })
        .await
    }

    async fn find_user(&self, telegram_id: TelegramId) -> Result<Option<UserId>> {
        self.with_conn(move |conn| {
            let id: Option<i32> = users::table
                .filter(users::telegram_id.eq(telegram_id.get()))
                .select(users::id)
                .first(conn)
                .optional()?;
            Ok(id.map(UserId::new))
        })
        .await
    }

    async fn add_entry(&self, entry: NewEntry) -> Result<Entry> {
        let row = NewEntryRow::from(entry);
        self.with_conn(move |conn| {
            let id = conn.transaction(|conn| {
                diesel::insert_into(entries::table)
                    .values(&row)
                    .execute(conn)?;
                diesel::sql_query("SELECT last_insert_rowid() AS id")
                    .get_result::<LastInsertRowId>(conn)
                    .map(|row| row.id)
            })?;
            debug!(id, exercise = %row.exercise, "Recorded entry");
            load_entry(conn, id)?
                .ok_or_else(|| Error::Database(format!("entry {id} vanished after insert")))
        })
        .await
    }

    async fn get_entry(&self, id: EntryId) -> Result<Option<Entry>> {
        self.with_conn(move |conn| load_entry(conn, id.get())).await
    }

    async fn update_entry(&self, id: EntryId, patch: EntryPatch) -> Result<Option<Entry>> {
        self.with_conn(move |conn| {
            if !patch.is_empty() {
                let changes = EntryChangeset::from(patch);
                diesel::update(entries::table.find(id.get()))
                    .set(&changes)
                    .execute(conn)?;
            }
            load_entry(conn, id.get())
        })
        .await
    }

    async fn delete_entry(&self, id: EntryId) -> Result<bool> {
        self.with_conn(move |conn| {
            let deleted = diesel::delete(entries::table.find(id.get())).execute(conn)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn entries_on(&self, user: UserId, date: NaiveDate) -> Result<Vec<Entry>> {
        self.with_conn(move |conn| load_day(conn, user.get(), date))
            .await
    }

    async fn all_entries(&self, user: UserId) -> Result<Vec<Entry>> {
        self.with_conn(move |conn| {
            let rows: Vec<EntryRow> = entries::table
                .filter(entries::user_id.eq(user.get()))
                .order((entries::created_at.asc(), entries::id.asc()))
                .select(EntryRow::as_select())
                .load(conn)?;
            to_entries(rows)
        })
        .await
    }

    async fn training_count(&self, user: UserId) -> Result<i64> {
        self.with_conn(move |conn| {
            let row = diesel::sql_query(
                "SELECT COUNT(DISTINCT substr(created_at, 1, 10)) AS count FROM entries WHERE user_id = ?",
            )
            .bind::<Integer, _>(user.get())
            .get_result::<CountRow>(conn)?;
            Ok(row.count)
        })
        .await
    }

    async fn last_entry_date(&self, user: UserId) -> Result<Option<NaiveDate>> {
        self.with_conn(move |conn| {
            let last: Option<String> = entries::table
                .filter(entries::user_id.eq(user.get()))
                .select(max(entries::created_at))
                .first(conn)?;
            parse_optional_day(last)
        })
        .await
    }

    async fn exercise_history(
        &self,
        user: UserId,
        exercise: &str,
        limit: i64,
    ) -> Result<Vec<Entry>> {
        let exercise = exercise.to_string();
        self.with_conn(move |conn| {
            let rows: Vec<EntryRow> = entries::table
                .filter(entries::user_id.eq(user.get()))
                .filter(entries::exercise.eq(exercise))
                .order((entries::created_at.desc(), entries::id.desc()))
                .limit(limit)
                .select(EntryRow::as_select())
                .load(conn)?;
            to_entries(rows)
        })
        .await
    }

    async fn exercise_max_weight(&self, user: UserId, exercise: &str) -> Result<Option<f64>> {
        let exercise = exercise.to_string();
        self.with_conn(move |conn| {
            let best: Option<f64> = entries::table
                .filter(entries::user_id.eq(user.get()))
                .filter(entries::exercise.eq(exercise))
                .select(max(entries::weight))
                .first(conn)?;
            Ok(best)
        })
        .await
    }

    async fn exercise_max_reps(
        &self,
        user: UserId,
        exercise: &str,
        weight: Option<f64>,
    ) -> Result<Option<i32>> {
        let exercise = exercise.to_string();
        self.with_conn(move |conn| {
            let mut query = entries::table
                .filter(entries::user_id.eq(user.get()))
                .filter(entries::exercise.eq(exercise))
                .select(max(entries::reps))
                .into_boxed();
            if let Some(weight) = weight {
                query = query.filter(entries::weight.eq(weight));
            }
            let best: Option<i32> = query.first(conn)?;
            Ok(best)
        })
        .await
    }

    async fn last_exercise_entry(
        &self,
        user: UserId,
        exercise: &str,
        before: Option<NaiveDate>,
    ) -> Result<Option<Entry>> {
        let exercise = exercise.to_string();
        self.with_conn(move |conn| {
            let mut query = entries::table
                .filter(entries::user_id.eq(user.get()))
                .filter(entries::exercise.eq(exercise))
                .order((entries::created_at.desc(), entries::id.desc()))
                .select(EntryRow::as_select())
                .into_boxed();
            if let Some(before) = before {
                query = query.filter(entries::created_at.lt(day_start(before)));
            }
            let row: Option<EntryRow> = query.first(conn).optional()?;
            row.map(Entry::try_from).transpose()
        })
        .await
    }

    async fn recent_trainings(
        &self,
        user: UserId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Training>> {
        self.with_conn(move |conn| {
            let days = diesel::sql_query(
                "SELECT DISTINCT substr(created_at, 1, 10) AS day FROM entries \
                 WHERE user_id = ? ORDER BY day DESC LIMIT ? OFFSET ?",
            )
            .bind::<Integer, _>(user.get())
            .bind::<BigInt, _>(limit)
            .bind::<BigInt, _>(offset)
            .load::<DayRow>(conn)?;

            days.into_iter()
                .map(|row| -> Result<Training> {
                    let date = parse_day(&row.day)?;
                    let entries = load_day(conn, user.get(), date)?;
                    Ok(Training { date, entries })
                })
                .collect()
        })
        .await
    }

    async fn exercises(&self, user: UserId) -> Result<Vec<String>> {
        self.with_conn(move |conn| {
            let names: Vec<String> = entries::table
                .filter(entries::user_id.eq(user.get()))
                .select(entries::exercise)
                .distinct()
                .order(entries::exercise.asc())
                .load(conn)?;
            Ok(names)
        })
        .await
    }

    async fn exercise_stats(&self, user: UserId, exercise: &str) -> Result<ExerciseStats> {
        let exercise = exercise.to_string();
        self.with_conn(move |conn| {
            let row = diesel::sql_query(
                "SELECT COUNT(*) AS total_sets, MAX(weight) AS max_weight, MAX(reps) AS max_reps, \
                 AVG(weight) AS avg_weight, MIN(created_at) AS first_at, MAX(created_at) AS last_at \
                 FROM entries WHERE user_id = ? AND exercise = ?",
            )
            .bind::<Integer, _>(user.get())
            .bind::<Text, _>(exercise)
            .get_result::<ExerciseStatsRow>(conn)?;

            Ok(ExerciseStats {
                total_sets: row.total_sets,
                max_weight: row.max_weight,
                max_reps: row.max_reps,
                avg_weight: row.avg_weight.map(round1),
                first_date: parse_optional_day(row.first_at)?,
                last_date: parse_optional_day(row.last_at)?,
            })
        })
        .await
    }

    async fn total_stats(&self, user: UserId) -> Result<TotalStats> {
        self.with_conn(move |conn| {
            let row = diesel::sql_query(
                "SELECT COUNT(*) AS total_sets, COUNT(DISTINCT exercise) AS total_exercises, \
                 COUNT(DISTINCT substr(created_at, 1, 10)) AS total_trainings, \
                 MIN(created_at) AS first_at, MAX(created_at) AS last_at \
                 FROM entries WHERE user_id = ?",
            )
            .bind::<Integer, _>(user.get())
            .get_result::<TotalStatsRow>(conn)?;

            Ok(TotalStats {
                total_sets: row.total_sets,
                total_exercises: row.total_exercises,
                total_trainings: row.total_trainings,
                first_date: parse_optional_day(row.first_at)?,
                last_date: parse_optional_day(row.last_at)?,
            })
        })
        .await
    }
}
