//! Builders for domain primitives used across tests.

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{NewEntry, UserId};

/// Parse `YYYY-MM-DD`.
///
/// # Panics
/// Panics on malformed input.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

/// Parse `YYYY-MM-DD HH:MM`.
///
/// # Panics
/// Panics on malformed input.
pub fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").expect("valid timestamp")
}

/// A set with the exercise name already normalized.
pub fn new_entry(
    user: UserId,
    exercise: &str,
    weight: Option<f64>,
    reps: Option<i32>,
    created_at: &str,
) -> NewEntry {
    NewEntry {
        user_id: user,
        exercise: exercise.to_string(),
        exercise_raw: exercise.to_string(),
        weight,
        reps,
        comment: None,
        created_at: at(created_at),
    }
}
