//! Journal entries: one logged set each.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::exercise::ParsedSet;
use super::id::{EntryId, UserId};

/// A stored set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub user_id: UserId,
    /// Normalized exercise name.
    pub exercise: String,
    /// Exercise name as originally recognized.
    pub exercise_raw: String,
    pub weight: Option<f64>,
    pub reps: Option<i32>,
    pub comment: Option<String>,
    /// Local wall-clock time the set was logged.
    pub created_at: NaiveDateTime,
}

impl Entry {
    /// Calendar day the set belongs to.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.created_at.date()
    }
}

/// Insert payload for a new entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub user_id: UserId,
    pub exercise: String,
    pub exercise_raw: String,
    pub weight: Option<f64>,
    pub reps: Option<i32>,
    pub comment: Option<String>,
    pub created_at: NaiveDateTime,
}

impl NewEntry {
    /// Build an insert payload from a parsed set.
    #[must_use]
    pub fn from_parsed(user_id: UserId, set: ParsedSet, created_at: NaiveDateTime) -> Self {
        Self {
            user_id,
            exercise: set.exercise,
            exercise_raw: set.exercise_raw,
            weight: set.weight,
            reps: set.reps,
            comment: set.comment,
            created_at,
        }
    }
}

/// Partial update of an entry.
///
/// `None` leaves a field unchanged. `comment: Some(None)` clears the comment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryPatch {
    pub exercise: Option<String>,
    pub exercise_raw: Option<String>,
    pub weight: Option<f64>,
    pub reps: Option<i32>,
    pub comment: Option<Option<String>>,
}

impl EntryPatch {
    /// True when the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercise.is_none()
            && self.exercise_raw.is_none()
            && self.weight.is_none()
            && self.reps.is_none()
            && self.comment.is_none()
    }
}

/// Editable fields of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryField {
    Exercise,
    Weight,
    Reps,
    Comment,
}

impl EntryField {
    /// All fields in keyboard order.
    pub const ALL: [EntryField; 4] = [
        EntryField::Exercise,
        EntryField::Weight,
        EntryField::Reps,
        EntryField::Comment,
    ];

    /// Stable wire name used in callback data.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exercise => "exercise",
            Self::Weight => "weight",
            Self::Reps => "reps",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exercise" => Ok(Self::Exercise),
            "weight" => Ok(Self::Weight),
            "reps" => Ok(Self::Reps),
            "comment" => Ok(Self::Comment),
            other => Err(format!("unknown entry field `{other}`")),
        }
    }
}

/// All sets logged on one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct Training {
    pub date: NaiveDate,
    /// Entries in logging order.
    pub entries: Vec<Entry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_is_detected() {
        assert!(EntryPatch::default().is_empty());
        assert!(!EntryPatch {
            comment: Some(None),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn entry_field_round_trips_wire_names() {
        for field in EntryField::ALL {
            assert_eq!(field.as_str().parse::<EntryField>().unwrap(), field);
        }
        assert!("sets".parse::<EntryField>().is_err());
    }

    #[test]
    fn new_entry_copies_parsed_set() {
        let set = ParsedSet::try_new("присед", "Присед", Some(60.0), Some(6), None).unwrap();
        let at = NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let new = NewEntry::from_parsed(UserId::new(7), set, at);
        assert_eq!(new.user_id, UserId::new(7));
        assert_eq!(new.exercise, "присед");
        assert_eq!(new.exercise_raw, "Присед");
        assert_eq!(new.weight, Some(60.0));
        assert_eq!(new.created_at, at);
    }
}
