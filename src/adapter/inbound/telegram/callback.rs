//! Inline-button callback data.
//!
//! Telegram limits callback data to 64 bytes, so payloads are short
//! colon-separated tokens.

use std::fmt;
use std::str::FromStr;

use crate::domain::{EntryField, EntryId};

/// Telegram's hard limit for `callback_data`.
pub const MAX_CALLBACK_BYTES: usize = 64;

const EXERCISE_PREFIX: &str = "exercise_stats:";

/// Action encoded in an inline button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    Edit { entry: EntryId, field: EntryField },
    Delete(EntryId),
    ConfirmDelete(EntryId),
    CancelDelete(EntryId),
    /// Abort the pending edit dialogue.
    Cancel,
    /// Exercise name, possibly truncated to fit the size limit.
    ExerciseStats(String),
    HistoryPage(usize),
    /// Inert button (page counter).
    Noop,
}

impl CallbackAction {
    /// Exercise drill-down with the name cut to fit the size limit.
    #[must_use]
    pub fn exercise_stats(name: &str) -> Self {
        Self::ExerciseStats(truncate_bytes(name, MAX_CALLBACK_BYTES - EXERCISE_PREFIX.len()).to_string())
    }
}

/// Longest prefix of `s` within `max` bytes, on a char boundary.
fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edit { entry, field } => write!(f, "edit:{entry}:{field}"),
            Self::Delete(id) => write!(f, "delete:{id}"),
            Self::ConfirmDelete(id) => write!(f, "confirm_delete:{id}"),
            Self::CancelDelete(id) => write!(f, "cancel_delete:{id}"),
            Self::Cancel => f.write_str("cancel"),
            Self::ExerciseStats(name) => write!(f, "{EXERCISE_PREFIX}{name}"),
            Self::HistoryPage(page) => write!(f, "history:{page}"),
            Self::Noop => f.write_str("noop"),
        }
    }
}

/// Callback data that does not decode to a known action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCallback(pub String);

impl fmt::Display for UnknownCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown callback data `{}`", self.0)
    }
}

impl std::error::Error for UnknownCallback {}

fn entry_id(raw: &str, data: &str) -> Result<EntryId, UnknownCallback> {
    raw.parse().map_err(|_| UnknownCallback(data.to_string()))
}

impl FromStr for CallbackAction {
    type Err = UnknownCallback;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownCallback(data.to_string());
        match data {
            "cancel" => return Ok(Self::Cancel),
            "noop" => return Ok(Self::Noop),
            _ => {}
        }
        if let Some(name) = data.strip_prefix(EXERCISE_PREFIX) {
            return if name.is_empty() {
                Err(unknown())
            } else {
                Ok(Self::ExerciseStats(name.to_string()))
            };
        }

        let (kind, rest) = data.split_once(':').ok_or_else(unknown)?;
        match kind {
            "edit" => {
                let (id, field) = rest.split_once(':').ok_or_else(unknown)?;
                Ok(Self::Edit {
                    entry: entry_id(id, data)?,
                    field: field.parse().map_err(|_| unknown())?,
                })
            }
            "delete" => Ok(Self::Delete(entry_id(rest, data)?)),
            "confirm_delete" => Ok(Self::ConfirmDelete(entry_id(rest, data)?)),
            "cancel_delete" => Ok(Self::CancelDelete(entry_id(rest, data)?)),
            "history" => rest.parse().map(Self::HistoryPage).map_err(|_| unknown()),
            _ => Err(unknown()),
        }
    }
}
