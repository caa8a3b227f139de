//! Journal domain types. Pure data, no I/O.

pub mod entry;
pub mod error;
pub mod exercise;
pub mod id;
pub mod insight;
pub mod stats;
pub mod wording;

pub use entry::{Entry, EntryField, EntryPatch, NewEntry, Training};
pub use error::DomainError;
pub use exercise::{normalize_exercise_name, ParsedSet};
pub use id::{EntryId, TelegramId, UserId};
pub use insight::{Insight, InsightKind};
pub use stats::{ExerciseStats, TotalStats};
