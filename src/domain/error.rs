//! Domain validation errors.
//!
//! Returned when a journal invariant would be violated: a set without an
//! exercise name, a negative weight, an entry that does not exist for the
//! requesting user.

use thiserror::Error;

use super::id::{EntryId, TelegramId};

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Exercise names must contain at least one visible character.
    #[error("exercise name cannot be empty")]
    EmptyExercise,

    /// Weight is measured in kilograms and cannot be negative.
    #[error("weight must be non-negative, got {weight}")]
    NegativeWeight {
        /// The rejected weight.
        weight: f64,
    },

    /// Repetition counts cannot be negative.
    #[error("reps must be non-negative, got {reps}")]
    NegativeReps {
        /// The rejected repetition count.
        reps: i32,
    },

    /// Transcription produced no text.
    #[error("speech could not be recognized")]
    EmptyTranscript,

    /// The entry does not exist or belongs to another user.
    #[error("entry {0} not found")]
    EntryNotFound(EntryId),

    /// The Telegram user never wrote to the bot.
    #[error("no journal for Telegram user {0}")]
    UnknownUser(TelegramId),
}
