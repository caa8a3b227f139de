//! Per-chat edit dialogue.
//!
//! After the user taps an edit button the bot waits for the next text
//! message in that chat and applies it to one field of one entry.

use dashmap::DashMap;
use teloxide::types::{ChatId, MessageId};

use crate::domain::{EntryField, EntryId};

/// What a chat is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditState {
    pub entry_id: EntryId,
    pub field: EntryField,
    /// Bot message showing the entry, refreshed after the edit.
    pub message_id: MessageId,
}

/// Pending edits keyed by chat.
#[derive(Debug, Default)]
pub struct EditSessions {
    pending: DashMap<ChatId, EditState>,
}

impl EditSessions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start waiting for input, replacing any earlier dialogue in the chat.
    pub fn begin(&self, chat: ChatId, state: EditState) {
        self.pending.insert(chat, state);
    }

    #[must_use]
    pub fn get(&self, chat: ChatId) -> Option<EditState> {
        self.pending.get(&chat).map(|s| *s)
    }

    /// Clear the dialogue. Returns whether one was active.
    pub fn cancel(&self, chat: ChatId) -> bool {
        self.pending.remove(&chat).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Parsed value for the awaited field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    Exercise(String),
    Weight(f64),
    Reps(i32),
    /// `None` clears the comment.
    Comment(Option<String>),
}

/// Reply hint for input that does not fit the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    NotANumber,
    NotAnInteger,
    Negative,
    Empty,
}

impl InputError {
    #[must_use]
    pub const fn hint(self) -> &'static str {
        match self {
            Self::NotANumber => "❌ Введи число (например: 60 или 72.5)",
            Self::NotAnInteger => "❌ Введи целое число (например: 8)",
            Self::Negative => "❌ Значение не может быть отрицательным",
            Self::Empty => "❌ Название не может быть пустым",
        }
    }
}

/// Interpret a text message as a new value for `field`.
///
/// # Errors
///
/// Returns the hint to show; the dialogue stays active.
pub fn parse_field_input(field: EntryField, text: &str) -> Result<FieldInput, InputError> {
    let text = text.trim();
    match field {
        EntryField::Exercise => {
            if text.is_empty() {
                Err(InputError::Empty)
            } else {
                Ok(FieldInput::Exercise(text.to_string()))
            }
        }
        EntryField::Weight => parse_weight(text).map(FieldInput::Weight),
        EntryField::Reps => parse_reps(text).map(FieldInput::Reps),
        EntryField::Comment => Ok(FieldInput::Comment(
            (!text.is_empty() && text != "-").then(|| text.to_string()),
        )),
    }
}

/// Accepts "72,5", "60 кг", "80kg".
fn parse_weight(text: &str) -> Result<f64, InputError> {
    let cleaned = text
        .to_lowercase()
        .replace(',', ".")
        .replace("кг", "")
        .replace("kg", "");
    let weight: f64 = cleaned
        .trim()
        .parse()
        .map_err(|_| InputError::NotANumber)?;
    if !weight.is_finite() {
        return Err(InputError::NotANumber);
    }
    if weight < 0.0 {
        return Err(InputError::Negative);
    }
    Ok(weight)
}

fn parse_reps(text: &str) -> Result<i32, InputError> {
    let reps: i32 = text.parse().map_err(|_| InputError::NotAnInteger)?;
    if reps < 0 {
        return Err(InputError::Negative);
    }
    Ok(reps)
}
