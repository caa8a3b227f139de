//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Internal journal user identifier (row id of the `users` table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(i32);

impl UserId {
    /// Create a new `UserId` from a raw row id.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the raw row id.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Journal entry identifier (row id of the `entries` table).
///
/// Appears in callback data, so its `Display` and `FromStr` forms are the
/// plain decimal row id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(i32);

impl EntryId {
    /// Create a new `EntryId` from a raw row id.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the raw row id.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for EntryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Telegram identity that owns a journal.
///
/// The bot is meant for private chats, where the chat id equals the
/// Telegram user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TelegramId(i64);

impl TelegramId {
    /// Create a new `TelegramId`.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw Telegram id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TelegramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TelegramId {
    fn from(id: i64) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_id_display_and_parse_agree() {
        let id = EntryId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!("42".parse::<EntryId>().unwrap(), id);
    }

    #[test]
    fn entry_id_rejects_garbage() {
        assert!("4x".parse::<EntryId>().is_err());
        assert!("".parse::<EntryId>().is_err());
    }

    #[test]
    fn telegram_id_keeps_negative_values() {
        let id = TelegramId::from(-100_123);
        assert_eq!(id.get(), -100_123);
        assert_eq!(id.to_string(), "-100123");
    }
}
