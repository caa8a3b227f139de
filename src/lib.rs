//! Gymlog - a voice-driven workout journal for Telegram.
//!
//! Users dictate a set ("жим лежа восемьдесят на десять"); the bot
//! transcribes the voice note, extracts the exercise, weight and reps with a
//! language model, stores the set in SQLite and answers with insights such as
//! personal records or progress against the previous training.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Entries, exercises, statistics and insights. Pure data.
//! - [`port`] - Traits for storage, transcription, language models and time
//! - [`application`] - The [`Journal`](application::Journal) use cases and analytics
//! - [`adapter`] - Telegram bot and CLI (inbound); SQLite, Whisper,
//!   Anthropic and OpenAI (outbound)
//! - [`infrastructure`] - Configuration and the composition root
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `testkit` - Test doubles and temporary databases for integration tests

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
