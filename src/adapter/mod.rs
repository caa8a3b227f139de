//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - Driving side: the Telegram bot and the CLI
//! - [`outbound`] - Driven side: SQLite, speech-to-text, language models

pub mod inbound;
pub mod outbound;
