//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`llm`]: scripted [`Llm`](crate::port::outbound::llm::Llm) and
//!   [`Transcriber`](crate::port::outbound::transcriber::Transcriber) doubles.
//! - [`clock`]: a settable [`Clock`](crate::port::outbound::clock::Clock).
//! - [`db`]: throwaway SQLite journals.
//! - [`domain`]: builders for timestamps and entries.

pub mod clock;
pub mod db;
pub mod domain;
pub mod llm;

pub use clock::FixedClock;
pub use db::TempJournalDb;
pub use llm::{MockLlm, MockTranscriber};
