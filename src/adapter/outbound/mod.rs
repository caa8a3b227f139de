//! Outbound adapters (driven side).

pub mod llm;
pub mod parser;
pub mod sqlite;
pub mod transcription;
