//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies such as storage,
//! transcription, language models and time.

pub mod clock;
pub mod llm;
pub mod parser;
pub mod store;
pub mod transcriber;
