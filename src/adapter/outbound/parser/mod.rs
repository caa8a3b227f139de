//! Set parser adapters.
//!
//! Implement [`SetParser`](crate::port::outbound::parser::SetParser) on top
//! of a language model.

pub mod llm;

pub use llm::LlmSetParser;
