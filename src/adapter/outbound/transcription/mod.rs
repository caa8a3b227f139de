//! Speech-to-text adapters.
//!
//! Provides implementations of the
//! [`Transcriber`](crate::port::outbound::transcriber::Transcriber) trait.

pub mod whisper;

pub use whisper::Whisper;
