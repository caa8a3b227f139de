//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! The journal service talks to the outside world exclusively through
//! these traits: persistence, speech-to-text, language models and the
//! wall clock. Adapters implement them.
//!
//! ```text
//!            ┌───────────────────────────┐
//!  Telegram ─┤  Journal (application)    ├── JournalStore ── SQLite
//!            │                           ├── Transcriber ─── Whisper
//!            │                           ├── SetParser ───── Llm
//!            └───────────────────────────┘── Clock
//! ```

pub mod outbound;
