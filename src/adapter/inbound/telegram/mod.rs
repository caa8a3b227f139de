//! Telegram chat interface.
//!
//! Voice notes and typed messages log sets; commands show reports; inline
//! buttons start the edit and delete dialogues.

pub mod bot;
pub mod callback;
pub mod command;
pub mod format;
pub mod handler;
pub mod keyboard;
pub mod session;

pub use bot::run_bot;
pub use handler::{Outgoing, TelegramHandler};
