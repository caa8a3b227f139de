//! Telegram bot configuration.
//!
//! The bot token comes from `TELEGRAM_BOT_TOKEN`; this section only holds
//! behaviour knobs.

use serde::{Deserialize, Serialize};

/// Telegram bot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TelegramAppConfig {
    /// Telegram user ids allowed to use the bot. Empty allows everyone.
    pub allowed_users: Vec<i64>,
    /// Trainings per `/history` page (default: 5).
    pub history_page_size: usize,
    /// Recent sets in an exercise report (default: 5).
    pub recent_sets: usize,
    /// Insights shown under a logged set (default: 4).
    pub insight_limit: usize,
}

impl Default for TelegramAppConfig {
    fn default() -> Self {
        Self {
            allowed_users: Vec::new(),
            history_page_size: 5,
            recent_sets: 5,
            insight_limit: 4,
        }
    }
}
