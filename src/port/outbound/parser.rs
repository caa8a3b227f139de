//! Set extraction port.

use async_trait::async_trait;

use crate::domain::ParsedSet;
use crate::error::Result;

/// Extracts a structured set from free-form text.
#[async_trait]
pub trait SetParser: Send + Sync {
    /// Parse text like "жим лёжа 80 на 5, тяжело".
    ///
    /// # Errors
    ///
    /// Returns an error if no exercise can be recognized.
    async fn parse(&self, text: &str) -> Result<ParsedSet>;

    /// Canonical exercise name for a user-supplied rename.
    async fn normalize_exercise(&self, raw: &str) -> String;
}
