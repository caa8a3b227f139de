//! Feedback shown after a set is logged.

/// What an insight is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightKind {
    FirstTime,
    WeightRecord,
    RepsRecord,
    Recency,
    LongBreak,
    WeightProgress,
    WeightRegress,
    RepsProgress,
    SameResult,
    WeeklyProgress,
}

/// A single analytics remark about a freshly logged set.
#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    pub kind: InsightKind,
    pub emoji: &'static str,
    pub text: String,
    /// Lower is more important and shown first.
    pub priority: u8,
}

impl Insight {
    #[must_use]
    pub fn new(kind: InsightKind, emoji: &'static str, text: impl Into<String>, priority: u8) -> Self {
        Self {
            kind,
            emoji,
            text: text.into(),
            priority,
        }
    }
}
