//! Workout journal service.
//!
//! Orchestrates the journal use cases on top of the outbound ports:
//!
//! ```text
//! voice ──> Transcriber ──> SetParser ──> JournalStore ──> analytics
//!                              text ──────┘
//! ```
//!
//! Every operation is addressed by Telegram identity; users are registered
//! on first contact. Entries belonging to someone else behave as if they did
//! not exist.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use super::analytics::{generate_insights, HISTORY_LIMIT};
use crate::domain::exercise::{validate_reps, validate_weight};
use crate::domain::{
    normalize_exercise_name, DomainError, Entry, EntryId, EntryPatch, ExerciseStats, Insight,
    NewEntry, ParsedSet, TelegramId, TotalStats, Training, UserId,
};
use crate::error::Result;
use crate::port::outbound::clock::Clock;
use crate::port::outbound::parser::SetParser;
use crate::port::outbound::store::JournalStore;
use crate::port::outbound::transcriber::Transcriber;

/// Filename hint passed to the transcriber for Telegram voice notes.
pub const VOICE_FILENAME: &str = "voice.ogg";

/// Tunables for the journal service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalSettings {
    /// Trainings per history page.
    pub history_page_size: usize,
    /// Recent sets shown in an exercise report.
    pub recent_sets: usize,
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            history_page_size: 5,
            recent_sets: 5,
        }
    }
}

/// A set that was just logged (or edited), with its context.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedSet {
    pub entry: Entry,
    /// Number of distinct training days so far.
    pub training_number: i64,
    /// 1-based position of the set within its day.
    pub set_number: usize,
    /// Most important first.
    pub insights: Vec<Insight>,
}

/// Today's sets.
#[derive(Debug, Clone, PartialEq)]
pub struct TodayReport {
    pub date: NaiveDate,
    pub training_number: i64,
    pub entries: Vec<Entry>,
}

/// One page of past trainings, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryPage {
    /// 0-based page index (clamped to the last page).
    pub page: usize,
    pub total_pages: usize,
    pub trainings: Vec<Training>,
}

/// Totals plus the exercise list for drill-down.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsOverview {
    pub totals: TotalStats,
    pub exercises: Vec<String>,
}

/// Aggregates and recent sets for one exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseReport {
    pub exercise: String,
    pub stats: ExerciseStats,
    /// Newest first.
    pub recent: Vec<Entry>,
}

/// Result of a single-field edit.
#[derive(Debug, Clone, PartialEq)]
pub struct Edited {
    pub before: Entry,
    pub after: Entry,
}

/// Voice-driven workout journal.
pub struct Journal {
    store: Arc<dyn JournalStore>,
    transcriber: Arc<dyn Transcriber>,
    parser: Arc<dyn SetParser>,
    clock: Arc<dyn Clock>,
    settings: JournalSettings,
}

impl Journal {
    pub fn new(
        store: Arc<dyn JournalStore>,
        transcriber: Arc<dyn Transcriber>,
        parser: Arc<dyn SetParser>,
        clock: Arc<dyn Clock>,
        settings: JournalSettings,
    ) -> Self {
        Self {
            store,
            transcriber,
            parser,
            clock,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> JournalSettings {
        self.settings
    }

    /// Current local date according to the journal clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.now().date()
    }

    /// Register a user (idempotent).
    pub async fn register(&self, telegram_id: TelegramId) -> Result<UserId> {
        self.store.get_or_create_user(telegram_id).await
    }

    /// Transcribe a voice note and log the set it describes.
    ///
    /// # Errors
    ///
    /// [`DomainError::EmptyTranscript`] when no speech was recognized, or
    /// any transcription, parsing or storage failure.
    #[instrument(skip(self, audio), fields(bytes = audio.len()))]
    pub async fn log_voice(&self, telegram_id: TelegramId, audio: Vec<u8>) -> Result<LoggedSet> {
        let user = self.register(telegram_id).await?;
        let text = self.transcriber.transcribe(audio, VOICE_FILENAME).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::EmptyTranscript.into());
        }
        info!(provider = self.transcriber.name(), text, "Transcribed voice note");
        self.log_parsed(user, text).await
    }

    /// Log a set described in a typed message.
    #[instrument(skip(self))]
    pub async fn log_text(&self, telegram_id: TelegramId, text: &str) -> Result<LoggedSet> {
        let user = self.register(telegram_id).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::EmptyTranscript.into());
        }
        self.log_parsed(user, text).await
    }

    async fn log_parsed(&self, user: UserId, text: &str) -> Result<LoggedSet> {
        let set: ParsedSet = self.parser.parse(text).await?;
        debug!(?set, "Parsed set");

        let entry = self
            .store
            .add_entry(NewEntry::from_parsed(user, set, self.clock.now()))
            .await?;
        info!(entry_id = %entry.id, exercise = %entry.exercise, "Logged set");
        self.report_for(entry).await
    }

    /// Rebuild the logged-set summary for an existing entry of this user.
    pub async fn entry_report(&self, telegram_id: TelegramId, id: EntryId) -> Result<LoggedSet> {
        let user = self.register(telegram_id).await?;
        let entry = self.owned_entry(user, id).await?;
        self.report_for(entry).await
    }

    async fn report_for(&self, entry: Entry) -> Result<LoggedSet> {
        let today = self.today();
        let training_number = self.store.training_count(entry.user_id).await?;
        let day = self.store.entries_on(entry.user_id, entry.date()).await?;
        let set_number = day
            .iter()
            .position(|e| e.id == entry.id)
            .map_or(day.len(), |i| i + 1);

        let history = self
            .store
            .exercise_history(entry.user_id, &entry.exercise, HISTORY_LIMIT)
            .await?;
        let last_session = self
            .store
            .last_exercise_entry(entry.user_id, &entry.exercise, Some(today))
            .await?;
        let insights = generate_insights(&entry, &history, last_session.as_ref(), today);

        Ok(LoggedSet {
            entry,
            training_number,
            set_number,
            insights,
        })
    }

    /// Sets logged today.
    pub async fn today_report(&self, telegram_id: TelegramId) -> Result<TodayReport> {
        let user = self.register(telegram_id).await?;
        let date = self.today();
        let entries = self.store.entries_on(user, date).await?;
        let training_number = self.store.training_count(user).await?;
        Ok(TodayReport {
            date,
            training_number,
            entries,
        })
    }

    /// A page of past trainings. Out-of-range pages clamp to the last one.
    pub async fn history(&self, telegram_id: TelegramId, page: usize) -> Result<HistoryPage> {
        let user = self.register(telegram_id).await?;
        let page_size = self.settings.history_page_size.max(1);
        let count = usize::try_from(self.store.training_count(user).await?).unwrap_or(0);
        let total_pages = count.div_ceil(page_size);
        if total_pages == 0 {
            return Ok(HistoryPage {
                page: 0,
                total_pages: 0,
                trainings: Vec::new(),
            });
        }

        let page = page.min(total_pages - 1);
        let trainings = self
            .store
            .recent_trainings(user, (page * page_size) as i64, page_size as i64)
            .await?;
        Ok(HistoryPage {
            page,
            total_pages,
            trainings,
        })
    }

    /// Totals across all exercises, plus the exercise list.
    pub async fn overview(&self, telegram_id: TelegramId) -> Result<StatsOverview> {
        let user = self.register(telegram_id).await?;
        let totals = self.store.total_stats(user).await?;
        let exercises = self.store.exercises(user).await?;
        Ok(StatsOverview { totals, exercises })
    }

    /// Alphabetical list of the user's exercises.
    pub async fn exercises(&self, telegram_id: TelegramId) -> Result<Vec<String>> {
        let user = self.register(telegram_id).await?;
        self.store.exercises(user).await
    }

    /// First exercise (alphabetically) whose name contains `query`.
    pub async fn find_exercise(
        &self,
        telegram_id: TelegramId,
        query: &str,
    ) -> Result<Option<String>> {
        let needle = normalize_exercise_name(query);
        if needle.is_empty() {
            return Ok(None);
        }
        let exercises = self.exercises(telegram_id).await?;
        Ok(exercises
            .into_iter()
            .find(|name| normalize_exercise_name(name).contains(&needle)))
    }

    /// Stats and recent sets for one exercise.
    pub async fn exercise_report(
        &self,
        telegram_id: TelegramId,
        exercise: &str,
    ) -> Result<ExerciseReport> {
        let user = self.register(telegram_id).await?;
        let stats = self.store.exercise_stats(user, exercise).await?;
        let recent = self
            .store
            .exercise_history(user, exercise, self.settings.recent_sets as i64)
            .await?;
        Ok(ExerciseReport {
            exercise: exercise.to_string(),
            stats,
            recent,
        })
    }

    /// Fetch an entry owned by this user.
    pub async fn entry(&self, telegram_id: TelegramId, id: EntryId) -> Result<Entry> {
        let user = self.register(telegram_id).await?;
        self.owned_entry(user, id).await
    }

    /// Rename the exercise; the canonical name comes from the parser.
    pub async fn rename_exercise(
        &self,
        telegram_id: TelegramId,
        id: EntryId,
        raw: &str,
    ) -> Result<Edited> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DomainError::EmptyExercise.into());
        }
        let mut exercise = self.parser.normalize_exercise(raw).await;
        if exercise.is_empty() {
            exercise = normalize_exercise_name(raw);
        }
        let patch = EntryPatch {
            exercise: Some(exercise),
            exercise_raw: Some(raw.to_string()),
            ..EntryPatch::default()
        };
        self.edit(telegram_id, id, patch).await
    }

    pub async fn set_weight(
        &self,
        telegram_id: TelegramId,
        id: EntryId,
        weight: f64,
    ) -> Result<Edited> {
        validate_weight(Some(weight))?;
        let patch = EntryPatch {
            weight: Some(weight),
            ..EntryPatch::default()
        };
        self.edit(telegram_id, id, patch).await
    }

    pub async fn set_reps(&self, telegram_id: TelegramId, id: EntryId, reps: i32) -> Result<Edited> {
        validate_reps(Some(reps))?;
        let patch = EntryPatch {
            reps: Some(reps),
            ..EntryPatch::default()
        };
        self.edit(telegram_id, id, patch).await
    }

    /// Replace the comment; `None` clears it.
    pub async fn set_comment(
        &self,
        telegram_id: TelegramId,
        id: EntryId,
        comment: Option<String>,
    ) -> Result<Edited> {
        let comment = comment
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        let patch = EntryPatch {
            comment: Some(comment),
            ..EntryPatch::default()
        };
        self.edit(telegram_id, id, patch).await
    }

    /// Delete an entry of this user.
    pub async fn delete(&self, telegram_id: TelegramId, id: EntryId) -> Result<Entry> {
        let user = self.register(telegram_id).await?;
        let entry = self.owned_entry(user, id).await?;
        if !self.store.delete_entry(id).await? {
            return Err(DomainError::EntryNotFound(id).into());
        }
        info!(entry_id = %id, "Deleted entry");
        Ok(entry)
    }

    async fn edit(&self, telegram_id: TelegramId, id: EntryId, patch: EntryPatch) -> Result<Edited> {
        let user = self.register(telegram_id).await?;
        let before = self.owned_entry(user, id).await?;
        let after = self
            .store
            .update_entry(id, patch)
            .await?
            .ok_or(DomainError::EntryNotFound(id))?;
        info!(entry_id = %id, "Edited entry");
        Ok(Edited { before, after })
    }

    async fn owned_entry(&self, user: UserId, id: EntryId) -> Result<Entry> {
        match self.store.get_entry(id).await? {
            Some(entry) if entry.user_id == user => Ok(entry),
            _ => Err(DomainError::EntryNotFound(id).into()),
        }
    }

    /// Every set of a user, oldest first. Does not register unknown users.
    pub async fn export(&self, telegram_id: TelegramId) -> Result<Option<Vec<Entry>>> {
        export_entries(self.store.as_ref(), telegram_id).await
    }
}

/// Every set of a user straight from the store, oldest first.
///
/// Needs no transcriber or parser, so offline tooling can call it directly.
/// Returns `None` for users that never wrote to the bot.
pub async fn export_entries(
    store: &dyn JournalStore,
    telegram_id: TelegramId,
) -> Result<Option<Vec<Entry>>> {
    match store.find_user(telegram_id).await? {
        Some(user) => Ok(Some(store.all_entries(user).await?)),
        None => Ok(None),
    }
}
