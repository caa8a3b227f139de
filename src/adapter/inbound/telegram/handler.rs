//! Update handling.
//!
//! Handlers turn an incoming message or button press into a list of
//! [`Outgoing`] effects. They never talk to Telegram themselves, which keeps
//! the whole conversation logic testable against a real journal.

use std::collections::HashSet;
use std::sync::Arc;

use teloxide::types::{ChatId, InlineKeyboardMarkup, MessageId};
use tracing::{debug, error, warn};

use super::callback::CallbackAction;
use super::command::{command_help, parse_command, CommandParseError, TelegramCommand};
use super::format;
use super::keyboard::{
    cancel_keyboard, confirm_delete_keyboard, entry_edit_keyboard, exercise_list_keyboard,
    history_keyboard,
};
use super::session::{parse_field_input, EditSessions, EditState, FieldInput, InputError};
use crate::application::{Edited, Journal, LoggedSet};
use crate::domain::{DomainError, EntryField, EntryId, TelegramId};
use crate::error::{Error, Result};

/// A single effect to perform against the Telegram API.
#[derive(Debug, Clone, PartialEq)]
pub enum Outgoing {
    /// New message in the current chat.
    Send {
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    },
    /// Replace the text of an existing message.
    Edit {
        message_id: MessageId,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    },
    Delete { message_id: MessageId },
    /// Acknowledge the button press, optionally with a toast or alert.
    Answer { text: Option<String>, alert: bool },
}

impl Outgoing {
    fn text(text: impl Into<String>) -> Self {
        Self::Send {
            text: text.into(),
            keyboard: None,
        }
    }

    fn with_keyboard(text: impl Into<String>, keyboard: InlineKeyboardMarkup) -> Self {
        Self::Send {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }

    fn ack() -> Self {
        Self::Answer {
            text: None,
            alert: false,
        }
    }

    fn toast(text: &str) -> Self {
        Self::Answer {
            text: Some(text.to_string()),
            alert: false,
        }
    }

    fn alert(text: &str) -> Self {
        Self::Answer {
            text: Some(text.to_string()),
            alert: true,
        }
    }
}

/// Conversation logic shared by every chat.
pub struct TelegramHandler {
    journal: Arc<Journal>,
    sessions: EditSessions,
    /// Empty means everyone may use the bot.
    allowed_users: HashSet<TelegramId>,
    insight_limit: usize,
}

impl TelegramHandler {
    pub fn new(
        journal: Arc<Journal>,
        allowed_users: impl IntoIterator<Item = TelegramId>,
        insight_limit: usize,
    ) -> Self {
        Self {
            journal,
            sessions: EditSessions::new(),
            allowed_users: allowed_users.into_iter().collect(),
            insight_limit,
        }
    }

    #[must_use]
    pub fn sessions(&self) -> &EditSessions {
        &self.sessions
    }

    /// Check the allow-list, logging rejected users.
    #[must_use]
    pub fn is_authorized(&self, user: TelegramId) -> bool {
        if self.allowed_users.is_empty() || self.allowed_users.contains(&user) {
            return true;
        }
        warn!(user_id = user.get(), "Ignoring Telegram update from unauthorized user");
        false
    }

    /// Commands, edit-dialogue answers and typed sets.
    pub async fn handle_text(&self, chat: ChatId, user: TelegramId, text: &str) -> Vec<Outgoing> {
        match parse_command(text) {
            Ok(command) => return self.handle_command(chat, user, command).await,
            Err(err @ CommandParseError::UnknownCommand(_)) => {
                debug!(error = %err, "Unknown command");
                return vec![Outgoing::text(format!("❌ {err}\n\n{}", command_help()))];
            }
            Err(CommandParseError::NotACommand) => {}
        }

        if let Some(state) = self.sessions.get(chat) {
            return self.handle_edit_input(chat, user, state, text).await;
        }

        match self.journal.log_text(user, text).await {
            Ok(logged) => vec![self.logged_message(&logged)],
            Err(err) => vec![Outgoing::text(failure_text(&err))],
        }
    }

    pub async fn handle_command(
        &self,
        chat: ChatId,
        user: TelegramId,
        command: TelegramCommand,
    ) -> Vec<Outgoing> {
        let result = match command {
            TelegramCommand::Start | TelegramCommand::Help => self
                .journal
                .register(user)
                .await
                .map(|_| vec![Outgoing::text(command_help())]),
            TelegramCommand::Today => self.today(user).await,
            TelegramCommand::History => self.history(user).await,
            TelegramCommand::Stats => self.stats(user).await,
            TelegramCommand::Exercise(None) => self
                .journal
                .exercises(user)
                .await
                .map(|names| vec![Outgoing::text(format::exercise_prompt(&names))]),
            TelegramCommand::Exercise(Some(query)) => self.exercise(user, &query).await,
            TelegramCommand::Cancel => Ok(vec![Outgoing::text(if self.sessions.cancel(chat) {
                format::ACTION_CANCELLED
            } else {
                format::NOTHING_TO_CANCEL
            })]),
        };
        result.unwrap_or_else(|err| vec![Outgoing::text(failure_text(&err))])
    }

    /// Finish a voice note; `placeholder` is the "processing" message to
    /// overwrite with the result.
    pub async fn handle_voice(
        &self,
        user: TelegramId,
        placeholder: MessageId,
        audio: Vec<u8>,
    ) -> Vec<Outgoing> {
        match self.journal.log_voice(user, audio).await {
            Ok(logged) => vec![Outgoing::Edit {
                message_id: placeholder,
                text: format::logged_set(&logged, self.insight_limit),
                keyboard: Some(entry_edit_keyboard(logged.entry.id)),
            }],
            Err(Error::Domain(DomainError::EmptyTranscript)) => vec![Outgoing::Edit {
                message_id: placeholder,
                text: format::SPEECH_NOT_RECOGNIZED.to_string(),
                keyboard: None,
            }],
            Err(err) => vec![Outgoing::Edit {
                message_id: placeholder,
                text: failure_text(&err),
                keyboard: None,
            }],
        }
    }

    /// Inline button presses. Always ends with exactly one `Answer`.
    pub async fn handle_callback(
        &self,
        chat: ChatId,
        user: TelegramId,
        message_id: Option<MessageId>,
        data: &str,
    ) -> Vec<Outgoing> {
        let action = match data.parse::<CallbackAction>() {
            Ok(action) => action,
            Err(err) => {
                warn!(error = %err, "Ignoring callback");
                return vec![Outgoing::ack()];
            }
        };
        debug!(?action, "Callback");

        let result = match action {
            CallbackAction::Edit { entry, field } => {
                self.begin_edit(chat, user, message_id, entry, field).await
            }
            CallbackAction::Delete(id) => self.ask_delete(user, id).await,
            CallbackAction::ConfirmDelete(id) => self.confirm_delete(user, message_id, id).await,
            CallbackAction::CancelDelete(_) => Ok(dismiss(message_id)),
            CallbackAction::Cancel => {
                self.sessions.cancel(chat);
                Ok(dismiss(message_id))
            }
            CallbackAction::ExerciseStats(name) => self.exercise_stats(user, &name).await,
            CallbackAction::HistoryPage(page) => self.history_page(user, message_id, page).await,
            CallbackAction::Noop => Ok(vec![Outgoing::ack()]),
        };

        result.unwrap_or_else(|err| {
            vec![
                Outgoing::text(failure_text(&err)),
                Outgoing::ack(),
            ]
        })
    }

    fn logged_message(&self, logged: &LoggedSet) -> Outgoing {
        Outgoing::with_keyboard(
            format::logged_set(logged, self.insight_limit),
            entry_edit_keyboard(logged.entry.id),
        )
    }

    async fn today(&self, user: TelegramId) -> Result<Vec<Outgoing>> {
        let report = self.journal.today_report(user).await?;
        Ok(vec![Outgoing::text(format::today_report(&report))])
    }

    async fn history(&self, user: TelegramId) -> Result<Vec<Outgoing>> {
        let page = self.journal.history(user, 0).await?;
        let text = format::history_page(&page, self.journal.today());
        Ok(vec![match history_keyboard(page.page, page.total_pages) {
            Some(keyboard) => Outgoing::with_keyboard(text, keyboard),
            None => Outgoing::text(text),
        }])
    }

    async fn history_page(
        &self,
        user: TelegramId,
        message_id: Option<MessageId>,
        page: usize,
    ) -> Result<Vec<Outgoing>> {
        let page = self.journal.history(user, page).await?;
        let text = format::history_page(&page, self.journal.today());
        let keyboard = history_keyboard(page.page, page.total_pages);
        let update = match message_id {
            Some(message_id) => Outgoing::Edit {
                message_id,
                text,
                keyboard,
            },
            None => Outgoing::Send { text, keyboard },
        };
        Ok(vec![update, Outgoing::ack()])
    }

    async fn stats(&self, user: TelegramId) -> Result<Vec<Outgoing>> {
        let overview = self.journal.overview(user).await?;
        let text = format::stats_overview(&overview);
        if overview.totals.is_empty() {
            return Ok(vec![Outgoing::text(text)]);
        }
        Ok(vec![match exercise_list_keyboard(&overview.exercises) {
            Some(keyboard) => Outgoing::with_keyboard(text, keyboard),
            None => Outgoing::text(text),
        }])
    }

    async fn exercise(&self, user: TelegramId, query: &str) -> Result<Vec<Outgoing>> {
        let Some(exercise) = self.journal.find_exercise(user, query).await? else {
            return Ok(vec![Outgoing::text(format::exercise_not_found(query))]);
        };
        let report = self.journal.exercise_report(user, &exercise).await?;
        Ok(vec![Outgoing::text(format::exercise_report(&report))])
    }

    /// Drill-down from the stats keyboard. The name may have been cut to
    /// fit into callback data, so a prefix match is accepted.
    async fn exercise_stats(&self, user: TelegramId, name: &str) -> Result<Vec<Outgoing>> {
        let exercises = self.journal.exercises(user).await?;
        let exercise = exercises
            .iter()
            .find(|e| e.as_str() == name)
            .or_else(|| exercises.iter().find(|e| e.starts_with(name)));
        let reply = match exercise {
            Some(exercise) => {
                let report = self.journal.exercise_report(user, exercise).await?;
                Outgoing::text(format::exercise_report(&report))
            }
            None => Outgoing::text(format::exercise_not_found(name)),
        };
        Ok(vec![reply, Outgoing::ack()])
    }

    async fn begin_edit(
        &self,
        chat: ChatId,
        user: TelegramId,
        message_id: Option<MessageId>,
        id: EntryId,
        field: EntryField,
    ) -> Result<Vec<Outgoing>> {
        let entry = match self.journal.entry(user, id).await {
            Ok(entry) => entry,
            Err(Error::Domain(DomainError::EntryNotFound(_))) => {
                return Ok(vec![Outgoing::alert(format::ENTRY_MISSING_ALERT)]);
            }
            Err(err) => return Err(err),
        };
        let Some(message_id) = message_id else {
            return Ok(vec![Outgoing::alert(format::ENTRY_MISSING_ALERT)]);
        };

        self.sessions.begin(
            chat,
            EditState {
                entry_id: id,
                field,
                message_id,
            },
        );
        Ok(vec![
            Outgoing::with_keyboard(format::edit_prompt(&entry, field), cancel_keyboard()),
            Outgoing::ack(),
        ])
    }

    async fn handle_edit_input(
        &self,
        chat: ChatId,
        user: TelegramId,
        state: EditState,
        text: &str,
    ) -> Vec<Outgoing> {
        let input = match parse_field_input(state.field, text) {
            Ok(input) => input,
            Err(err) => return vec![Outgoing::text(err.hint())],
        };

        let edited = match self.apply_edit(user, state.entry_id, input).await {
            Ok(edited) => edited,
            Err(Error::Domain(DomainError::EntryNotFound(_))) => {
                self.sessions.cancel(chat);
                return vec![Outgoing::text(format::ENTRY_MISSING)];
            }
            Err(Error::Domain(
                DomainError::NegativeWeight { .. } | DomainError::NegativeReps { .. },
            )) => return vec![Outgoing::text(InputError::Negative.hint())],
            Err(Error::Domain(DomainError::EmptyExercise)) => {
                return vec![Outgoing::text(InputError::Empty.hint())];
            }
            Err(err) => return vec![Outgoing::text(failure_text(&err))],
        };
        self.sessions.cancel(chat);

        let mut out = vec![Outgoing::text(format::edit_confirmation(
            state.field,
            &edited,
        ))];
        match self.journal.entry_report(user, edited.after.id).await {
            Ok(logged) => out.push(Outgoing::Edit {
                message_id: state.message_id,
                text: format::logged_set(&logged, self.insight_limit),
                keyboard: Some(entry_edit_keyboard(logged.entry.id)),
            }),
            Err(err) => warn!(error = %err, "Could not refresh the entry message"),
        }
        out
    }

    async fn apply_edit(&self, user: TelegramId, id: EntryId, input: FieldInput) -> Result<Edited> {
        match input {
            FieldInput::Exercise(name) => self.journal.rename_exercise(user, id, &name).await,
            FieldInput::Weight(weight) => self.journal.set_weight(user, id, weight).await,
            FieldInput::Reps(reps) => self.journal.set_reps(user, id, reps).await,
            FieldInput::Comment(comment) => self.journal.set_comment(user, id, comment).await,
        }
    }

    async fn ask_delete(&self, user: TelegramId, id: EntryId) -> Result<Vec<Outgoing>> {
        match self.journal.entry(user, id).await {
            Ok(entry) => Ok(vec![
                Outgoing::with_keyboard(format::confirm_delete(&entry), confirm_delete_keyboard(id)),
                Outgoing::ack(),
            ]),
            Err(Error::Domain(DomainError::EntryNotFound(_))) => {
                Ok(vec![Outgoing::alert(format::ENTRY_MISSING_ALERT)])
            }
            Err(err) => Err(err),
        }
    }

    async fn confirm_delete(
        &self,
        user: TelegramId,
        message_id: Option<MessageId>,
        id: EntryId,
    ) -> Result<Vec<Outgoing>> {
        let text = match self.journal.delete(user, id).await {
            Ok(_) => format::ENTRY_DELETED,
            Err(Error::Domain(DomainError::EntryNotFound(_))) => format::ENTRY_MISSING,
            Err(err) => return Err(err),
        };
        let update = match message_id {
            Some(message_id) => Outgoing::Edit {
                message_id,
                text: text.to_string(),
                keyboard: None,
            },
            None => Outgoing::text(text),
        };
        Ok(vec![update, Outgoing::ack()])
    }
}

/// Remove the message carrying the pressed button.
fn dismiss(message_id: Option<MessageId>) -> Vec<Outgoing> {
    let mut out = Vec::with_capacity(2);
    if let Some(message_id) = message_id {
        out.push(Outgoing::Delete { message_id });
    }
    out.push(Outgoing::toast(format::CANCELLED_ALERT));
    out
}

fn failure_text(err: &Error) -> String {
    error!(error = %err, "Failed to handle Telegram update");
    format::processing_failed(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::parser::LlmSetParser;
    use crate::application::JournalSettings;
    use crate::testkit::domain::at;
    use crate::testkit::{FixedClock, MockLlm, MockTranscriber, TempJournalDb};

    const CHAT: ChatId = ChatId(500);
    const USER: TelegramId = TelegramId::new(500);
    const ENTRY_MESSAGE: MessageId = MessageId(77);

    struct Bot {
        _db: TempJournalDb,
        llm: Arc<MockLlm>,
        handler: TelegramHandler,
    }

    fn bot_with(transcript: &str, allowed: Vec<TelegramId>) -> Bot {
        let db = TempJournalDb::new();
        let llm = Arc::new(MockLlm::failing());
        let journal = Journal::new(
            Arc::new(db.store()),
            Arc::new(MockTranscriber::new(transcript)),
            Arc::new(LlmSetParser::new(llm.clone())),
            Arc::new(FixedClock::new(at("2026-03-10 18:00"))),
            JournalSettings::default(),
        );
        Bot {
            _db: db,
            llm,
            handler: TelegramHandler::new(Arc::new(journal), allowed, format::DEFAULT_INSIGHT_LIMIT),
        }
    }

    fn bot() -> Bot {
        bot_with("присед 60 на 6", Vec::new())
    }

    fn sent_text(out: &[Outgoing]) -> Vec<&str> {
        out.iter()
            .filter_map(|o| match o {
                Outgoing::Send { text, .. } | Outgoing::Edit { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    async fn log_squat(bot: &Bot) -> EntryId {
        bot.llm
            .push(r#"{"exercise": "присед", "weight": 60, "reps": 6}"#);
        let out = bot.handler.handle_text(CHAT, USER, "присед 60 на 6").await;
        let logged = bot.handler.journal.today_report(USER).await.unwrap();
        assert!(sent_text(&out)[0].starts_with("✅ Записано в тренировку #1"));
        logged.entries.last().unwrap().id
    }

    #[test]
    fn allow_list() {
        let open = bot();
        assert!(open.handler.is_authorized(TelegramId::new(1)));

        let closed = bot_with("", vec![TelegramId::new(1)]);
        assert!(closed.handler.is_authorized(TelegramId::new(1)));
        assert!(!closed.handler.is_authorized(TelegramId::new(2)));
    }

    #[tokio::test]
    async fn start_and_unknown_commands_show_help() {
        let bot = bot();
        let out = bot.handler.handle_text(CHAT, USER, "/start").await;
        assert_eq!(sent_text(&out), vec![command_help()]);

        let out = bot.handler.handle_text(CHAT, USER, "/lift").await;
        let text = sent_text(&out)[0];
        assert!(text.starts_with("❌ неизвестная команда `/lift`"));
        assert!(text.contains("/today"));
    }

    #[tokio::test]
    async fn voice_edits_the_placeholder() {
        let bot = bot();
        bot.llm
            .push(r#"{"exercise": "присед", "weight": 60, "reps": 6}"#);
        let out = bot.handler.handle_voice(USER, MessageId(3), vec![1, 2, 3]).await;
        let [Outgoing::Edit {
            message_id,
            text,
            keyboard,
        }] = out.as_slice()
        else {
            panic!("expected a single edit, got {out:?}");
        };
        assert_eq!(*message_id, MessageId(3));
        assert!(text.contains("🆕 Первое выполнение этого упражнения!"));
        assert!(keyboard.is_some());
    }

    #[tokio::test]
    async fn unrecognized_speech() {
        let bot = bot_with("  ", Vec::new());
        let out = bot.handler.handle_voice(USER, MessageId(3), vec![1]).await;
        assert_eq!(sent_text(&out), vec![format::SPEECH_NOT_RECOGNIZED]);
    }

    #[tokio::test]
    async fn parser_failure_is_reported() {
        let bot = bot();
        let out = bot.handler.handle_voice(USER, MessageId(3), vec![1]).await;
        assert!(sent_text(&out)[0].starts_with("❌ Ошибка обработки:"));
    }

    #[tokio::test]
    async fn weight_edit_dialogue() {
        let bot = bot();
        let id = log_squat(&bot).await;

        let out = bot
            .handler
            .handle_callback(CHAT, USER, Some(ENTRY_MESSAGE), &format!("edit:{id}:weight"))
            .await;
        assert_eq!(
            sent_text(&out),
            vec!["Текущий вес: 60 кг\n\nВведи новый вес (число в кг):"]
        );
        assert!(matches!(out.last(), Some(Outgoing::Answer { .. })));

        let out = bot.handler.handle_text(CHAT, USER, "тяжело").await;
        assert_eq!(sent_text(&out), vec![InputError::NotANumber.hint()]);
        assert!(bot.handler.sessions().get(CHAT).is_some());

        let out = bot.handler.handle_text(CHAT, USER, "62,5 кг").await;
        assert_eq!(sent_text(&out)[0], "✅ Вес изменён: 60 кг → 62.5 кг");
        assert!(matches!(
            &out[1],
            Outgoing::Edit { message_id, text, .. }
                if *message_id == ENTRY_MESSAGE && text.contains("62.5 кг × 6 повт.")
        ));
        assert!(bot.handler.sessions().get(CHAT).is_none());
    }

    #[tokio::test]
    async fn comment_can_be_cleared() {
        let bot = bot();
        let id = log_squat(&bot).await;

        bot.handler
            .handle_callback(CHAT, USER, Some(ENTRY_MESSAGE), &format!("edit:{id}:comment"))
            .await;
        let out = bot.handler.handle_text(CHAT, USER, "-").await;
        assert_eq!(sent_text(&out)[0], format::COMMENT_CHANGED);
        let entry = bot.handler.journal.entry(USER, id).await.unwrap();
        assert_eq!(entry.comment, None);
    }

    #[tokio::test]
    async fn cancel_command_and_button() {
        let bot = bot();
        let out = bot.handler.handle_text(CHAT, USER, "/cancel").await;
        assert_eq!(sent_text(&out), vec![format::NOTHING_TO_CANCEL]);

        let id = log_squat(&bot).await;
        bot.handler
            .handle_callback(CHAT, USER, Some(ENTRY_MESSAGE), &format!("edit:{id}:reps"))
            .await;
        let out = bot.handler.handle_text(CHAT, USER, "/cancel").await;
        assert_eq!(sent_text(&out), vec![format::ACTION_CANCELLED]);

        bot.handler
            .handle_callback(CHAT, USER, Some(ENTRY_MESSAGE), &format!("edit:{id}:reps"))
            .await;
        let out = bot
            .handler
            .handle_callback(CHAT, USER, Some(MessageId(90)), "cancel")
            .await;
        assert_eq!(
            out,
            vec![
                Outgoing::Delete {
                    message_id: MessageId(90)
                },
                Outgoing::toast(format::CANCELLED_ALERT),
            ]
        );
        assert!(bot.handler.sessions().is_empty());
    }

    #[tokio::test]
    async fn delete_flow() {
        let bot = bot();
        let id = log_squat(&bot).await;

        let out = bot
            .handler
            .handle_callback(CHAT, USER, Some(ENTRY_MESSAGE), &format!("delete:{id}"))
            .await;
        assert!(sent_text(&out)[0].starts_with("Удалить запись?\n\n📋 присед"));

        let out = bot
            .handler
            .handle_callback(CHAT, USER, Some(MessageId(80)), &format!("confirm_delete:{id}"))
            .await;
        assert_eq!(sent_text(&out), vec![format::ENTRY_DELETED]);

        let out = bot
            .handler
            .handle_callback(CHAT, USER, Some(MessageId(80)), &format!("confirm_delete:{id}"))
            .await;
        assert_eq!(sent_text(&out), vec![format::ENTRY_MISSING]);

        let out = bot
            .handler
            .handle_callback(CHAT, USER, Some(ENTRY_MESSAGE), &format!("edit:{id}:weight"))
            .await;
        assert_eq!(out, vec![Outgoing::alert(format::ENTRY_MISSING_ALERT)]);
    }

    #[tokio::test]
    async fn foreign_entries_are_invisible() {
        let bot = bot();
        let id = log_squat(&bot).await;
        let stranger = TelegramId::new(9);
        let out = bot
            .handler
            .handle_callback(ChatId(9), stranger, Some(MessageId(1)), &format!("delete:{id}"))
            .await;
        assert_eq!(out, vec![Outgoing::alert(format::ENTRY_MISSING_ALERT)]);
    }

    #[tokio::test]
    async fn stats_and_exercise_drill_down() {
        let bot = bot();
        let out = bot.handler.handle_text(CHAT, USER, "/stats").await;
        assert_eq!(
            out,
            vec![Outgoing::text(format::STATS_EMPTY)]
        );

        log_squat(&bot).await;
        let out = bot.handler.handle_text(CHAT, USER, "/stats").await;
        assert!(matches!(&out[0], Outgoing::Send { keyboard: Some(_), .. }));

        let out = bot
            .handler
            .handle_callback(CHAT, USER, Some(MessageId(5)), "exercise_stats:прис")
            .await;
        assert!(sent_text(&out)[0].starts_with("📊 присед"));

        let out = bot.handler.handle_text(CHAT, USER, "/exercise тяга").await;
        assert_eq!(sent_text(&out), vec!["❌ Упражнение «тяга» не найдено."]);

        let out = bot.handler.handle_text(CHAT, USER, "/exercise").await;
        assert!(sent_text(&out)[0].contains("• присед"));
    }

    #[tokio::test]
    async fn today_and_history() {
        let bot = bot();
        let out = bot.handler.handle_text(CHAT, USER, "/history").await;
        assert_eq!(sent_text(&out), vec![format::HISTORY_EMPTY]);

        log_squat(&bot).await;
        let out = bot.handler.handle_text(CHAT, USER, "/today").await;
        assert!(sent_text(&out)[0].starts_with("🏋️ Тренировка #1\n\n📆 Сегодня"));

        let out = bot.handler.handle_text(CHAT, USER, "/history").await;
        assert!(matches!(&out[0], Outgoing::Send { keyboard: None, .. }));

        let out = bot
            .handler
            .handle_callback(CHAT, USER, Some(MessageId(8)), "history:4")
            .await;
        assert!(matches!(
            &out[0],
            Outgoing::Edit { message_id, .. } if *message_id == MessageId(8)
        ));
    }

    #[tokio::test]
    async fn garbage_callback_is_acknowledged() {
        let bot = bot();
        let out = bot
            .handler
            .handle_callback(CHAT, USER, None, "rocket:1")
            .await;
        assert_eq!(out, vec![Outgoing::ack()]);
    }
}
