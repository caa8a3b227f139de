//! Message formatting for Telegram replies.
//!
//! Every function here is pure: the relative dates ("Сегодня", "Вчера")
//! are resolved against an explicit `today`.

use chrono::{Datelike, Duration, NaiveDate};

use crate::application::{
    Edited, ExerciseReport, HistoryPage, LoggedSet, StatsOverview, TodayReport,
};
use crate::domain::wording::format_weight;
use crate::domain::{Entry, EntryField, Training};

/// Insights shown under a logged set.
pub const DEFAULT_INSIGHT_LIMIT: usize = 4;

/// Exercises listed by a bare `/exercise`.
const EXERCISE_LIST_LIMIT: usize = 15;

const MONTHS: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня", "июля", "августа", "сентября",
    "октября", "ноября", "декабря",
];

pub const PROCESSING: &str = "🎤 Обрабатываю...";
pub const SPEECH_NOT_RECOGNIZED: &str = "❌ Не удалось распознать речь. Попробуй ещё раз.";
pub const TODAY_EMPTY: &str =
    "📭 Сегодня ещё нет записей.\n\nОтправь голосовое сообщение, чтобы начать тренировку!";
pub const HISTORY_EMPTY: &str = "📭 История пуста.\n\nОтправь голосовое сообщение, чтобы начать!";
pub const STATS_EMPTY: &str = "📭 Статистика пуста.\n\nОтправь голосовое сообщение, чтобы начать!";
pub const NO_EXERCISES: &str = "📭 У тебя пока нет записанных упражнений.";
pub const NOTHING_TO_CANCEL: &str = "Нечего отменять.";
pub const ACTION_CANCELLED: &str = "❌ Действие отменено.";
pub const ENTRY_DELETED: &str = "✅ Запись удалена.";
pub const ENTRY_MISSING: &str = "❌ Запись не найдена.";
pub const ENTRY_MISSING_ALERT: &str = "Запись не найдена";
pub const CANCELLED_ALERT: &str = "Отменено";
pub const COMMENT_CHANGED: &str = "✅ Комментарий изменён";

/// Failure while handling a voice note.
#[must_use]
pub fn processing_failed(reason: &str) -> String {
    format!("❌ Ошибка обработки: {reason}\n\nПопробуй ещё раз.")
}

/// Multi-line card: exercise, weight × reps, comment.
#[must_use]
pub fn entry_card(entry: &Entry) -> String {
    let mut lines = vec![format!("📋 {}", entry.exercise)];

    let mut load = Vec::with_capacity(2);
    if let Some(weight) = entry.weight.filter(|w| *w > 0.0) {
        load.push(format_weight(Some(weight)));
    }
    if let Some(reps) = entry.reps.filter(|r| *r > 0) {
        load.push(format!("{reps} повт."));
    }
    if !load.is_empty() {
        lines.push(format!("🏋️ {}", load.join(" × ")));
    }

    if let Some(comment) = &entry.comment {
        lines.push(format!("💬 {comment}"));
    }
    lines.join("\n")
}

/// One-line form: `присед 60 кг ×6 (тяжело)`.
#[must_use]
pub fn entry_compact(entry: &Entry) -> String {
    let mut parts = vec![entry.exercise.clone()];
    if let Some(weight) = entry.weight.filter(|w| *w > 0.0) {
        parts.push(format_weight(Some(weight)));
    }
    if let Some(reps) = entry.reps.filter(|r| *r > 0) {
        parts.push(format!("×{reps}"));
    }
    if let Some(comment) = &entry.comment {
        parts.push(format!("({comment})"));
    }
    parts.join(" ")
}

/// Reply for a freshly logged (or edited) set.
#[must_use]
pub fn logged_set(logged: &LoggedSet, insight_limit: usize) -> String {
    let mut lines = vec![
        format!(
            "✅ Записано в тренировку #{} (подход {})",
            logged.training_number, logged.set_number
        ),
        String::new(),
        entry_card(&logged.entry),
    ];

    if !logged.insights.is_empty() && insight_limit > 0 {
        lines.push(String::new());
        lines.push("📊 Аналитика:".to_string());
        lines.extend(
            logged
                .insights
                .iter()
                .take(insight_limit)
                .map(|i| format!("{} {}", i.emoji, i.text)),
        );
    }
    lines.join("\n")
}

/// "Сегодня", "Вчера" or "5 марта".
#[must_use]
pub fn relative_date(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Сегодня".to_string()
    } else if date == today - Duration::days(1) {
        "Вчера".to_string()
    } else {
        format!("{} {}", date.day(), MONTHS[date.month0() as usize])
    }
}

/// A whole training day, one numbered line per set.
#[must_use]
pub fn training_summary(date: NaiveDate, entries: &[Entry], today: NaiveDate) -> String {
    if entries.is_empty() {
        return "Нет записей".to_string();
    }
    let mut lines = vec![format!("📆 {}", relative_date(date, today)), String::new()];
    lines.extend(entries.iter().enumerate().map(|(i, entry)| {
        format!(
            "{}. [{}] {}",
            i + 1,
            entry.created_at.format("%H:%M"),
            entry_compact(entry)
        )
    }));
    lines.join("\n")
}

#[must_use]
pub fn today_report(report: &TodayReport) -> String {
    if report.entries.is_empty() {
        return TODAY_EMPTY.to_string();
    }
    format!(
        "🏋️ Тренировка #{}\n\n{}",
        report.training_number,
        training_summary(report.date, &report.entries, report.date)
    )
}

#[must_use]
pub fn history_page(page: &HistoryPage, today: NaiveDate) -> String {
    if page.trainings.is_empty() {
        return HISTORY_EMPTY.to_string();
    }
    let mut lines = vec!["📚 Последние тренировки:".to_string(), String::new()];
    for Training { date, entries } in &page.trainings {
        lines.push(training_summary(*date, entries, today));
        lines.push(String::new());
    }
    lines.join("\n").trim_end().to_string()
}

fn optional_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "—".to_string(), |d| d.to_string())
}

#[must_use]
pub fn stats_overview(overview: &StatsOverview) -> String {
    let totals = &overview.totals;
    if totals.is_empty() {
        return STATS_EMPTY.to_string();
    }
    [
        "📊 Общая статистика:".to_string(),
        String::new(),
        format!("🏋️ Всего подходов: {}", totals.total_sets),
        format!("📋 Упражнений: {}", totals.total_exercises),
        format!("📆 Тренировок: {}", totals.total_trainings),
        String::new(),
        format!("📅 Первая тренировка: {}", optional_date(totals.first_date)),
        format!("📅 Последняя: {}", optional_date(totals.last_date)),
        String::new(),
        "Выбери упражнение для детальной статистики:".to_string(),
    ]
    .join("\n")
}

#[must_use]
pub fn exercise_report(report: &ExerciseReport) -> String {
    let stats = &report.stats;
    let mut lines = vec![
        format!("📊 {}", report.exercise),
        String::new(),
        format!("🏋️ Всего подходов: {}", stats.total_sets),
    ];
    if let Some(max) = stats.max_weight.filter(|w| *w > 0.0) {
        lines.push(format!("💪 Макс. вес: {}", format_weight(Some(max))));
    }
    if let Some(reps) = stats.max_reps.filter(|r| *r > 0) {
        lines.push(format!("🔄 Макс. повторений: {reps}"));
    }
    if let Some(avg) = stats.avg_weight.filter(|w| *w > 0.0) {
        lines.push(format!("📈 Средний вес: {}", format_weight(Some(avg))));
    }
    lines.push(String::new());
    lines.push(format!("📅 Первый раз: {}", optional_date(stats.first_date)));
    lines.push(format!("📅 Последний: {}", optional_date(stats.last_date)));

    if !report.recent.is_empty() {
        lines.push(String::new());
        lines.push("Последние подходы:".to_string());
        lines.extend(report.recent.iter().map(recent_set));
    }
    lines.join("\n")
}

fn recent_set(entry: &Entry) -> String {
    let weight = entry
        .weight
        .filter(|w| *w > 0.0)
        .map(|w| format_weight(Some(w)))
        .unwrap_or_default();
    let reps = entry
        .reps
        .filter(|r| *r > 0)
        .map(|r| format!("×{r}"))
        .unwrap_or_default();
    format!("• {}: {weight} {reps}", entry.created_at.format("%d.%m"))
        .trim_end()
        .to_string()
}

/// Reply to a bare `/exercise`.
#[must_use]
pub fn exercise_prompt(exercises: &[String]) -> String {
    if exercises.is_empty() {
        return NO_EXERCISES.to_string();
    }
    let list: Vec<String> = exercises
        .iter()
        .take(EXERCISE_LIST_LIMIT)
        .map(|e| format!("• {e}"))
        .collect();
    format!(
        "📋 Укажи упражнение:\n/exercise <название>\n\nТвои упражнения:\n{}",
        list.join("\n")
    )
}

#[must_use]
pub fn exercise_not_found(query: &str) -> String {
    format!("❌ Упражнение «{query}» не найдено.")
}

fn reps_or_dash(reps: Option<i32>) -> String {
    reps.filter(|r| *r > 0)
        .map_or_else(|| "—".to_string(), |r| r.to_string())
}

/// Question asked when an edit button is pressed.
#[must_use]
pub fn edit_prompt(entry: &Entry, field: EntryField) -> String {
    match field {
        EntryField::Exercise => {
            format!("Текущее упражнение: {}\n\nВведи новое название:", entry.exercise)
        }
        EntryField::Weight => format!(
            "Текущий вес: {}\n\nВведи новый вес (число в кг):",
            format_weight(entry.weight)
        ),
        EntryField::Reps => format!(
            "Текущие повторения: {}\n\nВведи количество повторений:",
            reps_or_dash(entry.reps)
        ),
        EntryField::Comment => format!(
            "Текущий комментарий: {}\n\nВведи новый комментарий (или «-» для удаления):",
            entry.comment.as_deref().unwrap_or("—")
        ),
    }
}

/// Confirmation after an edit.
#[must_use]
pub fn edit_confirmation(field: EntryField, edited: &Edited) -> String {
    match field {
        EntryField::Exercise => format!("✅ Упражнение изменено: {}", edited.after.exercise),
        EntryField::Weight => format!(
            "✅ Вес изменён: {} → {}",
            format_weight(edited.before.weight),
            format_weight(edited.after.weight)
        ),
        EntryField::Reps => format!(
            "✅ Повторения изменены: {} → {}",
            reps_or_dash(edited.before.reps),
            reps_or_dash(edited.after.reps)
        ),
        EntryField::Comment => COMMENT_CHANGED.to_string(),
    }
}

#[must_use]
pub fn confirm_delete(entry: &Entry) -> String {
    format!("Удалить запись?\n\n{}", entry_card(entry))
}
