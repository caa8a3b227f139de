//! Post-set analytics.
//!
//! Compares a freshly logged set against the exercise's history and
//! produces short remarks: first attempt, personal records, progress versus
//! the previous session and versus a week ago, and how long the break was.
//!
//! Everything here is pure; the caller loads the history.

use chrono::{Duration, NaiveDate};

use crate::domain::wording::{days_word, format_weight, weeks_word};
use crate::domain::{Entry, Insight, InsightKind};

/// Weight changes smaller than this count as "same weight".
const WEIGHT_EPSILON: f64 = 0.5;

/// Minimum week-over-week gain worth mentioning, in kg.
const WEEKLY_GAIN_KG: f64 = 2.5;

/// How many of the most recent sets feed the comparison.
pub const HISTORY_LIMIT: i64 = 50;

/// Zero counts as "no weight" (bodyweight exercises are logged as 0 or null).
fn lifted(weight: Option<f64>) -> Option<f64> {
    weight.filter(|w| *w > 0.0)
}

fn counted(reps: Option<i32>) -> Option<i32> {
    reps.filter(|r| *r > 0)
}

/// Build insights for `entry`.
///
/// `history` holds recent sets of the same exercise (it may include `entry`
/// itself, which is ignored). `last_session` is the latest set of the
/// exercise from a day before `today`.
///
/// The result is ordered by priority, most important first; ties keep the
/// order in which rules fired.
#[must_use]
pub fn generate_insights(
    entry: &Entry,
    history: &[Entry],
    last_session: Option<&Entry>,
    today: NaiveDate,
) -> Vec<Insight> {
    let previous: Vec<&Entry> = history.iter().filter(|e| e.id != entry.id).collect();

    if previous.is_empty() {
        return vec![Insight::new(
            InsightKind::FirstTime,
            "🆕",
            "Первое выполнение этого упражнения!",
            1,
        )];
    }

    let mut insights = Vec::new();
    let weight = lifted(entry.weight);
    let reps = counted(entry.reps);

    if let Some(weight) = weight {
        let previous_max = previous
            .iter()
            .filter_map(|e| lifted(e.weight))
            .fold(0.0_f64, f64::max);
        if weight > previous_max {
            insights.push(Insight::new(
                InsightKind::WeightRecord,
                "🏆",
                format!("Личный рекорд веса! Было: {}", format_weight(Some(previous_max))),
                1,
            ));
        }

        if let Some(reps) = reps {
            let best_at_weight = previous
                .iter()
                .filter(|e| e.weight == Some(weight))
                .filter_map(|e| counted(e.reps))
                .max();
            if let Some(best) = best_at_weight.filter(|best| reps > *best) {
                insights.push(Insight::new(
                    InsightKind::RepsRecord,
                    "💪",
                    format!(
                        "Рекорд повторений на {}! Было: {best}",
                        format_weight(Some(weight))
                    ),
                    2,
                ));
            }
        }
    }

    if let Some(last) = last_session {
        insights.extend(recency(today - last.date()));
        insights.extend(versus_last(entry, last));
    }

    if let Some(insight) = versus_week_ago(weight, &previous, today) {
        insights.push(insight);
    }

    insights.sort_by_key(|i| i.priority);
    insights
}

fn recency(gap: Duration) -> Option<Insight> {
    let days = gap.num_days();
    match days {
        i64::MIN..=0 => None,
        1 => Some(Insight::new(
            InsightKind::Recency,
            "📅",
            "Вчера тоже делали это упражнение",
            5,
        )),
        2..=7 => Some(Insight::new(
            InsightKind::Recency,
            "📅",
            format!("Последний раз: {days} {} назад", days_word(days)),
            5,
        )),
        8..=14 => Some(Insight::new(
            InsightKind::LongBreak,
            "⚠️",
            format!("Больше недели перерыв ({days} {})", days_word(days)),
            3,
        )),
        _ => {
            let weeks = days / 7;
            Some(Insight::new(
                InsightKind::LongBreak,
                "⚠️",
                format!("Давно не делали: {weeks} {} назад", weeks_word(weeks)),
                3,
            ))
        }
    }
}

/// Reps are compared only when both sets carry (nearly) the same weight.
fn versus_last(entry: &Entry, last: &Entry) -> Option<Insight> {
    let (now_kg, then_kg) = (lifted(entry.weight)?, lifted(last.weight)?);
    let diff = now_kg - then_kg;
    if diff.abs() >= WEIGHT_EPSILON {
        let (kind, emoji) = if diff > 0.0 {
            (InsightKind::WeightProgress, "📈")
        } else {
            (InsightKind::WeightRegress, "📉")
        };
        return Some(Insight::new(
            kind,
            emoji,
            format!(
                "{diff:+.1} кг к прошлому разу ({})",
                format_weight(Some(then_kg))
            ),
            4,
        ));
    }

    let (now, then) = (counted(entry.reps)?, counted(last.reps)?);
    if now > then {
        Some(Insight::new(
            InsightKind::RepsProgress,
            "📈",
            format!("+{} повторений при том же весе", now - then),
            4,
        ))
    } else if now == then {
        Some(Insight::new(
            InsightKind::SameResult,
            "🔄",
            "Тот же результат, что и в прошлый раз",
            6,
        ))
    } else {
        None
    }
}

/// Compare against the heaviest set logged 6 to 8 days ago.
fn versus_week_ago(weight: Option<f64>, previous: &[&Entry], today: NaiveDate) -> Option<Insight> {
    let weight = weight?;
    let window = (today - Duration::days(8))..=(today - Duration::days(6));
    let week_ago = previous
        .iter()
        .filter(|e| window.contains(&e.date()))
        .filter_map(|e| lifted(e.weight))
        .reduce(f64::max)?;

    let diff = weight - week_ago;
    (diff >= WEEKLY_GAIN_KG).then(|| {
        Insight::new(
            InsightKind::WeeklyProgress,
            "📊",
            format!("{diff:+.1} кг за неделю"),
            3,
        )
    })
}
