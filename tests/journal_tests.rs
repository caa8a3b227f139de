//! End-to-end journal flows over a real SQLite file.

mod support;

use gymlog::domain::InsightKind;
use gymlog::testkit::domain::date;
use support::journal::{TestJournal, ALICE, BOB};

fn kinds(insights: &[gymlog::domain::Insight]) -> Vec<InsightKind> {
    insights.iter().map(|i| i.kind).collect()
}

#[tokio::test]
async fn voice_note_goes_through_transcriber_and_parser() {
    let t = TestJournal::with_transcript("  жим лёжа восемьдесят на пять  ");
    t.will_parse("жим лежа", Some(80.0), Some(5));

    let logged = t.journal.log_voice(ALICE, vec![7; 16]).await.unwrap();

    assert_eq!(t.speech.calls(), vec![(16, "voice.ogg".to_string())]);
    let prompt = &t.llm.prompts()[0];
    assert!(prompt.contains("жим лёжа восемьдесят на пять"));
    assert_eq!(logged.entry.exercise, "жим лежа");
    assert_eq!(logged.entry.weight, Some(80.0));
    assert_eq!(logged.entry.reps, Some(5));
    assert_eq!(logged.training_number, 1);
    assert_eq!(logged.set_number, 1);
    assert_eq!(kinds(&logged.insights), vec![InsightKind::FirstTime]);
}

#[tokio::test]
async fn heavier_set_on_a_later_day_reports_record_and_progress() {
    let t = TestJournal::new();
    t.log("2026-03-01 10:00", "присед", Some(100.0), Some(5)).await;

    t.at("2026-03-03 10:00");
    t.will_parse("присед", Some(105.0), Some(5));
    let logged = t.journal.log_text(ALICE, "присед 105 на 5").await.unwrap();

    assert_eq!(logged.training_number, 2);
    assert_eq!(logged.set_number, 1);
    assert_eq!(
        kinds(&logged.insights),
        vec![
            InsightKind::WeightRecord,
            InsightKind::WeightProgress,
            InsightKind::Recency,
        ]
    );
    assert!(logged.insights[1].text.starts_with("+5.0 кг"));
}

#[tokio::test]
async fn repeating_a_set_within_the_same_day_is_quiet() {
    let t = TestJournal::new();
    t.log("2026-03-10 18:00", "присед", Some(100.0), Some(5)).await;

    t.at("2026-03-10 18:04");
    t.will_parse("присед", Some(100.0), Some(5));
    let logged = t.journal.log_text(ALICE, "присед 100 на 5").await.unwrap();

    assert_eq!(logged.set_number, 2);
    assert_eq!(logged.training_number, 1);
    assert!(logged.insights.is_empty());
}

#[tokio::test]
async fn week_over_week_gain_is_reported() {
    let t = TestJournal::new();
    t.log("2026-03-02 19:00", "жим лежа", Some(80.0), Some(5)).await;

    t.at("2026-03-09 19:00");
    t.will_parse("жим лежа", Some(85.0), Some(5));
    let logged = t.journal.log_text(ALICE, "жим 85 на 5").await.unwrap();

    assert_eq!(
        kinds(&logged.insights),
        vec![
            InsightKind::WeightRecord,
            InsightKind::WeeklyProgress,
            InsightKind::WeightProgress,
            InsightKind::Recency,
        ]
    );
}

#[tokio::test]
async fn long_break_is_flagged() {
    let t = TestJournal::new();
    t.log("2026-01-01 12:00", "тяга", Some(120.0), Some(3)).await;

    t.at("2026-03-10 12:00");
    t.will_parse("тяга", Some(100.0), Some(3));
    let logged = t.journal.log_text(ALICE, "тяга 100 на 3").await.unwrap();

    assert_eq!(
        kinds(&logged.insights),
        vec![InsightKind::LongBreak, InsightKind::WeightRegress]
    );
}

#[tokio::test]
async fn reports_reflect_logged_sets() {
    let t = TestJournal::new();
    t.log("2026-03-08 10:00", "присед", Some(100.0), Some(5)).await;
    t.log("2026-03-10 18:00", "присед", Some(110.0), Some(3)).await;
    t.log("2026-03-10 18:10", "жим лежа", Some(80.0), Some(8)).await;

    let today = t.journal.today_report(ALICE).await.unwrap();
    assert_eq!(today.date, date("2026-03-10"));
    assert_eq!(today.training_number, 2);
    assert_eq!(today.entries.len(), 2);
    assert_eq!(today.entries[0].exercise, "присед");

    let overview = t.journal.overview(ALICE).await.unwrap();
    assert_eq!(overview.totals.total_sets, 3);
    assert_eq!(overview.totals.total_exercises, 2);
    assert_eq!(overview.totals.total_trainings, 2);
    assert_eq!(overview.totals.first_date, Some(date("2026-03-08")));
    assert_eq!(overview.exercises, vec!["жим лежа", "присед"]);

    let report = t.journal.exercise_report(ALICE, "присед").await.unwrap();
    assert_eq!(report.stats.total_sets, 2);
    assert_eq!(report.stats.max_weight, Some(110.0));
    assert_eq!(report.stats.avg_weight, Some(105.0));
    assert_eq!(report.recent[0].weight, Some(110.0));

    let page = t.journal.history(ALICE, 0).await.unwrap();
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.trainings[0].date, date("2026-03-10"));
    assert_eq!(page.trainings[1].entries.len(), 1);
}

#[tokio::test]
async fn journals_are_private() {
    let t = TestJournal::new();
    t.log("2026-03-10 18:00", "присед", Some(100.0), Some(5)).await;

    assert!(t.journal.today_report(BOB).await.unwrap().entries.is_empty());
    assert!(t.journal.overview(BOB).await.unwrap().totals.is_empty());
    assert_eq!(t.journal.find_exercise(BOB, "присед").await.unwrap(), None);
}

#[tokio::test]
async fn deleting_the_only_set_removes_the_training() {
    let t = TestJournal::new();
    t.log("2026-03-10 18:00", "присед", Some(100.0), Some(5)).await;
    let id = t.journal.today_report(ALICE).await.unwrap().entries[0].id;

    t.journal.delete(ALICE, id).await.unwrap();

    let overview = t.journal.overview(ALICE).await.unwrap();
    assert!(overview.totals.is_empty());
    assert!(overview.exercises.is_empty());
    assert_eq!(t.journal.history(ALICE, 0).await.unwrap().total_pages, 0);
}

#[tokio::test]
async fn parser_failure_stores_nothing() {
    let t = TestJournal::new();
    t.llm.push("не понял");

    assert!(t.journal.log_text(ALICE, "что-то непонятное").await.is_err());
    assert!(t.journal.export(ALICE).await.unwrap().unwrap().is_empty());
}
