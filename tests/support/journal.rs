//! Journal wired over a temporary database and scripted doubles.

use std::sync::Arc;

use gymlog::adapter::outbound::parser::LlmSetParser;
use gymlog::application::{Journal, JournalSettings};
use gymlog::domain::TelegramId;
use gymlog::testkit::domain::at;
use gymlog::testkit::{FixedClock, MockLlm, MockTranscriber, TempJournalDb};

pub const ALICE: TelegramId = TelegramId::new(1001);
pub const BOB: TelegramId = TelegramId::new(2002);

pub struct TestJournal {
    pub db: TempJournalDb,
    pub llm: Arc<MockLlm>,
    pub speech: Arc<MockTranscriber>,
    pub clock: Arc<FixedClock>,
    pub journal: Arc<Journal>,
}

impl TestJournal {
    pub fn new() -> Self {
        Self::with_transcript("")
    }

    pub fn with_transcript(transcript: &str) -> Self {
        let db = TempJournalDb::new();
        let llm = Arc::new(MockLlm::failing());
        let speech = Arc::new(MockTranscriber::new(transcript));
        let clock = Arc::new(FixedClock::new(at("2026-03-10 18:00")));
        let journal = Journal::new(
            Arc::new(db.store()),
            speech.clone(),
            Arc::new(LlmSetParser::new(llm.clone())),
            clock.clone(),
            JournalSettings::default(),
        );
        Self {
            db,
            llm,
            speech,
            clock,
            journal: Arc::new(journal),
        }
    }

    /// Move the clock to `YYYY-MM-DD HH:MM`.
    pub fn at(&self, when: &str) {
        self.clock.set(at(when));
    }

    /// Queue the parser's reply for the next set.
    pub fn will_parse(&self, exercise: &str, weight: Option<f64>, reps: Option<i32>) {
        self.llm.push(parsed_json(exercise, weight, reps));
    }

    /// Log a typed set at `when`.
    pub async fn log(&self, when: &str, exercise: &str, weight: Option<f64>, reps: Option<i32>) {
        self.at(when);
        self.will_parse(exercise, weight, reps);
        self.journal
            .log_text(ALICE, exercise)
            .await
            .expect("log set");
    }
}

/// Parser reply in the model's JSON format.
pub fn parsed_json(exercise: &str, weight: Option<f64>, reps: Option<i32>) -> String {
    serde_json::json!({
        "exercise": exercise,
        "exercise_raw": exercise,
        "weight": weight,
        "reps": reps,
        "comment": null,
    })
    .to_string()
}
