//! Handler for the `export` command.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::adapter::inbound::cli::command::ExportArgs;
use crate::adapter::inbound::cli::{load_config, output};
use crate::adapter::outbound::sqlite::SqliteJournalStore;
use crate::application::export_entries;
use crate::domain::{DomainError, Entry, TelegramId};
use crate::error::Result;
use crate::infrastructure::bootstrap;

/// One CSV line per logged set.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    id: i32,
    date: String,
    time: String,
    exercise: &'a str,
    exercise_raw: &'a str,
    weight: Option<f64>,
    reps: Option<i32>,
    comment: Option<&'a str>,
}

impl<'a> From<&'a Entry> for ExportRow<'a> {
    fn from(entry: &'a Entry) -> Self {
        Self {
            id: entry.id.get(),
            date: entry.created_at.format("%Y-%m-%d").to_string(),
            time: entry.created_at.format("%H:%M:%S").to_string(),
            exercise: &entry.exercise,
            exercise_raw: &entry.exercise_raw,
            weight: entry.weight,
            reps: entry.reps,
            comment: entry.comment.as_deref(),
        }
    }
}

/// Write entries as CSV with a header row.
pub fn write_csv<W: Write>(entries: &[Entry], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for entry in entries {
        writer
            .serialize(ExportRow::from(entry))
            .map_err(io::Error::from)?;
    }
    if entries.is_empty() {
        writer
            .write_record([
                "id",
                "date",
                "time",
                "exercise",
                "exercise_raw",
                "weight",
                "reps",
                "comment",
            ])
            .map_err(io::Error::from)?;
    }
    writer.flush()?;
    Ok(())
}

/// Replace `path` with `contents` in one step. The data lands in a sibling
/// temp file first, so a failed export never leaves a truncated CSV behind.
fn replace_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    let temp = temp_sibling(path);
    let result = fs::write(&temp, contents).and_then(|()| fs::rename(&temp, path));
    if result.is_err() {
        let _ = fs::remove_file(&temp);
    }
    result
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".tmp");
    path.with_file_name(name)
}

/// Execute `export`.
pub async fn execute(args: &ExportArgs) -> Result<()> {
    let config = load_config(&args.source)?;
    let store = SqliteJournalStore::new(bootstrap::open_database(&config)?);
    let telegram_id = TelegramId::new(args.telegram_id);

    let entries = export_entries(&store, telegram_id)
        .await?
        .ok_or(DomainError::UnknownUser(telegram_id))?;

    match &args.output {
        Some(path) => {
            let mut csv = Vec::new();
            write_csv(&entries, &mut csv)?;
            replace_file(path, &csv)?;
            output::success("Journal exported");
            output::field("Path", path.display());
            output::field("Sets", entries.len());
        }
        None => write_csv(&entries, io::stdout().lock())?,
    }
    Ok(())
}
