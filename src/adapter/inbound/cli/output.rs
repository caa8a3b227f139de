//! Terminal output for CLI commands.
//!
//! Human-readable by default, one JSON object per line with `--json`, and
//! silent (apart from warnings and errors) with `--quiet`.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::OwoColorize;
use serde_json::json;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn regular_output_suppressed(config: OutputConfig) -> bool {
    !config.json && config.quiet
}

/// Route one message: a JSON line in JSON mode, `human` otherwise unless quiet.
fn emit(kind: &str, payload: serde_json::Value, human: impl FnOnce()) {
    let config = read_config();
    if config.json {
        println!("{}", json!({ "type": kind, "payload": payload }));
    } else if !regular_output_suppressed(config) {
        human();
    }
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

#[must_use]
pub fn is_quiet() -> bool {
    read_config().quiet
}

pub fn header(version: &str) {
    emit("header", json!({ "app": "gymlog", "version": version }), || {
        println!("{} {}", "gymlog".bold(), version.dimmed());
    });
}

pub fn section(title: &str) {
    emit("section", json!({ "title": title }), || {
        println!();
        println!("{}", title.bold());
    });
}

/// Print a labeled value, padded so values line up.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    emit("field", json!({ "label": label, "value": &value }), || {
        println!("  {:<14} {}", label.dimmed(), value);
    });
}

pub fn success(message: &str) {
    emit("success", json!({ "message": message }), || {
        println!("  {} {}", "✓".green(), message);
    });
}

pub fn note(message: &str) {
    emit("note", json!({ "message": message }), || {
        println!("  {}", message.dimmed());
    });
}

/// Warnings go to stderr and ignore `--quiet`.
pub fn warning(message: &str) {
    if is_json() {
        println!("{}", json!({ "type": "warning", "payload": { "message": message } }));
    } else {
        eprintln!("  {} {}", "⚠".yellow(), message);
    }
}

pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "type": "error", "payload": { "message": message } }));
    } else {
        eprintln!("  {} {}", "×".red(), message);
    }
}

/// Secret status for display. Never reveals the value.
#[must_use]
pub fn secret_status(set: bool) -> &'static str {
    if set {
        "set"
    } else {
        "not set"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_suppresses_only_human_output() {
        assert!(regular_output_suppressed(OutputConfig::new(false, true)));
        assert!(!regular_output_suppressed(OutputConfig::new(true, true)));
        assert!(!regular_output_suppressed(OutputConfig::default()));
    }

    #[test]
    fn secrets_are_never_echoed() {
        assert_eq!(secret_status(true), "set");
        assert_eq!(secret_status(false), "not set");
    }
}
