//! Exercise names and parsed sets.

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Canonical form of an exercise name used for grouping and lookups.
///
/// Lower-cases, trims, collapses inner whitespace and folds `ё` into `е` so
/// that "Жим  лёжа" and "жим лежа" land in the same history.
#[must_use]
pub fn normalize_exercise_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| word.to_lowercase().replace('ё', "е"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A single set extracted from free-form speech or text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedSet {
    /// Normalized exercise name.
    pub exercise: String,
    /// Exercise name as the user said it.
    pub exercise_raw: String,
    /// Working weight in kilograms.
    pub weight: Option<f64>,
    /// Repetition count.
    pub reps: Option<i32>,
    /// Free-form remark ("тяжело", "с паузой").
    pub comment: Option<String>,
}

impl ParsedSet {
    /// Build a set, enforcing the journal invariants.
    ///
    /// The exercise name is normalized; blank comments collapse to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] when the exercise is blank or weight/reps
    /// are negative.
    pub fn try_new(
        exercise: &str,
        exercise_raw: &str,
        weight: Option<f64>,
        reps: Option<i32>,
        comment: Option<String>,
    ) -> Result<Self, DomainError> {
        let exercise = normalize_exercise_name(exercise);
        if exercise.is_empty() {
            return Err(DomainError::EmptyExercise);
        }
        validate_weight(weight)?;
        validate_reps(reps)?;

        let exercise_raw = exercise_raw.trim();
        let exercise_raw = if exercise_raw.is_empty() {
            exercise.clone()
        } else {
            exercise_raw.to_string()
        };

        Ok(Self {
            exercise,
            exercise_raw,
            weight,
            reps,
            comment: comment
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        })
    }
}

/// Reject negative or non-finite weights.
///
/// # Errors
///
/// Returns [`DomainError::NegativeWeight`] for values below zero or NaN.
pub fn validate_weight(weight: Option<f64>) -> Result<(), DomainError> {
    match weight {
        Some(w) if !w.is_finite() || w < 0.0 => Err(DomainError::NegativeWeight { weight: w }),
        _ => Ok(()),
    }
}

/// Reject negative repetition counts.
///
/// # Errors
///
/// Returns [`DomainError::NegativeReps`] for values below zero.
pub fn validate_reps(reps: Option<i32>) -> Result<(), DomainError> {
    match reps {
        Some(r) if r < 0 => Err(DomainError::NegativeReps { reps: r }),
        _ => Ok(()),
    }
}
