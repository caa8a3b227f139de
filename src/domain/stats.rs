//! Aggregated journal statistics.

use chrono::NaiveDate;

/// Lifetime statistics for one exercise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExerciseStats {
    pub total_sets: i64,
    pub max_weight: Option<f64>,
    pub max_reps: Option<i32>,
    /// Mean working weight rounded to one decimal.
    pub avg_weight: Option<f64>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

/// Lifetime statistics across all exercises of a user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TotalStats {
    pub total_sets: i64,
    pub total_exercises: i64,
    /// Number of distinct days with at least one set.
    pub total_trainings: i64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl TotalStats {
    /// True when nothing has been logged yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_sets == 0
    }
}

/// Round to one decimal place.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round1_rounds_half_away_from_zero() {
        assert_eq!(round1(72.25), 72.3);
        assert_eq!(round1(60.0), 60.0);
        assert_eq!(round1(61.04), 61.0);
    }

    #[test]
    fn default_total_stats_is_empty() {
        assert!(TotalStats::default().is_empty());
    }
}
