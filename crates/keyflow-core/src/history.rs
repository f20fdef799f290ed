//! Test history and aggregate statistics.
//!
//! Completed practice sessions arrive here as immutable [`TestResult`]
//! records. The history is append-only; nothing ever mutates or deletes an
//! individual record (only a full data wipe removes the document).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Difficulty the session was run at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Custom,
}

/// One completed practice session, produced by the typing engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    /// Words per minute for the session.
    pub wpm: f64,
    /// Accuracy percentage, 0-100.
    pub accuracy: f64,
    pub difficulty: Difficulty,
    pub timestamp: DateTime<Utc>,
    /// Free-form mode label ("timed-60", "quote", "weakness", ...).
    pub mode: String,
    /// Session duration in seconds.
    pub time_elapsed_secs: f64,
    pub words_typed: u32,
    pub errors_count: u32,
    /// Weak keys the session was targeting, if it was a weakness drill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weak_keys: Option<Vec<char>>,
}

impl TestResult {
    /// Check the ingestion preconditions.
    ///
    /// A violation is reported before any document is touched, so a bad
    /// result never leaves partial state behind.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.wpm.is_finite() {
            return Err(ValidationError::NonFinite {
                field: "wpm".to_string(),
            });
        }
        if self.wpm < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "wpm".to_string(),
                message: format!("must be >= 0, got {}", self.wpm),
            });
        }
        if !self.accuracy.is_finite() || !(0.0..=100.0).contains(&self.accuracy) {
            return Err(ValidationError::InvalidValue {
                field: "accuracy".to_string(),
                message: format!("must be in [0, 100], got {}", self.accuracy),
            });
        }
        if !self.time_elapsed_secs.is_finite() || self.time_elapsed_secs < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "time_elapsed_secs".to_string(),
                message: format!("must be >= 0, got {}", self.time_elapsed_secs),
            });
        }
        Ok(())
    }
}

/// Append-only log of completed sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    results: Vec<TestResult>,
}

/// Aggregate statistics over the whole history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TotalStats {
    pub tests_taken: u64,
    pub average_wpm: f64,
    pub best_wpm: f64,
    pub average_accuracy: f64,
    pub total_words_typed: u64,
    pub total_time_secs: f64,
}

impl History {
    /// Append a result. Records are never reordered or removed.
    pub fn push(&mut self, result: TestResult) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    /// The most recent `n` results, newest last.
    pub fn recent(&self, n: usize) -> &[TestResult] {
        let start = self.results.len().saturating_sub(n);
        &self.results[start..]
    }

    /// Cumulative words typed across all sessions.
    pub fn total_words_typed(&self) -> u64 {
        self.results.iter().map(|r| u64::from(r.words_typed)).sum()
    }

    /// Aggregate statistics for the stats view.
    pub fn totals(&self) -> TotalStats {
        if self.results.is_empty() {
            return TotalStats::default();
        }
        let n = self.results.len() as f64;
        let mut stats = TotalStats {
            tests_taken: self.results.len() as u64,
            ..TotalStats::default()
        };
        for r in &self.results {
            stats.average_wpm += r.wpm;
            stats.average_accuracy += r.accuracy;
            stats.best_wpm = stats.best_wpm.max(r.wpm);
            stats.total_words_typed += u64::from(r.words_typed);
            stats.total_time_secs += r.time_elapsed_secs;
        }
        stats.average_wpm /= n;
        stats.average_accuracy /= n;
        stats
    }
}

#[cfg(test)]
pub(crate) fn sample_result(wpm: f64, accuracy: f64) -> TestResult {
    TestResult {
        wpm,
        accuracy,
        difficulty: Difficulty::Medium,
        timestamp: Utc::now(),
        mode: "timed-60".to_string(),
        time_elapsed_secs: 60.0,
        words_typed: (wpm as u32).max(1),
        errors_count: 0,
        weak_keys: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_negative_wpm() {
        let mut result = sample_result(50.0, 95.0);
        result.wpm = -1.0;
        assert!(result.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_accuracy() {
        let mut result = sample_result(50.0, 95.0);
        result.accuracy = 100.5;
        assert!(result.validate().is_err());
        result.accuracy = -0.1;
        assert!(result.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_finite() {
        let mut result = sample_result(50.0, 95.0);
        result.wpm = f64::NAN;
        assert!(result.validate().is_err());
        let mut result = sample_result(50.0, 95.0);
        result.time_elapsed_secs = f64::INFINITY;
        assert!(result.validate().is_err());
    }

    #[test]
    fn validate_accepts_boundaries() {
        let mut result = sample_result(0.0, 0.0);
        result.time_elapsed_secs = 0.0;
        assert!(result.validate().is_ok());
        let result = sample_result(0.0, 100.0);
        assert!(result.validate().is_ok());
    }

    #[test]
    fn totals_over_history() {
        let mut history = History::default();
        let mut a = sample_result(40.0, 90.0);
        a.words_typed = 40;
        a.time_elapsed_secs = 60.0;
        let mut b = sample_result(60.0, 100.0);
        b.words_typed = 60;
        b.time_elapsed_secs = 30.0;
        history.push(a);
        history.push(b);

        let totals = history.totals();
        assert_eq!(totals.tests_taken, 2);
        assert_eq!(totals.average_wpm, 50.0);
        assert_eq!(totals.best_wpm, 60.0);
        assert_eq!(totals.average_accuracy, 95.0);
        assert_eq!(totals.total_words_typed, 100);
        assert_eq!(totals.total_time_secs, 90.0);
    }

    #[test]
    fn recent_clamps_to_length() {
        let mut history = History::default();
        history.push(sample_result(40.0, 90.0));
        assert_eq!(history.recent(5).len(), 1);
        assert_eq!(history.recent(0).len(), 0);
    }

    #[test]
    fn serde_round_trip_preserves_order() {
        let mut history = History::default();
        for wpm in [30.0, 45.0, 60.0] {
            history.push(sample_result(wpm, 95.0));
        }
        let json = serde_json::to_string(&history).unwrap();
        let back: History = serde_json::from_str(&json).unwrap();
        let wpms: Vec<f64> = back.results().iter().map(|r| r.wpm).collect();
        assert_eq!(wpms, vec![30.0, 45.0, 60.0]);
    }
}
