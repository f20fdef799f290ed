//! Personal leaderboard.
//!
//! An append-only log of scoring entries. Ranked views are derived fresh on
//! every read; no rank is ever persisted, so the weekly window slides
//! naturally as time passes.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::history::{Difficulty, TestResult};

/// How many entries a ranked view returns.
const TOP_N: usize = 10;

/// One leaderboard entry, captured at result ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub wpm: f64,
    pub accuracy: f64,
    pub date: DateTime<Utc>,
    pub difficulty: Difficulty,
}

impl From<&TestResult> for LeaderboardEntry {
    fn from(result: &TestResult) -> Self {
        Self {
            wpm: result.wpm,
            accuracy: result.accuracy,
            date: result.timestamp,
            difficulty: result.difficulty,
        }
    }
}

/// Append-only log with derived ranked views.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn push(&mut self, entry: LeaderboardEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top entries from the last 7 days as of `now`, fastest first.
    pub fn weekly(&self, now: DateTime<Utc>) -> Vec<LeaderboardEntry> {
        let cutoff = now - Duration::days(7);
        let recent = self
            .entries
            .iter()
            .filter(|e| e.date >= cutoff && e.date <= now)
            .cloned()
            .collect();
        Self::rank(recent)
    }

    /// Top entries over the whole log, fastest first.
    pub fn all_time(&self) -> Vec<LeaderboardEntry> {
        Self::rank(self.entries.clone())
    }

    fn rank(mut entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
        entries.sort_by(|a, b| b.wpm.partial_cmp(&a.wpm).unwrap_or(std::cmp::Ordering::Equal));
        entries.truncate(TOP_N);
        entries
    }
}
