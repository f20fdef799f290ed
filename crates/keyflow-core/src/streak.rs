//! Daily practice streak tracking.
//!
//! A streak counts consecutive calendar days with at least one recorded
//! result. Attrition is lazy: nothing runs on a timer, so a gap only shows
//! up when [`StreakRecord::reconcile`] is called. Callers must reconcile
//! before trusting `current`; the read accessors on the trainer facade do
//! this for them.
//!
//! Calendar days are whatever the caller says they are. The facade passes
//! the local-clock day, which means streaks follow the user's wall clock
//! across timezone changes. That is accepted behavior, not a defect.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Persistent streak state.
///
/// Invariant: `best >= current`, and `current` only ever moves by +1 on a
/// consecutive new day, to 1 on a gap day, or to 0 on reconcile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    pub current: u32,
    pub best: u32,
    /// Every calendar day that has at least one recorded result.
    pub dates: BTreeSet<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl StreakRecord {
    /// Record activity on `day`.
    ///
    /// A day already in `dates` is a no-op, so repeat sessions on the same
    /// day never inflate the streak.
    pub fn record_day(&mut self, day: NaiveDate) {
        if self.dates.contains(&day) {
            return;
        }
        let yesterday = day.checked_sub_days(Days::new(1));
        self.current = match yesterday {
            Some(prev) if self.dates.contains(&prev) => self.current + 1,
            _ => 1,
        };
        self.best = self.best.max(self.current);
        self.dates.insert(day);
        self.last_date = Some(day);
    }

    /// Zero `current` if the streak has lapsed as of `today`.
    ///
    /// Must be called before any read of `current`: the streak survives
    /// only while today or yesterday has recorded activity. `best` and the
    /// recorded days are untouched.
    ///
    /// Returns `true` if the streak was zeroed.
    pub fn reconcile(&mut self, today: NaiveDate) -> bool {
        if self.current == 0 {
            return false;
        }
        let yesterday = today.checked_sub_days(Days::new(1));
        let alive = self.dates.contains(&today)
            || yesterday.map(|d| self.dates.contains(&d)).unwrap_or(false);
        if alive {
            return false;
        }
        self.current = 0;
        true
    }
}
