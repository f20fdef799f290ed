//! Achievement badges.
//!
//! A fixed catalog of badge ids, each with a predicate over the latest
//! result plus aggregate state (current streak, full history). Unlocking is
//! a set-insert: the first unlock records the day and later evaluations
//! never overwrite it. Ids are persisted in stored data, so the catalog is
//! append-only; shipped ids must never be renamed or removed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::history::{History, TestResult};

/// Badge identifiers. Append new variants; never rename or remove one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeId {
    SpeedRacer,
    Lightning,
    Champion,
    Perfect,
    OnFire,
    Legend,
    Sharpshooter,
    Master,
    IronHands,
}

impl BadgeId {
    /// Every badge in the catalog, in display order.
    pub fn all() -> [BadgeId; 9] {
        [
            BadgeId::SpeedRacer,
            BadgeId::Lightning,
            BadgeId::Champion,
            BadgeId::Perfect,
            BadgeId::OnFire,
            BadgeId::Legend,
            BadgeId::Sharpshooter,
            BadgeId::Master,
            BadgeId::IronHands,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            BadgeId::SpeedRacer => "Speed Racer",
            BadgeId::Lightning => "Lightning",
            BadgeId::Champion => "Champion",
            BadgeId::Perfect => "Perfectionist",
            BadgeId::OnFire => "On Fire",
            BadgeId::Legend => "Legend",
            BadgeId::Sharpshooter => "Sharpshooter",
            BadgeId::Master => "Master",
            BadgeId::IronHands => "Iron Hands",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            BadgeId::SpeedRacer => "🏎️",
            BadgeId::Lightning => "⚡",
            BadgeId::Champion => "🏆",
            BadgeId::Perfect => "💯",
            BadgeId::OnFire => "🔥",
            BadgeId::Legend => "👑",
            BadgeId::Sharpshooter => "🎯",
            BadgeId::Master => "🎓",
            BadgeId::IronHands => "🦾",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BadgeId::SpeedRacer => "Reach 50 WPM in a single test",
            BadgeId::Lightning => "Reach 75 WPM in a single test",
            BadgeId::Champion => "Reach 100 WPM in a single test",
            BadgeId::Perfect => "Finish a test with 100% accuracy",
            BadgeId::OnFire => "Practice 7 days in a row",
            BadgeId::Legend => "Practice 30 days in a row",
            BadgeId::Sharpshooter => "5 tests in a row at 99%+ accuracy",
            BadgeId::Master => "Complete 100 tests",
            BadgeId::IronHands => "Type 1,000 words in total",
        }
    }
}

/// Everything a badge predicate may look at.
pub struct EvalContext<'a> {
    /// The result that triggered this evaluation (already in the history).
    pub result: &'a TestResult,
    /// Streak current as of this result's day.
    pub streak_current: u32,
    /// Full history including `result`.
    pub history: &'a History,
}

impl BadgeId {
    /// Whether this badge's condition holds in `ctx`.
    pub fn earned(&self, ctx: &EvalContext<'_>) -> bool {
        match self {
            BadgeId::SpeedRacer => ctx.result.wpm >= 50.0,
            BadgeId::Lightning => ctx.result.wpm >= 75.0,
            BadgeId::Champion => ctx.result.wpm >= 100.0,
            BadgeId::Perfect => ctx.result.accuracy == 100.0,
            BadgeId::OnFire => ctx.streak_current >= 7,
            BadgeId::Legend => ctx.streak_current >= 30,
            BadgeId::Sharpshooter => {
                let last = ctx.history.recent(5);
                last.len() == 5 && last.iter().all(|r| r.accuracy >= 99.0)
            }
            BadgeId::Master => ctx.history.len() >= 100,
            BadgeId::IronHands => ctx.history.total_words_typed() >= 1000,
        }
    }
}

/// An unlocked badge joined with its catalog metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Badge {
    pub id: BadgeId,
    pub name: String,
    pub icon: String,
    pub description: String,
    /// Day the badge was first unlocked. Day-level only; the triggering
    /// result is not recorded.
    pub unlocked_at: NaiveDate,
}

/// Persistent set of unlocked badges.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BadgeSet {
    unlocked: BTreeMap<BadgeId, NaiveDate>,
}

impl BadgeSet {
    /// Insert `id` if absent. An already-unlocked badge keeps its original
    /// `unlocked_at`. Returns `true` only on a fresh unlock.
    pub fn unlock(&mut self, id: BadgeId, day: NaiveDate) -> bool {
        match self.unlocked.entry(id) {
            std::collections::btree_map::Entry::Vacant(e) => {
                e.insert(day);
                true
            }
            std::collections::btree_map::Entry::Occupied(_) => false,
        }
    }

    pub fn contains(&self, id: BadgeId) -> bool {
        self.unlocked.contains_key(&id)
    }

    pub fn unlocked_at(&self, id: BadgeId) -> Option<NaiveDate> {
        self.unlocked.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.unlocked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unlocked.is_empty()
    }

    /// Unlocked badges with catalog metadata, in catalog order.
    pub fn badges(&self) -> Vec<Badge> {
        BadgeId::all()
            .into_iter()
            .filter_map(|id| {
                self.unlocked.get(&id).map(|&unlocked_at| Badge {
                    id,
                    name: id.name().to_string(),
                    icon: id.icon().to_string(),
                    description: id.description().to_string(),
                    unlocked_at,
                })
            })
            .collect()
    }

    /// Evaluate the whole catalog against `ctx` and unlock anything newly
    /// earned on `day`. Returns the ids unlocked by this call.
    pub fn evaluate(&mut self, ctx: &EvalContext<'_>, day: NaiveDate) -> Vec<BadgeId> {
        let mut fresh = Vec::new();
        for id in BadgeId::all() {
            if !self.contains(id) && id.earned(ctx) && self.unlock(id, day) {
                fresh.push(id);
            }
        }
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::sample_result;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn ctx_for<'a>(result: &'a TestResult, streak: u32, history: &'a History) -> EvalContext<'a> {
        EvalContext {
            result,
            streak_current: streak,
            history,
        }
    }

    #[test]
    fn speed_badges_at_thresholds() {
        let mut history = History::default();
        let result = sample_result(75.0, 95.0);
        history.push(result.clone());
        let mut badges = BadgeSet::default();
        badges.evaluate(&ctx_for(&result, 1, &history), day(1));
        assert!(badges.contains(BadgeId::SpeedRacer));
        assert!(badges.contains(BadgeId::Lightning));
        assert!(!badges.contains(BadgeId::Champion));
    }

    #[test]
    fn perfect_requires_exactly_100() {
        let mut history = History::default();
        let result = sample_result(40.0, 99.9);
        history.push(result.clone());
        let mut badges = BadgeSet::default();
        badges.evaluate(&ctx_for(&result, 1, &history), day(1));
        assert!(!badges.contains(BadgeId::Perfect));

        let result = sample_result(40.0, 100.0);
        history.push(result.clone());
        badges.evaluate(&ctx_for(&result, 1, &history), day(1));
        assert!(badges.contains(BadgeId::Perfect));
    }

    #[test]
    fn unlock_is_idempotent() {
        let mut badges = BadgeSet::default();
        assert!(badges.unlock(BadgeId::SpeedRacer, day(1)));
        assert!(!badges.unlock(BadgeId::SpeedRacer, day(9)));
        assert_eq!(badges.len(), 1);
        assert_eq!(badges.unlocked_at(BadgeId::SpeedRacer), Some(day(1)));
    }

    #[test]
    fn sharpshooter_needs_five_consecutive() {
        let mut history = History::default();
        for _ in 0..4 {
            history.push(sample_result(40.0, 99.5));
        }
        let result = sample_result(40.0, 99.0);
        history.push(result.clone());
        let mut badges = BadgeSet::default();
        badges.evaluate(&ctx_for(&result, 1, &history), day(1));
        assert!(badges.contains(BadgeId::Sharpshooter));

        // A sub-99 result anywhere in the window blocks it.
        let mut history = History::default();
        for accuracy in [99.5, 99.5, 98.9, 99.5, 99.5] {
            history.push(sample_result(40.0, accuracy));
        }
        let result = history.results().last().unwrap().clone();
        let mut badges = BadgeSet::default();
        badges.evaluate(&ctx_for(&result, 1, &history), day(1));
        assert!(!badges.contains(BadgeId::Sharpshooter));
    }

    #[test]
    fn sharpshooter_not_earned_with_short_history() {
        let mut history = History::default();
        let result = sample_result(40.0, 100.0);
        history.push(result.clone());
        let mut badges = BadgeSet::default();
        badges.evaluate(&ctx_for(&result, 1, &history), day(1));
        assert!(!badges.contains(BadgeId::Sharpshooter));
    }

    #[test]
    fn streak_badges() {
        let mut history = History::default();
        let result = sample_result(40.0, 95.0);
        history.push(result.clone());
        let mut badges = BadgeSet::default();

        badges.evaluate(&ctx_for(&result, 7, &history), day(7));
        assert!(badges.contains(BadgeId::OnFire));
        assert!(!badges.contains(BadgeId::Legend));

        badges.evaluate(&ctx_for(&result, 30, &history), day(30));
        assert!(badges.contains(BadgeId::Legend));
    }

    #[test]
    fn iron_hands_cumulative_words() {
        let mut history = History::default();
        let mut badges = BadgeSet::default();
        for _ in 0..24 {
            let mut r = sample_result(40.0, 95.0);
            r.words_typed = 40;
            history.push(r);
        }
        let result = history.results().last().unwrap().clone();
        badges.evaluate(&ctx_for(&result, 1, &history), day(1));
        assert!(!badges.contains(BadgeId::IronHands)); // 960 words

        let mut r = sample_result(40.0, 95.0);
        r.words_typed = 40;
        history.push(r.clone());
        badges.evaluate(&ctx_for(&r, 1, &history), day(2));
        assert!(badges.contains(BadgeId::IronHands)); // 1000 words
    }

    #[test]
    fn badges_view_is_in_catalog_order() {
        let mut badges = BadgeSet::default();
        badges.unlock(BadgeId::Master, day(2));
        badges.unlock(BadgeId::SpeedRacer, day(1));
        let view = badges.badges();
        assert_eq!(view[0].id, BadgeId::SpeedRacer);
        assert_eq!(view[1].id, BadgeId::Master);
        assert_eq!(view[0].name, "Speed Racer");
    }

    #[test]
    fn id_serialization_is_kebab_case() {
        let json = serde_json::to_string(&BadgeId::SpeedRacer).unwrap();
        assert_eq!(json, "\"speed-racer\"");
        let json = serde_json::to_string(&BadgeId::IronHands).unwrap();
        assert_eq!(json, "\"iron-hands\"");
    }
}
