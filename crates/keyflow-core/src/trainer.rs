//! The trainer facade: result ingestion and every read accessor.
//!
//! [`Trainer`] is the single entry point the typing engine and the UI talk
//! to. Each entity is loaded from its document, updated, and written back
//! whole; there is no partial update and no cached state between calls.
//!
//! Ingestion fans out in a fixed order: history first, then streak, then
//! badges, then milestones, then leaderboard, then key statistics. The
//! order is a contract, not an accident: badge predicates read the
//! just-updated streak and the just-appended history. The cascade is not
//! atomic; if a write fails partway, earlier documents stay written and
//! later ones untouched, and the error is propagated without retry.

use chrono::{Local, NaiveDate, Utc};

use crate::badges::{Badge, BadgeId, BadgeSet, EvalContext};
use crate::drill::DrillGenerator;
use crate::error::Result;
use crate::history::{History, TestResult, TotalStats};
use crate::keystats::{KeySample, KeyStats};
use crate::leaderboard::{Leaderboard, LeaderboardEntry};
use crate::milestones::MilestoneState;
use crate::storage::store::{load_or_default, save};
use crate::storage::{Config, DocKey, DocumentStore, SqliteStore};
use crate::streak::StreakRecord;
use crate::weakness::{WeakKeyInfo, WeaknessClassifier};

/// What one ingestion changed, for the caller's feedback surface.
#[derive(Debug, Clone, Default)]
pub struct IngestOutcome {
    pub streak_current: u32,
    pub new_badges: Vec<BadgeId>,
    pub new_milestones: Vec<u32>,
}

/// A weakness-training handoff for the typing engine.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TrainingSession {
    pub weak_keys: Vec<char>,
    pub training_text: String,
    pub target_message: String,
}

/// Practice-analytics engine over an injected document store.
pub struct Trainer<S: DocumentStore> {
    store: S,
    config: Config,
}

impl Trainer<SqliteStore> {
    /// Open the trainer over the on-disk store and the saved configuration.
    pub fn open() -> Result<Self> {
        let store = SqliteStore::open()?;
        let config = Config::load()?;
        Ok(Self::new(store, config))
    }
}

impl<S: DocumentStore> Trainer<S> {
    pub fn new(store: S, config: Config) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ---- write entry points ----

    /// Record a completed test, dated by the local clock.
    pub fn record_result(
        &mut self,
        result: TestResult,
        samples: Option<&[KeySample]>,
    ) -> Result<IngestOutcome> {
        self.record_result_on(result, samples, Local::now().date_naive())
    }

    /// Record a completed test on an explicit calendar day.
    ///
    /// Validation happens before any write, so a rejected result leaves
    /// every document untouched.
    pub fn record_result_on(
        &mut self,
        result: TestResult,
        samples: Option<&[KeySample]>,
        day: NaiveDate,
    ) -> Result<IngestOutcome> {
        result.validate()?;

        let mut history: History = load_or_default(&self.store, DocKey::History)?;
        history.push(result.clone());
        save(&mut self.store, DocKey::History, &history)?;

        let mut streak: StreakRecord = load_or_default(&self.store, DocKey::Streak)?;
        streak.reconcile(day);
        streak.record_day(day);
        save(&mut self.store, DocKey::Streak, &streak)?;

        let mut badges: BadgeSet = load_or_default(&self.store, DocKey::Badges)?;
        let ctx = EvalContext {
            result: &result,
            streak_current: streak.current,
            history: &history,
        };
        let new_badges = badges.evaluate(&ctx, day);
        save(&mut self.store, DocKey::Badges, &badges)?;

        let mut milestones = self.load_milestones()?;
        let new_milestones = milestones.update(result.wpm, &self.config.milestone_ladder);
        save(&mut self.store, DocKey::Milestones, &milestones)?;

        let mut board: Leaderboard = load_or_default(&self.store, DocKey::Leaderboard)?;
        board.push(LeaderboardEntry::from(&result));
        save(&mut self.store, DocKey::Leaderboard, &board)?;

        if let Some(samples) = samples {
            self.batch_update_key_stats(samples)?;
        }

        Ok(IngestOutcome {
            streak_current: streak.current,
            new_badges,
            new_milestones,
        })
    }

    /// Fold keystroke samples into the per-key statistics.
    pub fn batch_update_key_stats(&mut self, samples: &[KeySample]) -> Result<()> {
        let mut stats = self.key_stats()?;
        stats.batch_update(samples, self.config.classifier.latency_cap_ms);
        save(&mut self.store, DocKey::KeyStats, &stats)?;
        Ok(())
    }

    /// Wipe every persisted document.
    pub fn clear_all_data(&mut self) -> Result<()> {
        self.store.clear()?;
        Ok(())
    }

    // ---- read accessors ----

    pub fn history(&self) -> Result<History> {
        Ok(load_or_default(&self.store, DocKey::History)?)
    }

    pub fn stats(&self) -> Result<TotalStats> {
        Ok(self.history()?.totals())
    }

    /// The streak, reconciled against the local clock.
    pub fn streak(&mut self) -> Result<StreakRecord> {
        self.streak_on(Local::now().date_naive())
    }

    /// The streak, reconciled against an explicit day.
    ///
    /// Reconcile-before-read is the contract here: a lapsed streak is
    /// zeroed (and persisted) by the read itself, never by a timer.
    pub fn streak_on(&mut self, today: NaiveDate) -> Result<StreakRecord> {
        let mut streak: StreakRecord = load_or_default(&self.store, DocKey::Streak)?;
        if streak.reconcile(today) {
            save(&mut self.store, DocKey::Streak, &streak)?;
        }
        Ok(streak)
    }

    /// Unlocked badges joined with catalog metadata.
    pub fn badges(&self) -> Result<Vec<Badge>> {
        let set: BadgeSet = load_or_default(&self.store, DocKey::Badges)?;
        Ok(set.badges())
    }

    /// The full badge catalog, locked and unlocked alike.
    pub fn badge_catalog() -> [BadgeId; 9] {
        BadgeId::all()
    }

    pub fn milestones(&self) -> Result<MilestoneState> {
        self.load_milestones()
    }

    fn load_milestones(&self) -> Result<MilestoneState> {
        // A fresh state takes its first target from the configured ladder.
        match self.store.read(DocKey::Milestones)? {
            None => Ok(MilestoneState::with_ladder(&self.config.milestone_ladder)),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(state) => Ok(state),
                Err(e) => {
                    eprintln!("Warning: malformed document {}: {e}", DocKey::Milestones.as_str());
                    Ok(MilestoneState::with_ladder(&self.config.milestone_ladder))
                }
            },
        }
    }

    pub fn leaderboard_weekly(&self) -> Result<Vec<LeaderboardEntry>> {
        let board: Leaderboard = load_or_default(&self.store, DocKey::Leaderboard)?;
        Ok(board.weekly(Utc::now()))
    }

    pub fn leaderboard_all_time(&self) -> Result<Vec<LeaderboardEntry>> {
        let board: Leaderboard = load_or_default(&self.store, DocKey::Leaderboard)?;
        Ok(board.all_time())
    }

    /// The per-key table, migrating legacy documents on first read.
    pub fn key_stats(&mut self) -> Result<KeyStats> {
        let raw = self.store.read(DocKey::KeyStats)?;
        let (stats, migrated) = KeyStats::from_raw(raw.as_deref());
        if migrated {
            // Persist the canonical form so the migration never reruns.
            save(&mut self.store, DocKey::KeyStats, &stats)?;
        }
        Ok(stats)
    }

    /// Per-key performance rows for the heatmap.
    pub fn heatmap(&mut self) -> Result<Vec<WeakKeyInfo>> {
        let stats = self.key_stats()?;
        Ok(WeaknessClassifier::new(&stats, &self.config).heatmap())
    }

    /// Keys that qualify for targeted drilling.
    pub fn weak_keys(&mut self) -> Result<Vec<char>> {
        let stats = self.key_stats()?;
        Ok(WeaknessClassifier::new(&stats, &self.config).weak_keys())
    }

    /// Build a weakness-training session: weak keys, generated drill text,
    /// and a message describing the target.
    pub fn start_weakness_training(&mut self) -> Result<TrainingSession> {
        let stats = self.key_stats()?;
        let classifier = WeaknessClassifier::new(&stats, &self.config);
        let weak_keys = classifier.weak_keys();
        let normal_keys = classifier.normal_keys();

        let mut generator = DrillGenerator::new(&self.config);
        let training_text = generator.generate(&weak_keys, &normal_keys);

        let target_message = if weak_keys.is_empty() {
            "No weak keys yet. Keep practicing!".to_string()
        } else {
            let keys: Vec<String> = weak_keys.iter().map(|k| k.to_string()).collect();
            format!("Focus on: {}", keys.join(", "))
        };

        Ok(TrainingSession {
            weak_keys,
            training_text,
            target_message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::sample_result;
    use crate::storage::MemoryStore;

    fn trainer() -> Trainer<MemoryStore> {
        Trainer::new(MemoryStore::new(), Config::default())
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn invalid_result_writes_nothing() {
        let mut t = trainer();
        let mut result = sample_result(50.0, 95.0);
        result.accuracy = 140.0;
        assert!(t.record_result_on(result, None, day(1)).is_err());
        assert!(t.history().unwrap().is_empty());
        assert_eq!(t.streak_on(day(1)).unwrap().current, 0);
        assert!(t.leaderboard_all_time().unwrap().is_empty());
    }

    #[test]
    fn history_length_tracks_successful_calls() {
        let mut t = trainer();
        for i in 0..5 {
            t.record_result_on(sample_result(40.0 + f64::from(i), 95.0), None, day(1))
                .unwrap();
        }
        assert_eq!(t.history().unwrap().len(), 5);
        assert_eq!(t.stats().unwrap().tests_taken, 5);
    }

    #[test]
    fn cascade_updates_all_documents() {
        let mut t = trainer();
        let outcome = t
            .record_result_on(sample_result(55.0, 100.0), None, day(1))
            .unwrap();
        assert_eq!(outcome.streak_current, 1);
        assert!(outcome.new_badges.contains(&BadgeId::SpeedRacer));
        assert!(outcome.new_badges.contains(&BadgeId::Perfect));
        assert_eq!(outcome.new_milestones, vec![25, 50]);
        assert_eq!(t.leaderboard_all_time().unwrap().len(), 1);
    }

    #[test]
    fn two_consecutive_days_end_to_end() {
        let mut t = trainer();
        t.record_result_on(sample_result(55.0, 100.0), None, day(1))
            .unwrap();
        let outcome = t
            .record_result_on(sample_result(60.0, 99.0), None, day(2))
            .unwrap();

        assert_eq!(outcome.streak_current, 2);
        let streak = t.streak_on(day(2)).unwrap();
        assert_eq!(streak.current, 2);
        assert_eq!(streak.best, 2);

        let badge_ids: Vec<BadgeId> = t.badges().unwrap().iter().map(|b| b.id).collect();
        assert!(badge_ids.contains(&BadgeId::SpeedRacer));
        assert!(badge_ids.contains(&BadgeId::Perfect));

        let milestones = t.milestones().unwrap();
        assert!(milestones.reached.contains(&25));
        assert!(milestones.reached.contains(&50));
        assert_eq!(milestones.next_target, Some(75));
    }

    #[test]
    fn badge_unlock_day_survives_reunlock() {
        let mut t = trainer();
        t.record_result_on(sample_result(55.0, 95.0), None, day(1))
            .unwrap();
        t.record_result_on(sample_result(58.0, 95.0), None, day(5))
            .unwrap();
        let badges = t.badges().unwrap();
        let speed = badges.iter().find(|b| b.id == BadgeId::SpeedRacer).unwrap();
        assert_eq!(speed.unlocked_at, day(1));
        assert_eq!(badges.len(), 1);
    }

    #[test]
    fn lapsed_streak_zeroes_on_read_and_persists() {
        let mut t = trainer();
        t.record_result_on(sample_result(40.0, 95.0), None, day(1))
            .unwrap();
        assert_eq!(t.streak_on(day(2)).unwrap().current, 1);
        assert_eq!(t.streak_on(day(4)).unwrap().current, 0);
        // The zero was written back, not just computed.
        let raw = t.store.read(DocKey::Streak).unwrap().unwrap();
        let stored: StreakRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.current, 0);
        assert_eq!(stored.best, 1);
    }

    #[test]
    fn samples_flow_into_key_stats() {
        let mut t = trainer();
        let samples = vec![
            KeySample {
                character: 'Q',
                latency_ms: 400,
                correct: true,
            },
            KeySample {
                character: 'q',
                latency_ms: 300,
                correct: false,
            },
            KeySample {
                character: 'q',
                latency_ms: 3000, // pause, dropped
                correct: true,
            },
        ];
        t.record_result_on(sample_result(40.0, 95.0), Some(&samples), day(1))
            .unwrap();
        let stats = t.key_stats().unwrap();
        let q = stats.get('q').unwrap();
        assert_eq!(q.count, 2);
        assert_eq!(q.total_latency_ms, 700);
        assert_eq!(q.errors, 1);
    }

    #[test]
    fn legacy_key_stats_migrate_once_on_read() {
        let mut t = trainer();
        t.store
            .seed(DocKey::KeyStats, r#"{"a":[100,200],"A":[300]}"#);
        let stats = t.key_stats().unwrap();
        assert_eq!(stats.get('a').unwrap().count, 3);
        // Second read parses the canonical document; no further migration.
        let raw = t.store.read(DocKey::KeyStats).unwrap().unwrap();
        assert!(raw.contains("version"));
        let stats = t.key_stats().unwrap();
        assert_eq!(stats.get('a').unwrap().count, 3);
    }

    #[test]
    fn failed_write_leaves_earlier_cascade_steps_applied() {
        let mut t = trainer();
        t.record_result_on(sample_result(40.0, 95.0), None, day(1))
            .unwrap();
        // Badge write fails mid-cascade: history and streak stay written,
        // milestones and leaderboard were never reached.
        t.store.fail_writes_for(DocKey::Badges);
        assert!(t
            .record_result_on(sample_result(60.0, 95.0), None, day(2))
            .is_err());
        t.store.allow_writes();
        assert_eq!(t.history().unwrap().len(), 2);
        assert_eq!(t.streak_on(day(2)).unwrap().current, 2);
        assert_eq!(t.leaderboard_all_time().unwrap().len(), 1);
        let milestones = t.milestones().unwrap();
        assert!(!milestones.reached.contains(&50));
    }

    #[test]
    fn clear_all_data_wipes_every_document() {
        let mut t = trainer();
        t.record_result_on(sample_result(55.0, 100.0), None, day(1))
            .unwrap();
        t.clear_all_data().unwrap();
        assert!(t.history().unwrap().is_empty());
        assert!(t.badges().unwrap().is_empty());
        assert_eq!(t.streak_on(day(1)).unwrap().current, 0);
        assert!(t.milestones().unwrap().reached.is_empty());
    }

    #[test]
    fn weakness_training_with_no_data() {
        let mut t = trainer();
        let session = t.start_weakness_training().unwrap();
        assert!(session.weak_keys.is_empty());
        assert_eq!(session.training_text, crate::drill::NO_WEAK_KEYS_TEXT);
    }

    #[test]
    fn weakness_training_targets_weak_keys() {
        let mut t = trainer();
        let samples: Vec<KeySample> = (0..12)
            .map(|_| KeySample {
                character: 'q',
                latency_ms: 400,
                correct: true,
            })
            .collect();
        t.batch_update_key_stats(&samples).unwrap();
        let session = t.start_weakness_training().unwrap();
        assert_eq!(session.weak_keys, vec!['q']);
        assert!(session.target_message.contains('q'));
        assert!(session.training_text.split_whitespace().any(|w| w.contains('q')));
    }
}
