//! Per-character latency and error aggregation.
//!
//! One aggregate per lower-cased character: total latency, sample count,
//! error count. Samples slower than the configured cap are discarded whole;
//! a multi-second gap between keystrokes is the user pausing, not a
//! keystroke latency.
//!
//! Two older on-disk shapes are recognized and migrated on load: a raw
//! per-key latency-list map from before aggregation existed, and an
//! unversioned aggregate map that may contain mixed-case duplicate keys.
//! Migration is guarded by a schema version stamp so it runs at most once
//! per storage lifetime.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current on-disk schema version.
const SCHEMA_VERSION: u32 = 2;

/// One keystroke sample from the typing engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct KeySample {
    pub character: char,
    pub latency_ms: u64,
    pub correct: bool,
}

/// Aggregate statistics for one key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyStatEntry {
    pub total_latency_ms: u64,
    pub count: u64,
    pub errors: u64,
}

impl KeyStatEntry {
    /// Sum two aggregates. Pure summation, so merging is commutative and
    /// associative: folding case-variant duplicates in any order yields the
    /// same totals.
    pub fn merge(self, other: KeyStatEntry) -> KeyStatEntry {
        KeyStatEntry {
            total_latency_ms: self.total_latency_ms + other.total_latency_ms,
            count: self.count + other.count,
            errors: self.errors + other.errors,
        }
    }

    pub fn avg_latency_ms(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_latency_ms as f64 / self.count as f64
        }
    }

    pub fn error_rate(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.errors as f64 / self.count as f64
        }
    }
}

/// The persisted per-key statistics document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyStats {
    #[serde(default)]
    version: u32,
    keys: BTreeMap<char, KeyStatEntry>,
}

impl Default for KeyStats {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            keys: BTreeMap::new(),
        }
    }
}

fn fold_key(character: char) -> char {
    character.to_lowercase().next().unwrap_or(character)
}

impl KeyStats {
    /// Decode a stored document, migrating legacy shapes.
    ///
    /// Returns the stats plus `true` when a migration happened and the
    /// caller should persist the canonical form. An unparseable document is
    /// treated as absent.
    pub fn from_raw(raw: Option<&str>) -> (KeyStats, bool) {
        let Some(raw) = raw else {
            return (KeyStats::default(), false);
        };

        if let Ok(doc) = serde_json::from_str::<KeyStats>(raw) {
            if doc.version >= SCHEMA_VERSION {
                return (doc, false);
            }
            // Versioned below current: fold any mixed-case duplicates.
            let mut stats = KeyStats::default();
            for (key, entry) in doc.keys {
                stats.merge_into(fold_key(key), entry);
            }
            return (stats, true);
        }

        // Legacy shape (a): per-key raw latency lists, no error tracking.
        if let Ok(legacy) = serde_json::from_str::<BTreeMap<String, Vec<u64>>>(raw) {
            let mut stats = KeyStats::default();
            for (key, latencies) in legacy {
                let Some(character) = key.chars().next() else {
                    continue;
                };
                let entry = KeyStatEntry {
                    total_latency_ms: latencies.iter().sum(),
                    count: latencies.len() as u64,
                    errors: 0,
                };
                stats.merge_into(fold_key(character), entry);
            }
            return (stats, true);
        }

        // Legacy shape (b): unversioned aggregate map, possibly mixed-case.
        if let Ok(flat) = serde_json::from_str::<BTreeMap<String, KeyStatEntry>>(raw) {
            let mut stats = KeyStats::default();
            for (key, entry) in flat {
                let Some(character) = key.chars().next() else {
                    continue;
                };
                stats.merge_into(fold_key(character), entry);
            }
            return (stats, true);
        }

        eprintln!("Warning: malformed key statistics document, reinitializing");
        (KeyStats::default(), false)
    }

    fn merge_into(&mut self, key: char, entry: KeyStatEntry) {
        let slot = self.keys.entry(key).or_default();
        *slot = slot.merge(entry);
    }

    /// Fold a batch of keystroke samples into the aggregates.
    ///
    /// Samples with `latency_ms > cap_ms` are discarded entirely: they
    /// contribute to neither count, total latency, nor errors.
    pub fn batch_update(&mut self, samples: &[KeySample], cap_ms: u64) {
        for sample in samples {
            if sample.latency_ms > cap_ms {
                continue;
            }
            self.merge_into(
                fold_key(sample.character),
                KeyStatEntry {
                    total_latency_ms: sample.latency_ms,
                    count: 1,
                    errors: u64::from(!sample.correct),
                },
            );
        }
    }

    pub fn get(&self, key: char) -> Option<&KeyStatEntry> {
        self.keys.get(&fold_key(key))
    }

    /// The full per-key table, for the heatmap view.
    pub fn entries(&self) -> &BTreeMap<char, KeyStatEntry> {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(character: char, latency_ms: u64, correct: bool) -> KeySample {
        KeySample {
            character,
            latency_ms,
            correct,
        }
    }

    #[test]
    fn batch_update_aggregates_by_lowercased_key() {
        let mut stats = KeyStats::default();
        stats.batch_update(
            &[
                sample('a', 100, true),
                sample('A', 200, false),
                sample('b', 150, true),
            ],
            2000,
        );
        let a = stats.get('a').unwrap();
        assert_eq!(a.count, 2);
        assert_eq!(a.total_latency_ms, 300);
        assert_eq!(a.errors, 1);
        assert_eq!(stats.entries().len(), 2);
    }

    #[test]
    fn samples_over_cap_contribute_nothing() {
        let mut stats = KeyStats::default();
        stats.batch_update(
            &[
                sample('a', 2001, false),
                sample('a', 2000, true),
                sample('a', 5000, true),
            ],
            2000,
        );
        let a = stats.get('a').unwrap();
        assert_eq!(a.count, 1);
        assert_eq!(a.total_latency_ms, 2000);
        assert_eq!(a.errors, 0);
    }

    #[test]
    fn merge_is_commutative() {
        let x = KeyStatEntry {
            total_latency_ms: 500,
            count: 5,
            errors: 1,
        };
        let y = KeyStatEntry {
            total_latency_ms: 300,
            count: 3,
            errors: 2,
        };
        assert_eq!(x.merge(y), y.merge(x));
    }

    #[test]
    fn mixed_case_migration_order_independent() {
        let forward = r#"{"a":{"total_latency_ms":500,"count":5,"errors":1},"A":{"total_latency_ms":300,"count":3,"errors":0}}"#;
        let reverse = r#"{"A":{"total_latency_ms":300,"count":3,"errors":0},"a":{"total_latency_ms":500,"count":5,"errors":1}}"#;
        let (from_forward, migrated_f) = KeyStats::from_raw(Some(forward));
        let (from_reverse, migrated_r) = KeyStats::from_raw(Some(reverse));
        assert!(migrated_f && migrated_r);
        assert_eq!(from_forward.get('a'), from_reverse.get('a'));
        let a = from_forward.get('a').unwrap();
        assert_eq!(a.count, 8);
        assert_eq!(a.total_latency_ms, 800);
        assert_eq!(a.errors, 1);
    }

    #[test]
    fn legacy_latency_lists_migrate() {
        let raw = r#"{"q":[120,180,300],"Z":[90]}"#;
        let (stats, migrated) = KeyStats::from_raw(Some(raw));
        assert!(migrated);
        let q = stats.get('q').unwrap();
        assert_eq!(q.count, 3);
        assert_eq!(q.total_latency_ms, 600);
        assert_eq!(q.errors, 0);
        // Upper-case legacy key lands on the folded key.
        assert_eq!(stats.get('z').unwrap().count, 1);
    }

    #[test]
    fn canonical_document_loads_without_migration() {
        let mut stats = KeyStats::default();
        stats.batch_update(&[sample('a', 100, true)], 2000);
        let raw = serde_json::to_string(&stats).unwrap();
        let (back, migrated) = KeyStats::from_raw(Some(raw.as_str()));
        assert!(!migrated);
        assert_eq!(back.get('a').unwrap().count, 1);
    }

    #[test]
    fn malformed_document_reinitializes() {
        let (stats, migrated) = KeyStats::from_raw(Some("{broken"));
        assert!(!migrated);
        assert!(stats.is_empty());
    }

    #[test]
    fn avg_and_error_rate() {
        let entry = KeyStatEntry {
            total_latency_ms: 600,
            count: 4,
            errors: 1,
        };
        assert_eq!(entry.avg_latency_ms(), 150.0);
        assert_eq!(entry.error_rate(), 0.25);
        assert_eq!(KeyStatEntry::default().avg_latency_ms(), 0.0);
    }
}
