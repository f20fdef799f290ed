//! Weak-key classification.
//!
//! Two different bars on purpose. The heatmap banding is cosmetic and
//! kicks in after 2 samples; the weak-key selection feeds the drill
//! generator, where a false positive costs the user real practice time, so
//! it requires 10 samples and a latency or error threshold.

use serde::{Deserialize, Serialize};

use crate::keystats::KeyStats;
use crate::storage::Config;

/// Presentation band for the heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedLevel {
    Fast,
    Medium,
    Weak,
}

impl SpeedLevel {
    fn from_avg_latency(avg_ms: f64) -> Self {
        if avg_ms < 180.0 {
            SpeedLevel::Fast
        } else if avg_ms < 250.0 {
            SpeedLevel::Medium
        } else {
            SpeedLevel::Weak
        }
    }
}

/// Derived per-key performance, computed on demand and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeakKeyInfo {
    pub key: char,
    pub avg_latency_ms: f64,
    pub error_rate: f64,
    pub level: SpeedLevel,
}

/// Classifier over the aggregated key statistics.
pub struct WeaknessClassifier<'a> {
    stats: &'a KeyStats,
    min_samples: u64,
    weak_min_samples: u64,
    weak_latency_ms: f64,
    weak_error_rate: f64,
}

impl<'a> WeaknessClassifier<'a> {
    pub fn new(stats: &'a KeyStats, config: &Config) -> Self {
        Self {
            stats,
            min_samples: config.classifier.min_samples,
            weak_min_samples: config.classifier.weak_min_samples,
            weak_latency_ms: config.classifier.weak_latency_ms,
            weak_error_rate: config.classifier.weak_error_rate,
        }
    }

    /// Per-key performance for every key with enough samples to show,
    /// slowest first. Drives the heatmap.
    pub fn heatmap(&self) -> Vec<WeakKeyInfo> {
        let mut rows: Vec<WeakKeyInfo> = self
            .stats
            .entries()
            .iter()
            .filter(|(_, e)| e.count >= self.min_samples)
            .map(|(&key, e)| WeakKeyInfo {
                key,
                avg_latency_ms: e.avg_latency_ms(),
                error_rate: e.error_rate(),
                level: SpeedLevel::from_avg_latency(e.avg_latency_ms()),
            })
            .collect();
        rows.sort_by(|a, b| {
            b.avg_latency_ms
                .partial_cmp(&a.avg_latency_ms)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        rows
    }

    fn is_weak(&self, key: char) -> bool {
        match self.stats.get(key) {
            Some(e) => {
                e.count >= self.weak_min_samples
                    && (e.avg_latency_ms() > self.weak_latency_ms
                        || e.error_rate() > self.weak_error_rate)
            }
            None => false,
        }
    }

    /// Keys that qualify for targeted drilling, slowest first.
    pub fn weak_keys(&self) -> Vec<char> {
        let mut weak: Vec<(char, f64)> = self
            .stats
            .entries()
            .keys()
            .copied()
            .filter(|&k| self.is_weak(k))
            .map(|k| (k, self.stats.get(k).map(|e| e.avg_latency_ms()).unwrap_or(0.0)))
            .collect();
        weak.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        weak.into_iter().map(|(k, _)| k).collect()
    }

    /// Keys with enough data that are not weak. Feeds the drill's
    /// reinforcement share.
    pub fn normal_keys(&self) -> Vec<char> {
        self.stats
            .entries()
            .iter()
            .filter(|(_, e)| e.count >= self.weak_min_samples)
            .map(|(&k, _)| k)
            .filter(|&k| !self.is_weak(k))
            .collect()
    }
}
