//! Adaptive drill text synthesis.
//!
//! Builds a practice text biased toward the user's weak keys: roughly 60%
//! of the words come from per-weak-key pools, 30% reinforce keys with
//! sufficient data that are not weak, and 10% are neutral filler. The
//! three pools are deduplicated, merged, globally shuffled, then cut or
//! padded to the target length.
//!
//! The shuffle uses a non-cryptographic PRNG. Output is deterministic only
//! when constructed with an explicit seed; successive unseeded drills are
//! expected to differ in ordering while matching in composition.

mod words;

pub use words::{bank_for, FILLER};

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

use crate::storage::Config;

/// Shown instead of an empty drill when no weak keys exist yet.
pub const NO_WEAK_KEYS_TEXT: &str =
    "No weak keys detected yet. Complete a few regular tests so the engine \
     can measure your typing and build a personalized drill.";

/// Share of the drill drawn from weak-key pools.
const WEAK_SHARE: f64 = 0.6;
/// Share drawn from sufficiently-measured non-weak keys.
const NORMAL_SHARE: f64 = 0.3;
/// Cap on bonus words that hit two or more weak keys at once.
const MAX_BONUS_WORDS: usize = 5;

/// Personalized practice-text generator.
pub struct DrillGenerator {
    rng: Mcg128Xsl64,
    target_words: usize,
}

impl DrillGenerator {
    /// Generator seeded from entropy.
    pub fn new(config: &Config) -> Self {
        Self::with_seed(config, rand::thread_rng().gen())
    }

    /// Generator with a fixed seed, for reproducible output.
    pub fn with_seed(config: &Config, seed: u64) -> Self {
        Self {
            rng: Mcg128Xsl64::new(u128::from(seed)),
            target_words: config.drill.target_words,
        }
    }

    /// Synthesize a drill for `weak_keys`, reinforced by `normal_keys`.
    ///
    /// Returns the fixed instructional text when `weak_keys` is empty.
    pub fn generate(&mut self, weak_keys: &[char], normal_keys: &[char]) -> String {
        if weak_keys.is_empty() {
            return NO_WEAK_KEYS_TEXT.to_string();
        }

        let weak_quota = ((self.target_words as f64) * WEAK_SHARE).ceil() as usize;
        let normal_quota = ((self.target_words as f64) * NORMAL_SHARE).ceil() as usize;
        let filler_quota = self
            .target_words
            .saturating_sub(weak_quota + normal_quota)
            .max(1);

        let mut chosen: Vec<&'static str> = Vec::with_capacity(self.target_words + 8);

        // Weak pool: an even split per key, rounded up so the remainder is
        // absorbed rather than dropped.
        let per_key = weak_quota.div_ceil(weak_keys.len());
        for &key in weak_keys {
            let mut pool: Vec<&'static str> = bank_for(key).to_vec();
            pool.shuffle(&mut self.rng);
            for word in pool.into_iter().take(per_key) {
                push_unique(&mut chosen, word);
            }
        }

        // Bonus words hitting two or more weak keys at once.
        if weak_keys.len() >= 2 {
            let mut bonus: Vec<&'static str> = words::all_bank_words()
                .filter(|w| hits_at_least(w, weak_keys, 2))
                .collect();
            bonus.shuffle(&mut self.rng);
            for word in bonus.into_iter().take(MAX_BONUS_WORDS) {
                push_unique(&mut chosen, word);
            }
        }

        // Reinforcement pool from normal keys.
        let mut normal_pool: Vec<&'static str> = normal_keys
            .iter()
            .flat_map(|&k| bank_for(k).iter().copied())
            .collect();
        normal_pool.shuffle(&mut self.rng);
        let mut taken = 0;
        for word in normal_pool {
            if taken == normal_quota {
                break;
            }
            if push_unique(&mut chosen, word) {
                taken += 1;
            }
        }

        // Neutral filler.
        let mut filler: Vec<&'static str> = FILLER.to_vec();
        filler.shuffle(&mut self.rng);
        let mut taken = 0;
        for word in filler {
            if taken == filler_quota {
                break;
            }
            if push_unique(&mut chosen, word) {
                taken += 1;
            }
        }

        chosen.shuffle(&mut self.rng);
        self.fit_to_target(chosen).join(" ")
    }

    /// Truncate past the target, or pad with repeated picks when short.
    fn fit_to_target(&mut self, mut chosen: Vec<&'static str>) -> Vec<&'static str> {
        if chosen.len() >= self.target_words {
            chosen.truncate(self.target_words);
            return chosen;
        }
        let mut i = 0;
        while chosen.len() < self.target_words {
            let word = if chosen.is_empty() {
                FILLER[i % FILLER.len()]
            } else {
                chosen[i % chosen.len()]
            };
            chosen.push(word);
            i += 1;
        }
        chosen
    }
}

fn push_unique(chosen: &mut Vec<&'static str>, word: &'static str) -> bool {
    if chosen.contains(&word) {
        return false;
    }
    chosen.push(word);
    true
}

fn hits_at_least(word: &str, keys: &[char], n: usize) -> bool {
    keys.iter().filter(|&&k| word.contains(k)).count() >= n
}
