//! WPM milestone ladder.
//!
//! A fixed ascending ladder of WPM targets. Each reached target is recorded
//! once and never un-reached; `next_target` only ever moves up the ladder,
//! ending at `None` once the ladder is exhausted.

use serde::{Deserialize, Serialize};

/// Default WPM ladder.
pub const DEFAULT_LADDER: [u32; 8] = [25, 50, 75, 100, 125, 150, 175, 200];

/// Persistent milestone state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneState {
    /// Latest observed WPM (tracks every result, reached or not).
    pub current: f64,
    /// Ladder values surpassed at least once, ascending.
    pub reached: Vec<u32>,
    /// Smallest ladder value not yet reached; `None` once past the ladder.
    pub next_target: Option<u32>,
}

impl Default for MilestoneState {
    fn default() -> Self {
        Self {
            current: 0.0,
            reached: Vec::new(),
            next_target: DEFAULT_LADDER.first().copied(),
        }
    }
}

impl MilestoneState {
    /// Start from a custom ladder (the ladder itself is config, not state).
    pub fn with_ladder(ladder: &[u32]) -> Self {
        Self {
            current: 0.0,
            reached: Vec::new(),
            next_target: ladder.first().copied(),
        }
    }

    /// Fold a new result's WPM into the state.
    ///
    /// Crosses as many ladder rungs as the result clears in one call, so a
    /// first result of 80 WPM reaches 25, 50 and 75 together. Returns the
    /// targets newly reached by this call.
    pub fn update(&mut self, wpm: f64, ladder: &[u32]) -> Vec<u32> {
        self.current = wpm;
        let mut newly = Vec::new();
        while let Some(target) = self.next_target {
            if wpm < f64::from(target) {
                break;
            }
            if !self.reached.contains(&target) {
                self.reached.push(target);
                newly.push(target);
            }
            self.next_target = ladder.iter().copied().find(|&t| t > target);
        }
        newly
    }
}
