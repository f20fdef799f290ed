//! # Keyflow Core Library
//!
//! Practice-analytics and adaptive-drill engine for a typing trainer.
//! The typing engine hands this library one [`TestResult`] per completed
//! session (plus optional per-keystroke samples); the library turns that
//! stream into durable progress state and a personalized drill generator.
//! The CLI binary and any GUI are thin layers over the same core.
//!
//! ## Architecture
//!
//! - **Trainer**: the single ingestion entry point, fanning out to every
//!   tracker in a fixed, documented order
//! - **Storage**: SQLite-backed whole-document store plus TOML configuration
//! - **Trackers**: streak state machine, achievement rule table, milestone
//!   ladder, personal leaderboard
//! - **Key statistics**: per-character latency/error aggregation feeding
//!   the weakness classifier and the drill generator
//!
//! ## Key Components
//!
//! - [`Trainer`]: ingestion cascade and every read accessor
//! - [`DocumentStore`]: injected persistence seam ([`SqliteStore`] on disk,
//!   [`MemoryStore`] in tests)
//! - [`DrillGenerator`]: weak-key-biased practice text
//! - [`Config`]: threshold and ladder configuration

pub mod badges;
pub mod drill;
pub mod error;
pub mod history;
pub mod keystats;
pub mod leaderboard;
pub mod milestones;
pub mod storage;
pub mod streak;
pub mod trainer;
pub mod weakness;

pub use badges::{Badge, BadgeId, BadgeSet};
pub use drill::DrillGenerator;
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use history::{Difficulty, History, TestResult, TotalStats};
pub use keystats::{KeySample, KeyStatEntry, KeyStats};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use milestones::MilestoneState;
pub use storage::{Config, DocKey, DocumentStore, MemoryStore, SqliteStore};
pub use streak::StreakRecord;
pub use trainer::{IngestOutcome, Trainer, TrainingSession};
pub use weakness::{SpeedLevel, WeakKeyInfo, WeaknessClassifier};
