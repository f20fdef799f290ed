pub mod badges;
pub mod data;
pub mod drill;
pub mod keys;
pub mod leaderboard;
pub mod milestones;
pub mod record;
pub mod stats;
pub mod streak;
