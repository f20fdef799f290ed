use clap::Subcommand;
use keyflow_core::Trainer;

#[derive(Subcommand)]
pub enum LeaderboardAction {
    /// Top 10 of the last 7 days
    Weekly,
    /// All-time top 10
    AllTime,
}

pub fn run(action: LeaderboardAction) -> Result<(), Box<dyn std::error::Error>> {
    let trainer = Trainer::open()?;
    let view = match action {
        LeaderboardAction::Weekly => trainer.leaderboard_weekly()?,
        LeaderboardAction::AllTime => trainer.leaderboard_all_time()?,
    };
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
