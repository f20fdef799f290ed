use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "keyflow-cli", version, about = "Keyflow CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a completed test result
    Record(commands::record::RecordArgs),
    /// Aggregate statistics
    Stats,
    /// Daily practice streak
    Streak,
    /// Achievement badges
    Badges {
        #[command(subcommand)]
        action: commands::badges::BadgesAction,
    },
    /// WPM milestones
    Milestones,
    /// Personal leaderboard
    Leaderboard {
        #[command(subcommand)]
        action: commands::leaderboard::LeaderboardAction,
    },
    /// Per-key statistics
    Keys {
        #[command(subcommand)]
        action: commands::keys::KeysAction,
    },
    /// Generate a weakness drill
    Drill(commands::drill::DrillArgs),
    /// Stored data management
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Record(args) => commands::record::run(args),
        Commands::Stats => commands::stats::run(),
        Commands::Streak => commands::streak::run(),
        Commands::Badges { action } => commands::badges::run(action),
        Commands::Milestones => commands::milestones::run(),
        Commands::Leaderboard { action } => commands::leaderboard::run(action),
        Commands::Keys { action } => commands::keys::run(action),
        Commands::Drill(args) => commands::drill::run(args),
        Commands::Data { action } => commands::data::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
