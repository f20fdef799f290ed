use clap::Subcommand;
use keyflow_core::Trainer;

#[derive(Subcommand)]
pub enum DataAction {
    /// Delete every stored document (history, streak, badges, milestones,
    /// key statistics, leaderboard)
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: DataAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DataAction::Clear { yes } => {
            if !yes {
                eprintln!("this deletes all progress; rerun with --yes to confirm");
                return Ok(());
            }
            let mut trainer = Trainer::open()?;
            trainer.clear_all_data()?;
            println!("all data cleared");
        }
    }
    Ok(())
}
