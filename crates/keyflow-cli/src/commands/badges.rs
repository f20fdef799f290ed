use clap::Subcommand;
use keyflow_core::{SqliteStore, Trainer};

#[derive(Subcommand)]
pub enum BadgesAction {
    /// Unlocked badges
    List,
    /// The full badge catalog
    Catalog,
}

pub fn run(action: BadgesAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        BadgesAction::List => {
            let trainer = Trainer::open()?;
            let badges = trainer.badges()?;
            println!("{}", serde_json::to_string_pretty(&badges)?);
        }
        BadgesAction::Catalog => {
            for id in Trainer::<SqliteStore>::badge_catalog() {
                println!("{} {} -- {}", id.icon(), id.name(), id.description());
            }
        }
    }
    Ok(())
}
