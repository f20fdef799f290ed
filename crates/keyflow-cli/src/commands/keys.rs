use clap::Subcommand;
use keyflow_core::{KeySample, Trainer};

#[derive(Subcommand)]
pub enum KeysAction {
    /// Per-key latency/error table, slowest first
    Heatmap,
    /// Keys that qualify for targeted drilling
    Weak,
    /// Fold a JSON file of keystroke samples into the statistics
    Update {
        /// Array of {character, latency_ms, correct}
        path: std::path::PathBuf,
    },
}

pub fn run(action: KeysAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut trainer = Trainer::open()?;
    match action {
        KeysAction::Heatmap => {
            let heatmap = trainer.heatmap()?;
            println!("{}", serde_json::to_string_pretty(&heatmap)?);
        }
        KeysAction::Weak => {
            let weak = trainer.weak_keys()?;
            println!("{}", serde_json::to_string_pretty(&weak)?);
        }
        KeysAction::Update { path } => {
            let samples: Vec<KeySample> =
                serde_json::from_str(&std::fs::read_to_string(path)?)?;
            trainer.batch_update_key_stats(&samples)?;
            println!("updated {} sample(s)", samples.len());
        }
    }
    Ok(())
}
