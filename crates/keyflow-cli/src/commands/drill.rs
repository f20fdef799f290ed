use clap::Args;
use keyflow_core::Trainer;

#[derive(Args)]
pub struct DrillArgs {
    /// Print the session as JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: DrillArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut trainer = Trainer::open()?;
    let session = trainer.start_weakness_training()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&session)?);
    } else {
        println!("{}", session.target_message);
        println!();
        println!("{}", session.training_text);
    }
    Ok(())
}
