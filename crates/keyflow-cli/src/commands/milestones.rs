use keyflow_core::Trainer;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let trainer = Trainer::open()?;
    let state = trainer.milestones()?;
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}
