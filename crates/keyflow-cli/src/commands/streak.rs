use keyflow_core::Trainer;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut trainer = Trainer::open()?;
    // The read reconciles: a lapsed streak shows as 0 here.
    let streak = trainer.streak()?;
    println!("{}", serde_json::to_string_pretty(&streak)?);
    Ok(())
}
