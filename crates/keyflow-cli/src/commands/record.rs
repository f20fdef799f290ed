use clap::Args;
use keyflow_core::{Difficulty, KeySample, TestResult, Trainer};

#[derive(Args)]
pub struct RecordArgs {
    /// Words per minute
    #[arg(long)]
    pub wpm: f64,
    /// Accuracy percentage (0-100)
    #[arg(long)]
    pub accuracy: f64,
    /// Difficulty: easy, medium, hard, custom
    #[arg(long, default_value = "medium")]
    pub difficulty: String,
    /// Mode label, e.g. "timed-60"
    #[arg(long, default_value = "timed-60")]
    pub mode: String,
    /// Session duration in seconds
    #[arg(long, default_value_t = 60.0)]
    pub time: f64,
    /// Words typed
    #[arg(long, default_value_t = 0)]
    pub words: u32,
    /// Error count
    #[arg(long, default_value_t = 0)]
    pub errors: u32,
    /// Path to a JSON file of keystroke samples
    /// (array of {character, latency_ms, correct})
    #[arg(long)]
    pub samples: Option<std::path::PathBuf>,
}

pub fn run(args: RecordArgs) -> Result<(), Box<dyn std::error::Error>> {
    let difficulty = match args.difficulty.as_str() {
        "easy" => Difficulty::Easy,
        "medium" => Difficulty::Medium,
        "hard" => Difficulty::Hard,
        "custom" => Difficulty::Custom,
        other => return Err(format!("unknown difficulty: {other}").into()),
    };

    let result = TestResult {
        wpm: args.wpm,
        accuracy: args.accuracy,
        difficulty,
        timestamp: chrono::Utc::now(),
        mode: args.mode,
        time_elapsed_secs: args.time,
        words_typed: args.words,
        errors_count: args.errors,
        weak_keys: None,
    };

    let samples: Option<Vec<KeySample>> = match args.samples {
        Some(path) => Some(serde_json::from_str(&std::fs::read_to_string(path)?)?),
        None => None,
    };

    let mut trainer = Trainer::open()?;
    let outcome = trainer.record_result(result, samples.as_deref())?;

    println!("recorded. streak: {} day(s)", outcome.streak_current);
    for badge in &outcome.new_badges {
        println!("badge unlocked: {} {}", badge.icon(), badge.name());
    }
    for target in &outcome.new_milestones {
        println!("milestone reached: {target} WPM");
    }
    Ok(())
}
