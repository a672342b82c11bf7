//! Non-interactive planning.

use std::path::{Path, PathBuf};

use clap::Args;
use minddoer_core::{
    Config, DailyContext, EnergyLevel, MoodLevel, Pipeline, RunRecord, StressLevel, TaskSpec,
    TimeBlock,
};

use super::input::parse_hours;
use super::render;

#[derive(Args)]
pub struct PlanArgs {
    /// Name used in messages (default: profile.name from config)
    #[arg(long)]
    name: Option<String>,
    /// Mood, 1 (very low) to 5 (excellent)
    #[arg(long, default_value_t = 3)]
    mood: u8,
    /// Energy, 1 (exhausted) to 5 (peak)
    #[arg(long, default_value_t = 3)]
    energy: u8,
    /// Stress, 1 to 10
    #[arg(long, default_value_t = 5)]
    stress: u8,
    /// Hours available for tasks today, 0 to 24
    #[arg(long, default_value = "4")]
    hours: String,
    /// Today's weather, noted in the context
    #[arg(long)]
    weather: Option<String>,
    /// A goal, most important first (repeatable)
    #[arg(long = "goal")]
    goals: Vec<String>,
    /// JSON file with an array of your own tasks
    #[arg(long)]
    tasks_file: Option<PathBuf>,
    /// Print the full run record as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let hours = parse_hours(&args.hours)?;
    let mut context = DailyContext::today(
        MoodLevel::try_from(args.mood)?,
        EnergyLevel::try_from(args.energy)?,
        StressLevel::try_from(args.stress)?,
    )
    .with_blocks(TimeBlock::starting_this_hour(hours));
    if let Some(weather) = args.weather.filter(|w| !w.trim().is_empty()) {
        context = context.with_weather(weather);
    }

    let specs = match &args.tasks_file {
        Some(path) => read_task_specs(path)?,
        None => Vec::new(),
    };

    let config = Config::load_or_default();
    let profile = config.user_profile(args.name.as_deref());

    let record = RunRecord::new(profile, context, args.goals, specs);
    let record = Pipeline::new().run(record)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        let stdout = std::io::stdout();
        render::write_plan(&mut stdout.lock(), &record)?;
    }
    Ok(())
}

fn read_task_specs(path: &Path) -> Result<Vec<TaskSpec>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let specs: Vec<TaskSpec> = serde_json::from_str(&content)?;
    for spec in &specs {
        spec.validate()?;
    }
    Ok(specs)
}
