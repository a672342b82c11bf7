//! Interactive console session.
//!
//! Collects the day's context, goals and the user's own tasks, runs the
//! planning pipeline, then loops over add / complete / view / exit until the
//! user leaves or input ends.

use std::fmt;
use std::io::{self, BufRead, Write};

use minddoer_core::{
    Config, DailyContext, EnergyLevel, EnergyRequirement, MoodLevel, NewTask, Pipeline, Priority,
    RunRecord, StressLevel, TaskCategory, TaskSpec, TimeBlock, UserProfile, ValidationError,
};

use super::input::{parse_hours, parse_minutes};
use super::render;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(stdin.lock(), stdout.lock(), &config)?;
    Ok(())
}

/// Drive a whole session over the given streams and return the final record.
pub fn run_with<R: BufRead, W: Write>(
    input: R,
    output: W,
    config: &Config,
) -> Result<RunRecord, Box<dyn std::error::Error>> {
    let mut console = Console { input, output };

    console.say("🤖 Personal AI Life Coach Agent")?;
    console.say(&"=".repeat(50))?;

    let record = gather_record(&mut console, config)?;
    let mut record = Pipeline::new().run(record)?;
    render::write_plan(&mut console.output, &record)?;

    manage_tasks(&mut console, &mut record, config)?;
    Ok(record)
}

fn gather_record<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &Config,
) -> io::Result<RunRecord> {
    console.say("\n🌟 Welcome to your Personal AI Life Coach!")?;
    console.say("Let's start by understanding your day...")?;

    let name = console.ask_or("What's your name? ", &config.profile.name)?;

    console.say("\nHow are you feeling today?")?;
    console.say("1. Very Low  2. Low  3. Neutral  4. Good  5. Excellent")?;
    let mood: MoodLevel = console.ask_parsed("Enter number (1-5): ", "3", scale::<MoodLevel>)?;

    console.say("\nWhat's your energy level?")?;
    console.say("1. Exhausted  2. Low  3. Moderate  4. High  5. Peak")?;
    let energy: EnergyLevel =
        console.ask_parsed("Enter number (1-5): ", "3", scale::<EnergyLevel>)?;

    let stress: StressLevel =
        console.ask_parsed("Stress level (1-10): ", "5", scale::<StressLevel>)?;

    console.say("\nHow many hours do you have available today for tasks?")?;
    let hours = console.ask_parsed("Hours (e.g., 4): ", "4", parse_hours)?;

    let goals = gather_goals(console)?;
    let specs = gather_task_specs(console)?;

    let profile = UserProfile {
        name,
        ..config.user_profile(None)
    };
    let context =
        DailyContext::today(mood, energy, stress).with_blocks(TimeBlock::starting_this_hour(hours));
    Ok(RunRecord::new(profile, context, goals, specs))
}

fn gather_goals<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<Vec<String>> {
    console.say("\n🎯 Let's talk about your goals...")?;
    console.say("Enter your goals (press Enter after each, empty line to finish):")?;

    let mut goals = Vec::new();
    while let Some(goal) = console.ask("Goal: ")? {
        if goal.is_empty() {
            break;
        }
        goals.push(goal);
    }
    Ok(goals)
}

fn gather_task_specs<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> io::Result<Vec<TaskSpec>> {
    console.say("\n📝 Want to add your own tasks? (y/n)")?;
    let wants = console.ask("")?.unwrap_or_default();
    if !wants.to_lowercase().starts_with('y') {
        return Ok(Vec::new());
    }

    console.say("Add your custom tasks (press Enter after each, empty title to finish):")?;
    let mut specs = Vec::new();
    loop {
        let title = match console.ask("Task title: ")? {
            Some(title) if !title.is_empty() => title,
            _ => break,
        };
        let description = console.ask_or("Description (optional): ", &title)?;

        console.say("Priority: 1-Low, 2-Medium, 3-High, 4-Urgent")?;
        let priority: Priority = console.ask_parsed("Priority (1-4): ", "2", str::parse)?;
        let estimated_minutes: u32 =
            console.ask_parsed("Estimated time (minutes): ", "30", parse_minutes)?;
        let category: TaskCategory = console.ask_parsed(
            "Category (work/personal/health/learning): ",
            "personal",
            str::parse,
        )?;

        console.say("Energy required: 1-Low, 2-Moderate, 3-High")?;
        let energy_required: EnergyRequirement =
            console.ask_parsed("Energy (1-3): ", "2", str::parse)?;

        console.say(&format!("✅ Added: {title}"))?;
        specs.push(TaskSpec {
            title,
            description,
            priority,
            estimated_minutes,
            category,
            energy_required,
        });
    }
    Ok(specs)
}

fn manage_tasks<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    record: &mut RunRecord,
    config: &Config,
) -> io::Result<()> {
    let defaults = config.task_defaults();

    loop {
        console.say(&format!("\n{}", "=".repeat(30)))?;
        console.say("What would you like to do?")?;
        console.say("1. Add a new task")?;
        console.say("2. Mark task as complete")?;
        console.say("3. View current tasks")?;
        console.say("4. Exit")?;

        let Some(choice) = console.ask("Enter choice (1-4): ")? else {
            break;
        };

        match choice.as_str() {
            "1" => {
                let title = console.ask("Task title: ")?.unwrap_or_default();
                if title.is_empty() {
                    console.say("Task title cannot be empty.")?;
                    continue;
                }
                let mut new_task = NewTask::new(title.clone());
                let description = console.ask("Description (optional): ")?.unwrap_or_default();
                if !description.is_empty() {
                    new_task = new_task.description(description);
                }

                console.say("Priority: 1-Low, 2-Medium, 3-High, 4-Urgent")?;
                let priority: Priority = console.ask_parsed(
                    "Priority (1-4): ",
                    &defaults.priority.value().to_string(),
                    str::parse,
                )?;
                let minutes: u32 = console.ask_parsed(
                    "Estimated time (minutes): ",
                    &defaults.estimated_minutes.to_string(),
                    parse_minutes,
                )?;
                let category: TaskCategory = console.ask_parsed(
                    "Category (work/personal/health/learning): ",
                    &defaults.category.to_string(),
                    str::parse,
                )?;

                new_task = new_task.priority(priority).minutes(minutes).category(category);
                record.add_task(new_task, &defaults);
                console.say(&format!("✅ Added task: {title}"))?;
            }
            "2" => {
                render::write_tasks(&mut console.output, &record.current_tasks)?;
                let answer = console.ask("Enter task number to complete: ")?.unwrap_or_default();
                match answer.parse::<usize>() {
                    Ok(n) if (1..=record.current_tasks.len()).contains(&n) => {
                        let id = record.current_tasks[n - 1].id.clone();
                        match record.complete_task(&id) {
                            Ok(_) => console.say("✅ Task marked as complete!")?,
                            Err(e) => console.say(&format!("⚠️  {e}"))?,
                        }
                    }
                    Ok(_) => console.say("Invalid task number.")?,
                    Err(_) => console.say("Please enter a valid number.")?,
                }
            }
            "3" => render::write_tasks(&mut console.output, &record.current_tasks)?,
            "4" => break,
            _ => console.say("Invalid choice. Please try again.")?,
        }
    }

    render::write_summary(&mut console.output, &record.summary())?;
    console.say("🌟 Great job today! Remember: Progress > Perfection")
}

/// Parse a numeric answer on one of the console's 1-N scales.
fn scale<T>(answer: &str) -> Result<T, String>
where
    T: TryFrom<u8, Error = ValidationError>,
{
    let value: u8 = answer
        .parse()
        .map_err(|_| format!("'{answer}' is not a number"))?;
    T::try_from(value).map_err(|e| e.to_string())
}

struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Prompt and read one trimmed line. `None` once input is exhausted.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ask_or(&mut self, prompt: &str, default: &str) -> io::Result<String> {
        Ok(self
            .ask(prompt)?
            .filter(|answer| !answer.is_empty())
            .unwrap_or_else(|| default.to_string()))
    }

    /// Re-prompt until `parse` accepts the answer. Empty answers use `default`.
    fn ask_parsed<T, E: fmt::Display>(
        &mut self,
        prompt: &str,
        default: &str,
        parse: impl Fn(&str) -> Result<T, E>,
    ) -> io::Result<T> {
        loop {
            let answer = self.ask(prompt)?;
            let exhausted = answer.is_none();
            let text = answer
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| default.to_string());
            match parse(&text) {
                Ok(value) => return Ok(value),
                Err(e) if exhausted => {
                    return Err(io::Error::new(io::ErrorKind::UnexpectedEof, e.to_string()));
                }
                Err(e) => self.say(&format!("⚠️  {e}"))?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minddoer_core::{RunStatus, TaskStatus};

    fn session(script: &str) -> (RunRecord, String) {
        let mut output = Vec::new();
        let record = run_with(script.as_bytes(), &mut output, &Config::default()).unwrap();
        (record, String::from_utf8(output).unwrap())
    }

    #[test]
    fn empty_input_uses_defaults() {
        let (record, out) = session("");
        assert_eq!(record.status, RunStatus::Terminal);
        assert_eq!(record.profile.name, "User");
        assert_eq!(record.context.mood, MoodLevel::Neutral);
        assert_eq!(record.context.energy, EnergyLevel::Moderate);
        assert_eq!(record.context.stress_level.value(), 5);
        assert_eq!(record.context.available_time_blocks.len(), 2);
        assert!(out.contains("YOUR PERSONALIZED DAILY PLAN"));
        assert!(out.contains("Progress > Perfection"));
    }

    #[test]
    fn full_session_with_custom_task_and_completion() {
        let script = [
            "Ada", "4", "2", "8", "4", // context
            "Learn Rust", "", // goals
            "y", "Write report", "", "3", "45", "work", "3", "", // custom tasks
            "2", "1", // complete the first task
            "4",
        ]
        .join("\n");
        let (record, out) = session(&script);

        assert_eq!(record.profile.name, "Ada");
        assert!(record.motivation_message.contains("1 of your own tasks"));

        let done = &record.completed_tasks[0];
        assert_eq!(done.title, "Write report");
        assert_eq!(done.description, "Write report");
        assert_eq!(done.priority, Priority::High);
        assert_eq!(done.estimated_minutes, 45);
        assert_eq!(done.status, TaskStatus::Completed);

        // 240 - 45 = 195 -> goal task; stress 8 -> relief break
        let titles: Vec<_> = record.current_tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Progress: Learn Rust...", "Stress Relief Break"]);
        assert!(out.contains("✅ Task marked as complete!"));
    }

    #[test]
    fn add_rejects_empty_title() {
        let script = ["", "", "", "", "", "", "n", "1", "", "4"].join("\n");
        let (record, out) = session(&script);
        assert!(out.contains("Task title cannot be empty."));
        assert!(record.user_tasks().is_empty());
    }

    #[test]
    fn add_task_mid_session() {
        let script = [
            "", "", "", "", "0", "", "n", // context with no time, no goals, no tasks
            "1", "Call mom", "", "", "", "", // add with defaults
            "4",
        ]
        .join("\n");
        let (record, out) = session(&script);

        assert_eq!(record.current_tasks.len(), 1);
        let task = &record.current_tasks[0];
        assert_eq!(task.title, "Call mom");
        assert_eq!(task.description, "Call mom");
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.estimated_minutes, 30);
        assert_eq!(task.category, TaskCategory::Personal);
        assert!(task.user_created);
        assert!(out.contains("✅ Added task: Call mom"));
    }

    #[test]
    fn invalid_answers_are_reprompted() {
        let script = ["", "9", "4", "", "", "", "", "n", "7", "2", "abc", "4"].join("\n");
        let (record, out) = session(&script);
        assert_eq!(record.context.mood, MoodLevel::Good);
        assert!(out.contains("expected 1-5, got 9"));
        assert!(out.contains("Invalid choice. Please try again."));
        assert!(out.contains("Please enter a valid number."));
    }

    #[test]
    fn zero_minutes_are_reprompted() {
        let script = [
            "", "", "", "", "", "", // context and goals
            "y", "Stretch", "", "", "0", "15", "", "", "", // own task
            "1", "Walk", "", "", "0", "20", "", // added mid-session
            "4",
        ]
        .join("\n");
        let (record, out) = session(&script);

        let minutes: Vec<_> = record
            .user_tasks()
            .iter()
            .map(|t| (t.title.as_str(), t.estimated_minutes))
            .collect();
        assert_eq!(minutes, vec![("Stretch", 15), ("Walk", 20)]);
        assert_eq!(out.matches("must be a positive number of minutes").count(), 2);
    }

    #[test]
    fn hours_beyond_one_day_are_reprompted() {
        let script = ["", "", "", "", "25", "6", "", "n", "4"].join("\n");
        let (record, out) = session(&script);
        assert_eq!(record.context.available_time_blocks.len(), 3);
        assert!(out.contains("must be between 0 and 24, got 25"));
    }
}
