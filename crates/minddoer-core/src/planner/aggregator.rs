//! Merges user tasks with rule-derived suggestions under a time budget.
//!
//! Thresholds are part of the contract and are not configurable:
//! a goal task needs more than 45 free minutes (checked inside a
//! more-than-30 gate) and costs 30; a stress-relief task needs stress of at
//! least 6 and more than 15 free minutes.

use tracing::debug;

use crate::context::DailyContext;
use crate::task::{EnergyRequirement, Priority, Task, TaskCategory};

pub const GOAL_TASK_MINUTES: u32 = 30;
pub const STRESS_RELIEF_MINUTES: u32 = 15;
pub const STRESS_RELIEF_TITLE: &str = "Stress Relief Break";

const GOAL_GATE_MINUTES: i64 = 30;
const GOAL_TASK_THRESHOLD: i64 = 45;
const STRESS_RELIEF_THRESHOLD: i64 = 15;
const STRESS_RELIEF_MIN_STRESS: u8 = 6;
const GOAL_TITLE_CHARS: usize = 25;

/// Append suggestions to `tasks` and return the combined list.
///
/// User tasks keep their original order and come first, followed by at most
/// one goal task and at most one stress-relief task.
pub fn aggregate_tasks(tasks: Vec<Task>, context: &DailyContext, goals: &[String]) -> Vec<Task> {
    let available = context.available_minutes();
    let user_minutes: i64 = tasks
        .iter()
        .filter(|t| t.user_created)
        .map(|t| i64::from(t.estimated_minutes))
        .sum();
    let mut remaining = available - user_minutes;

    debug!(available, user_minutes, remaining, "aggregating tasks");

    let mut all_tasks = tasks;

    if remaining > GOAL_GATE_MINUTES {
        for goal in goals.iter().take(1) {
            if remaining > GOAL_TASK_THRESHOLD {
                all_tasks.push(goal_task(goal));
                remaining -= i64::from(GOAL_TASK_MINUTES);
            }
        }
    }

    if context.stress_level.value() >= STRESS_RELIEF_MIN_STRESS
        && remaining > STRESS_RELIEF_THRESHOLD
    {
        all_tasks.push(stress_relief_task());
    }

    all_tasks
}

/// Suggestion that moves the user one step towards `goal`.
pub fn goal_task(goal: &str) -> Task {
    let short: String = goal.chars().take(GOAL_TITLE_CHARS).collect();
    Task::new(format!("Progress: {short}..."))
        .with_description(format!("Take a step towards: {goal}"))
        .with_priority(Priority::Medium)
        .with_minutes(GOAL_TASK_MINUTES)
        .with_category(TaskCategory::Personal)
        .with_energy(EnergyRequirement::Moderate)
}

pub fn stress_relief_task() -> Task {
    Task::new(STRESS_RELIEF_TITLE)
        .with_description("Take time for yourself - breathe, walk, or relax")
        .with_priority(Priority::High)
        .with_minutes(STRESS_RELIEF_MINUTES)
        .with_category(TaskCategory::Health)
        .with_energy(EnergyRequirement::Low)
}
