//! The run record and the task mutation API.
//!
//! A [`RunRecord`] is created once per session, moved through the
//! [`Pipeline`](crate::pipeline::Pipeline), and then handed back to the
//! caller. After that, all changes go through the methods here.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::DailyContext;
use crate::error::{Result, TaskNotFound};
use crate::pipeline::{RunStatus, StageEntry};
use crate::profile::UserProfile;
use crate::task::{Priority, Task, TaskCategory, TaskDefaults, TaskSpec, TaskStatus};

/// Aggregate threaded through the planning pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub profile: UserProfile,
    pub context: DailyContext,
    /// Open tasks, user tasks first
    pub current_tasks: Vec<Task>,
    #[serde(default)]
    pub completed_tasks: Vec<Task>,
    #[serde(default)]
    pub missed_tasks: Vec<Task>,
    /// Free-text goals, most important first
    #[serde(default)]
    pub goals: Vec<String>,
    /// User task specs waiting for the integrator
    #[serde(default)]
    pub pending_user_tasks: Vec<TaskSpec>,
    #[serde(default)]
    pub motivation_message: String,
    #[serde(default)]
    pub insights: String,
    #[serde(default)]
    pub status: RunStatus,
    #[serde(default)]
    pub history: Vec<StageEntry>,
}

impl RunRecord {
    pub fn new(
        profile: UserProfile,
        context: DailyContext,
        goals: Vec<String>,
        pending_user_tasks: Vec<TaskSpec>,
    ) -> Self {
        RunRecord {
            profile,
            context,
            current_tasks: Vec::new(),
            completed_tasks: Vec::new(),
            missed_tasks: Vec::new(),
            goals,
            pending_user_tasks,
            motivation_message: String::new(),
            insights: String::new(),
            status: RunStatus::Created,
            history: Vec::new(),
        }
    }

    /// User-authored tasks in the current list.
    pub fn user_tasks(&self) -> Vec<&Task> {
        self.current_tasks.iter().filter(|t| t.user_created).collect()
    }

    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.current_tasks.iter().find(|t| t.id == id)
    }

    /// Mark a current task completed and move it to the completed list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskNotFound`] if no current task has `id`, including a task
    /// that was already completed.
    pub fn complete_task(&mut self, id: &str) -> std::result::Result<&Task, TaskNotFound> {
        let mut task = self.take_current(id)?;
        task.mark_completed();
        debug!(task_id = %task.id, "task completed");
        self.completed_tasks.push(task);
        Ok(&self.completed_tasks[self.completed_tasks.len() - 1])
    }

    /// Append a new user-authored task, filling omitted fields from `defaults`.
    ///
    /// The title is expected to be non-empty; callers validate it.
    pub fn add_task(&mut self, new_task: NewTask, defaults: &TaskDefaults) -> &Task {
        let task = new_task.into_task(defaults);
        debug!(task_id = %task.id, title = %task.title, "task added");
        self.current_tasks.push(task);
        &self.current_tasks[self.current_tasks.len() - 1]
    }

    /// Move a current task to in-progress.
    ///
    /// # Errors
    ///
    /// Returns an error if the task is unknown or cannot be started from its
    /// current status.
    pub fn start_task(&mut self, id: &str) -> Result<&Task> {
        let task = self
            .current_tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskNotFound { id: id.to_string() })?;
        task.transition_to(TaskStatus::InProgress)?;
        Ok(task)
    }

    /// Mark a current task missed and move it to the missed list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskNotFound`] if no current task has `id`.
    pub fn miss_task(&mut self, id: &str) -> Result<&Task> {
        let position = self.position(id)?;
        self.current_tasks[position].transition_to(TaskStatus::Missed)?;
        let task = self.current_tasks.remove(position);
        self.missed_tasks.push(task);
        Ok(&self.missed_tasks[self.missed_tasks.len() - 1])
    }

    /// Counts and minutes for the day so far.
    pub fn summary(&self) -> DaySummary {
        let minutes = |tasks: &[Task]| {
            tasks
                .iter()
                .map(|t| u64::from(t.estimated_minutes))
                .sum::<u64>()
        };
        DaySummary {
            open: self.current_tasks.len(),
            completed: self.completed_tasks.len(),
            missed: self.missed_tasks.len(),
            user_created: self.current_tasks.iter().filter(|t| t.user_created).count(),
            open_minutes: minutes(&self.current_tasks),
            completed_minutes: minutes(&self.completed_tasks),
        }
    }

    fn position(&self, id: &str) -> std::result::Result<usize, TaskNotFound> {
        self.current_tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TaskNotFound { id: id.to_string() })
    }

    fn take_current(&mut self, id: &str) -> std::result::Result<Task, TaskNotFound> {
        let position = self.position(id)?;
        Ok(self.current_tasks.remove(position))
    }
}

/// Arguments for [`RunRecord::add_task`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub estimated_minutes: Option<u32>,
    pub category: Option<TaskCategory>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        NewTask {
            title: title.into(),
            ..NewTask::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn minutes(mut self, minutes: u32) -> Self {
        self.estimated_minutes = Some(minutes);
        self
    }

    pub fn category(mut self, category: TaskCategory) -> Self {
        self.category = Some(category);
        self
    }

    fn into_task(self, defaults: &TaskDefaults) -> Task {
        let description = self
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| self.title.clone());
        Task::from_spec(TaskSpec {
            title: self.title,
            description,
            priority: self.priority.unwrap_or(defaults.priority),
            estimated_minutes: self.estimated_minutes.unwrap_or(defaults.estimated_minutes),
            category: self.category.unwrap_or(defaults.category),
            energy_required: defaults.energy_required,
        })
    }
}

/// Snapshot of a record's task lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub open: usize,
    pub completed: usize,
    pub missed: usize,
    pub user_created: usize,
    pub open_minutes: u64,
    pub completed_minutes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{EnergyLevel, MoodLevel, StressLevel};
    use crate::error::CoreError;
    use crate::task::EnergyRequirement;

    fn record_with(titles: &[&str]) -> RunRecord {
        let context = DailyContext::today(
            MoodLevel::Neutral,
            EnergyLevel::Moderate,
            StressLevel::default(),
        );
        let mut record = RunRecord::new(UserProfile::default(), context, Vec::new(), Vec::new());
        let defaults = TaskDefaults::default();
        for title in titles {
            record.add_task(NewTask::new(*title), &defaults);
        }
        record
    }

    #[test]
    fn add_task_applies_defaults() {
        let record = record_with(&["Water plants"]);
        let task = &record.current_tasks[0];
        assert_eq!(task.title, "Water plants");
        assert_eq!(task.description, "Water plants");
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.estimated_minutes, 30);
        assert_eq!(task.category, TaskCategory::Personal);
        assert_eq!(task.energy_required, EnergyRequirement::Moderate);
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.user_created);
    }

    #[test]
    fn add_task_uses_caller_values_and_defaults() {
        let mut record = record_with(&[]);
        let defaults = TaskDefaults {
            priority: Priority::Low,
            estimated_minutes: 45,
            category: TaskCategory::Work,
            energy_required: EnergyRequirement::High,
        };
        let task = record.add_task(
            NewTask::new("Deploy").priority(Priority::Urgent).description("Ship v2"),
            &defaults,
        );
        assert_eq!(task.priority, Priority::Urgent);
        assert_eq!(task.description, "Ship v2");
        assert_eq!(task.estimated_minutes, 45);
        assert_eq!(task.category, TaskCategory::Work);
        assert_eq!(task.energy_required, EnergyRequirement::High);
    }

    #[test]
    fn add_task_appends() {
        let record = record_with(&["a", "b", "c"]);
        let titles: Vec<_> = record.current_tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[test]
    fn complete_moves_task() {
        let mut record = record_with(&["a", "b"]);
        let id = record.current_tasks[0].id.clone();

        let task = record.complete_task(&id).unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
        assert!(task.completed_at.is_some());

        assert_eq!(record.current_tasks.len(), 1);
        assert_eq!(record.completed_tasks.len(), 1);
        assert!(record.find_task(&id).is_none());
    }

    #[test]
    fn complete_twice_reports_not_found() {
        let mut record = record_with(&["a"]);
        let id = record.current_tasks[0].id.clone();

        record.complete_task(&id).unwrap();
        let err = record.complete_task(&id).unwrap_err();
        assert_eq!(err, TaskNotFound { id: id.clone() });
        assert_eq!(record.completed_tasks.len(), 1);
    }

    #[test]
    fn complete_unknown_id_is_noop() {
        let mut record = record_with(&["a"]);
        assert!(record.complete_task("task-missing").is_err());
        assert_eq!(record.current_tasks.len(), 1);
        assert!(record.completed_tasks.is_empty());
    }

    #[test]
    fn start_then_complete() {
        let mut record = record_with(&["a"]);
        let id = record.current_tasks[0].id.clone();

        assert_eq!(record.start_task(&id).unwrap().status, TaskStatus::InProgress);
        assert!(matches!(record.start_task(&id), Err(CoreError::Transition(_))));

        record.complete_task(&id).unwrap();
        assert!(matches!(record.start_task(&id), Err(CoreError::TaskNotFound(_))));
    }

    #[test]
    fn miss_moves_task_to_missed_list() {
        let mut record = record_with(&["a", "b"]);
        let id = record.current_tasks[1].id.clone();

        let task = record.miss_task(&id).unwrap();
        assert_eq!(task.status, TaskStatus::Missed);
        assert!(task.completed_at.is_none());
        assert_eq!(record.missed_tasks.len(), 1);
        assert_eq!(record.current_tasks.len(), 1);
    }

    #[test]
    fn summary_minutes_do_not_overflow() {
        let mut record = record_with(&[]);
        let defaults = TaskDefaults::default();
        record.add_task(NewTask::new("a").minutes(u32::MAX), &defaults);
        record.add_task(NewTask::new("b").minutes(u32::MAX), &defaults);

        assert_eq!(record.summary().open_minutes, 2 * u64::from(u32::MAX));
    }

    #[test]
    fn summary_counts_lists() {
        let mut record = record_with(&["a", "b", "c"]);
        let first = record.current_tasks[0].id.clone();
        let second = record.current_tasks[1].id.clone();
        record.complete_task(&first).unwrap();
        record.miss_task(&second).unwrap();

        let summary = record.summary();
        assert_eq!(summary.open, 1);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.missed, 1);
        assert_eq!(summary.user_created, 1);
        assert_eq!(summary.open_minutes, 30);
        assert_eq!(summary.completed_minutes, 30);
    }
}
