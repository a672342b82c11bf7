//! Task types shared by the planning stages and the task mutation API.
//!
//! A [`Task`] is either authored by the user (`user_created = true`) or
//! synthesized by the aggregator from goals and stress signals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Task priority, ordered from least to most pressing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low = 1,
    Medium = 2,
    High = 3,
    Urgent = 4,
}

impl Priority {
    /// Numeric value on the 1-4 scale.
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl TryFrom<u8> for Priority {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Priority::Low),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::High),
            4 => Ok(Priority::Urgent),
            other => Err(ValidationError::invalid(
                "priority",
                format!("expected 1-4, got {other}"),
            )),
        }
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => other
                .parse::<u8>()
                .map_err(|_| ValidationError::invalid("priority", format!("unknown priority '{s}'")))
                .and_then(Priority::try_from),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        };
        f.write_str(name)
    }
}

/// Energy a task demands from the user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EnergyRequirement {
    Low,
    Moderate,
    High,
}

impl Default for EnergyRequirement {
    fn default() -> Self {
        EnergyRequirement::Moderate
    }
}

/// Console scale: 1 = low, 2 = moderate, 3 = high.
impl TryFrom<u8> for EnergyRequirement {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(EnergyRequirement::Low),
            2 => Ok(EnergyRequirement::Moderate),
            3 => Ok(EnergyRequirement::High),
            other => Err(ValidationError::invalid(
                "energy_required",
                format!("expected 1-3, got {other}"),
            )),
        }
    }
}

impl FromStr for EnergyRequirement {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(EnergyRequirement::Low),
            "moderate" => Ok(EnergyRequirement::Moderate),
            "high" => Ok(EnergyRequirement::High),
            other => other
                .parse::<u8>()
                .map_err(|_| {
                    ValidationError::invalid("energy_required", format!("unknown energy '{s}'"))
                })
                .and_then(EnergyRequirement::try_from),
        }
    }
}

impl fmt::Display for EnergyRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EnergyRequirement::Low => "low",
            EnergyRequirement::Moderate => "moderate",
            EnergyRequirement::High => "high",
        };
        f.write_str(name)
    }
}

/// Area of life a task belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Work,
    Personal,
    Health,
    Learning,
}

impl Default for TaskCategory {
    fn default() -> Self {
        TaskCategory::Personal
    }
}

impl FromStr for TaskCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "work" => Ok(TaskCategory::Work),
            "personal" => Ok(TaskCategory::Personal),
            "health" => Ok(TaskCategory::Health),
            "learning" => Ok(TaskCategory::Learning),
            _ => Err(ValidationError::invalid(
                "category",
                format!("expected work/personal/health/learning, got '{s}'"),
            )),
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskCategory::Work => "work",
            TaskCategory::Personal => "personal",
            TaskCategory::Health => "health",
            TaskCategory::Learning => "learning",
        };
        f.write_str(name)
    }
}

/// Task status.
///
/// Valid transitions:
/// - PENDING → IN_PROGRESS | COMPLETED | MISSED | RESCHEDULED
/// - IN_PROGRESS → COMPLETED | MISSED | RESCHEDULED | PENDING
/// - RESCHEDULED → PENDING | IN_PROGRESS | COMPLETED
/// - MISSED → RESCHEDULED
/// - COMPLETED is terminal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Missed,
    Rescheduled,
}

impl TaskStatus {
    /// Check if a transition is valid.
    pub fn can_transition_to(&self, to: &TaskStatus) -> bool {
        match self {
            TaskStatus::Pending => matches!(
                to,
                TaskStatus::InProgress
                    | TaskStatus::Completed
                    | TaskStatus::Missed
                    | TaskStatus::Rescheduled
            ),
            TaskStatus::InProgress => matches!(
                to,
                TaskStatus::Completed
                    | TaskStatus::Missed
                    | TaskStatus::Rescheduled
                    | TaskStatus::Pending
            ),
            TaskStatus::Rescheduled => matches!(
                to,
                TaskStatus::Pending | TaskStatus::InProgress | TaskStatus::Completed
            ),
            TaskStatus::Missed => matches!(to, TaskStatus::Rescheduled),
            TaskStatus::Completed => false,
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Missed => "missed",
            TaskStatus::Rescheduled => "rescheduled",
        };
        f.write_str(name)
    }
}

/// A schedulable unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// Estimated duration in minutes
    pub estimated_minutes: u32,
    pub category: TaskCategory,
    pub energy_required: EnergyRequirement,
    pub status: TaskStatus,
    /// Optional deadline; the planning rules never set it
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    /// Set if and only if `status` is completed
    pub completed_at: Option<DateTime<Utc>>,
    /// True for tasks the user wrote, false for generated suggestions
    pub user_created: bool,
}

impl Task {
    /// Create a pending, system-generated task with default attributes.
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Task {
            id: new_task_id(),
            description: title.clone(),
            title,
            priority: Priority::default(),
            estimated_minutes: TaskDefaults::default().estimated_minutes,
            category: TaskCategory::default(),
            energy_required: EnergyRequirement::default(),
            status: TaskStatus::Pending,
            deadline: None,
            created_at: Utc::now(),
            completed_at: None,
            user_created: false,
        }
    }

    /// Materialize a user-authored task from a spec.
    pub fn from_spec(spec: TaskSpec) -> Self {
        Task {
            id: new_task_id(),
            title: spec.title,
            description: spec.description,
            priority: spec.priority,
            estimated_minutes: spec.estimated_minutes,
            category: spec.category,
            energy_required: spec.energy_required,
            status: TaskStatus::Pending,
            deadline: None,
            created_at: Utc::now(),
            completed_at: None,
            user_created: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_minutes(mut self, minutes: u32) -> Self {
        self.estimated_minutes = minutes;
        self
    }

    pub fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_energy(mut self, energy: EnergyRequirement) -> Self {
        self.energy_required = energy;
        self
    }

    /// Transition to a new status.
    ///
    /// Returns an error if the transition is invalid.
    pub fn transition_to(&mut self, new_status: TaskStatus) -> Result<(), TaskTransitionError> {
        if !self.status.can_transition_to(&new_status) {
            return Err(TaskTransitionError {
                from: self.status,
                to: new_status,
            });
        }

        if new_status == TaskStatus::Completed {
            self.completed_at = Some(Utc::now());
        }

        self.status = new_status;
        Ok(())
    }

    /// Force the completed status, stamping the completion time once.
    pub(crate) fn mark_completed(&mut self) {
        self.status = TaskStatus::Completed;
        if self.completed_at.is_none() {
            self.completed_at = Some(Utc::now());
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

fn new_task_id() -> String {
    format!("task-{}", uuid::Uuid::new_v4())
}

/// Error returned when an invalid status transition is attempted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskTransitionError {
    pub from: TaskStatus,
    pub to: TaskStatus,
}

impl fmt::Display for TaskTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid status transition: {} → {}", self.from, self.to)
    }
}

impl std::error::Error for TaskTransitionError {}

/// Externally supplied task specification (no identifier, no status).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub title: String,
    /// Falls back to the title when omitted in JSON input
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default = "default_minutes")]
    pub estimated_minutes: u32,
    #[serde(default)]
    pub category: TaskCategory,
    #[serde(default)]
    pub energy_required: EnergyRequirement,
}

fn default_minutes() -> u32 {
    30
}

impl TaskSpec {
    /// Spec with the given title and default attributes.
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        TaskSpec {
            description: title.clone(),
            title,
            priority: Priority::default(),
            estimated_minutes: default_minutes(),
            category: TaskCategory::default(),
            energy_required: EnergyRequirement::default(),
        }
    }

    /// Fill an empty description with the title.
    pub fn normalized(mut self) -> Self {
        if self.description.trim().is_empty() {
            self.description = self.title.clone();
        }
        self
    }

    /// Check a spec received from outside: the title must be non-blank and
    /// the duration positive.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming the offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Empty("title".to_string()));
        }
        validate_minutes(self.estimated_minutes)?;
        Ok(())
    }
}

/// Task durations are positive whole minutes.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidValue`] for zero.
pub fn validate_minutes(minutes: u32) -> Result<u32, ValidationError> {
    if minutes == 0 {
        return Err(ValidationError::invalid(
            "estimated_minutes",
            "must be a positive number of minutes",
        ));
    }
    Ok(minutes)
}

/// Attributes applied by `add_task` when the caller omits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDefaults {
    pub priority: Priority,
    pub estimated_minutes: u32,
    pub category: TaskCategory,
    pub energy_required: EnergyRequirement,
}

impl Default for TaskDefaults {
    fn default() -> Self {
        TaskDefaults {
            priority: Priority::Medium,
            estimated_minutes: default_minutes(),
            category: TaskCategory::Personal,
            energy_required: EnergyRequirement::Moderate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_creation() {
        let task = Task::new("Read a chapter");
        assert_eq!(task.title, "Read a chapter");
        assert_eq!(task.description, "Read a chapter");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.estimated_minutes, 30);
        assert!(!task.user_created);
        assert!(task.completed_at.is_none());
        assert!(task.id.starts_with("task-"));
    }

    #[test]
    fn task_ids_are_unique() {
        let a = Task::new("a");
        let b = Task::new("a");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn from_spec_marks_user_created() {
        let spec = TaskSpec {
            title: "Gym".to_string(),
            description: "Leg day".to_string(),
            priority: Priority::High,
            estimated_minutes: 60,
            category: TaskCategory::Health,
            energy_required: EnergyRequirement::High,
        };
        let task = Task::from_spec(spec);
        assert!(task.user_created);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.estimated_minutes, 60);
        assert_eq!(task.category, TaskCategory::Health);
        assert_eq!(task.energy_required, EnergyRequirement::High);
    }

    #[test]
    fn priority_ordering() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::High < Priority::Urgent);
        assert_eq!(Priority::Urgent.value(), 4);
    }

    #[test]
    fn priority_parsing() {
        assert_eq!(Priority::try_from(3).unwrap(), Priority::High);
        assert!(Priority::try_from(0).is_err());
        assert!(Priority::try_from(5).is_err());
        assert_eq!("urgent".parse::<Priority>().unwrap(), Priority::Urgent);
        assert_eq!("2".parse::<Priority>().unwrap(), Priority::Medium);
        assert!("critical".parse::<Priority>().is_err());
    }

    #[test]
    fn energy_requirement_parsing() {
        assert_eq!(EnergyRequirement::try_from(1).unwrap(), EnergyRequirement::Low);
        assert_eq!(EnergyRequirement::try_from(2).unwrap(), EnergyRequirement::Moderate);
        assert!(EnergyRequirement::try_from(4).is_err());
        assert_eq!("HIGH".parse::<EnergyRequirement>().unwrap(), EnergyRequirement::High);
    }

    #[test]
    fn category_parsing() {
        assert_eq!("Learning".parse::<TaskCategory>().unwrap(), TaskCategory::Learning);
        assert!("chores".parse::<TaskCategory>().is_err());
    }

    #[test]
    fn status_transitions() {
        assert!(TaskStatus::Pending.can_transition_to(&TaskStatus::InProgress));
        assert!(TaskStatus::Pending.can_transition_to(&TaskStatus::Completed));
        assert!(TaskStatus::InProgress.can_transition_to(&TaskStatus::Pending));
        assert!(TaskStatus::Missed.can_transition_to(&TaskStatus::Rescheduled));
        assert!(!TaskStatus::Missed.can_transition_to(&TaskStatus::Completed));
        assert!(!TaskStatus::Completed.can_transition_to(&TaskStatus::Pending));
        assert!(!TaskStatus::Pending.can_transition_to(&TaskStatus::Pending));
    }

    #[test]
    fn completing_stamps_completion_time() {
        let mut task = Task::new("Test");
        task.transition_to(TaskStatus::InProgress).unwrap();
        assert!(task.completed_at.is_none());

        task.transition_to(TaskStatus::Completed).unwrap();
        assert!(task.is_completed());
        assert!(task.completed_at.is_some());
    }

    #[test]
    fn invalid_transition_leaves_task_untouched() {
        let mut task = Task::new("Test");
        task.transition_to(TaskStatus::Completed).unwrap();

        let err = task.transition_to(TaskStatus::Pending).unwrap_err();
        assert_eq!(err.from, TaskStatus::Completed);
        assert_eq!(err.to, TaskStatus::Pending);
        assert_eq!(task.status, TaskStatus::Completed);
    }

    #[test]
    fn task_serialization_roundtrip() {
        let mut task = Task::new("Write report")
            .with_description("Quarterly numbers")
            .with_priority(Priority::Urgent)
            .with_minutes(90)
            .with_category(TaskCategory::Work)
            .with_energy(EnergyRequirement::High);
        task.user_created = true;
        task.transition_to(TaskStatus::Completed).unwrap();

        let json = serde_json::to_string(&task).unwrap();
        let decoded: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, task);
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn spec_validation() {
        assert!(TaskSpec::new("Write report").validate().is_ok());

        let blank = TaskSpec::new("   ");
        assert_eq!(blank.validate(), Err(ValidationError::Empty("title".to_string())));

        let spec: TaskSpec =
            serde_json::from_str(r#"{"title": "x", "estimated_minutes": 0}"#).unwrap();
        let err = spec.validate().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "estimated_minutes"));
    }

    #[test]
    fn spec_deserializes_with_defaults() {
        let spec: TaskSpec = serde_json::from_str(r#"{"title": "Call mom"}"#).unwrap();
        let spec = spec.normalized();
        assert_eq!(spec.description, "Call mom");
        assert_eq!(spec.priority, Priority::Medium);
        assert_eq!(spec.estimated_minutes, 30);
        assert_eq!(spec.category, TaskCategory::Personal);
        assert_eq!(spec.energy_required, EnergyRequirement::Moderate);
    }
}
