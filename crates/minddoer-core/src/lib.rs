//! # MindDoer Core Library
//!
//! Core logic for MindDoer, a daily planning assistant. A day is planned by
//! running a [`RunRecord`] through a fixed four-stage [`Pipeline`]:
//!
//! - **Context analysis**: summarize mood, energy, time and stress
//! - **Task integration**: turn user-authored [`TaskSpec`]s into tasks
//! - **Task aggregation**: add goal and stress-relief tasks while time allows
//! - **Motivation**: compose a short message matched to the user's mood
//!
//! After the run the record is a plain task list mutated through
//! [`RunRecord::add_task`], [`RunRecord::complete_task`] and friends.
//!
//! ## Key Components
//!
//! - [`Pipeline`]: Linear stage runner
//! - [`RunRecord`]: The day's aggregate and task mutation API
//! - [`GoalIndex`]: Similarity search over the user's goals
//! - [`Config`]: TOML configuration

pub mod context;
pub mod error;
pub mod memory;
pub mod pipeline;
pub mod planner;
pub mod profile;
pub mod record;
pub mod storage;
pub mod task;

pub use context::{
    DailyContext, EnergyLevel, MoodLevel, StressLevel, TimeBlock, MAX_AVAILABLE_HOURS,
};
pub use error::{
    ConfigError, CoreError, MemoryError, PipelineError, TaskNotFound, ValidationError,
};
pub use memory::{Embedder, GoalDocument, GoalIndex, HashingEmbedder, IndexHandle, ScoredGoal};
pub use pipeline::{Pipeline, RunStatus, Stage, StageEntry};
pub use profile::{MotivationStyle, UserProfile};
pub use record::{DaySummary, NewTask, RunRecord};
pub use storage::{data_dir, Config};
pub use task::{
    validate_minutes, EnergyRequirement, Priority, Task, TaskCategory, TaskDefaults, TaskSpec,
    TaskStatus, TaskTransitionError,
};
