//! Pipeline runner.
//!
//! Drives a [`RunRecord`] through the fixed stage sequence:
//!
//!   created ──> context-analyzed ──> tasks-integrated ──> tasks-aggregated
//!                                                               │
//!                       terminal <── motivation-ready <─────────┘
//!
//! There are no conditional edges and no retries. None of the stages can
//! fail; the only error is handing the runner a record that already ran.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::error::PipelineError;
use crate::planner::{aggregate_tasks, analyze_context, compose_motivation, integrate_user_tasks};
use crate::record::RunRecord;

/// Where a run record is in the pipeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum RunStatus {
    Created,
    ContextAnalyzed,
    TasksIntegrated,
    TasksAggregated,
    MotivationReady,
    Terminal,
}

impl RunStatus {
    /// The single successor of this status, if any.
    pub fn next(&self) -> Option<RunStatus> {
        match self {
            RunStatus::Created => Some(RunStatus::ContextAnalyzed),
            RunStatus::ContextAnalyzed => Some(RunStatus::TasksIntegrated),
            RunStatus::TasksIntegrated => Some(RunStatus::TasksAggregated),
            RunStatus::TasksAggregated => Some(RunStatus::MotivationReady),
            RunStatus::MotivationReady => Some(RunStatus::Terminal),
            RunStatus::Terminal => None,
        }
    }

    pub fn can_transition_to(&self, to: &RunStatus) -> bool {
        self.next().as_ref() == Some(to)
    }
}

impl Default for RunStatus {
    fn default() -> Self {
        RunStatus::Created
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunStatus::Created => "created",
            RunStatus::ContextAnalyzed => "context-analyzed",
            RunStatus::TasksIntegrated => "tasks-integrated",
            RunStatus::TasksAggregated => "tasks-aggregated",
            RunStatus::MotivationReady => "motivation-ready",
            RunStatus::Terminal => "terminal",
        };
        f.write_str(name)
    }
}

/// One planning stage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    ContextAnalyzer,
    TaskIntegrator,
    TaskAggregator,
    MotivationComposer,
}

impl Stage {
    /// Stages in execution order.
    pub const SEQUENCE: [Stage; 4] = [
        Stage::ContextAnalyzer,
        Stage::TaskIntegrator,
        Stage::TaskAggregator,
        Stage::MotivationComposer,
    ];

    /// Status the record holds once this stage has run.
    pub fn completes(&self) -> RunStatus {
        match self {
            Stage::ContextAnalyzer => RunStatus::ContextAnalyzed,
            Stage::TaskIntegrator => RunStatus::TasksIntegrated,
            Stage::TaskAggregator => RunStatus::TasksAggregated,
            Stage::MotivationComposer => RunStatus::MotivationReady,
        }
    }

    fn apply(&self, record: &mut RunRecord) {
        match self {
            Stage::ContextAnalyzer => {
                record.insights = analyze_context(&record.profile.name, &record.context);
            }
            Stage::TaskIntegrator => {
                let specs = std::mem::take(&mut record.pending_user_tasks);
                record.current_tasks = integrate_user_tasks(specs);
            }
            Stage::TaskAggregator => {
                let tasks = std::mem::take(&mut record.current_tasks);
                record.current_tasks = aggregate_tasks(tasks, &record.context, &record.goals);
            }
            Stage::MotivationComposer => {
                let user_tasks = record.user_tasks();
                let message =
                    compose_motivation(&record.profile.name, record.context.mood, &user_tasks);
                record.motivation_message = message;
            }
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ContextAnalyzer => "context_analyzer",
            Stage::TaskIntegrator => "task_integrator",
            Stage::TaskAggregator => "task_aggregator",
            Stage::MotivationComposer => "motivation_composer",
        };
        f.write_str(name)
    }
}

/// Entry in a record's stage history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageEntry {
    /// Stage that caused the transition, `None` for the final hop to terminal
    pub stage: Option<Stage>,
    pub from: RunStatus,
    pub to: RunStatus,
    pub at: DateTime<Utc>,
}

/// Runs the four planning stages in order.
#[derive(Debug, Clone, Default)]
pub struct Pipeline;

impl Pipeline {
    pub fn new() -> Self {
        Pipeline
    }

    /// Take ownership of a freshly created record and return it in the
    /// terminal state.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::AlreadyRun`] if the record is not in the
    /// `created` state.
    pub fn run(&self, mut record: RunRecord) -> Result<RunRecord, PipelineError> {
        if record.status != RunStatus::Created {
            return Err(PipelineError::AlreadyRun(record.status));
        }

        for stage in Stage::SEQUENCE {
            stage.apply(&mut record);
            advance(&mut record, Some(stage), stage.completes())?;
            debug!(%stage, status = %record.status, "stage complete");
        }
        advance(&mut record, None, RunStatus::Terminal)?;

        info!(
            tasks = record.current_tasks.len(),
            user_tasks = record.user_tasks().len(),
            "daily plan ready"
        );
        Ok(record)
    }
}

fn advance(record: &mut RunRecord, stage: Option<Stage>, to: RunStatus) -> Result<(), PipelineError> {
    let from = record.status;
    if !from.can_transition_to(&to) {
        return Err(PipelineError::InvalidTransition { from, to });
    }
    record.status = to;
    record.history.push(StageEntry {
        stage,
        from,
        to,
        at: Utc::now(),
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{DailyContext, EnergyLevel, MoodLevel, StressLevel, TimeBlock};
    use crate::profile::UserProfile;
    use crate::task::TaskSpec;

    fn record(specs: Vec<TaskSpec>) -> RunRecord {
        let context = DailyContext::today(
            MoodLevel::Good,
            EnergyLevel::High,
            StressLevel::try_from(8).unwrap(),
        )
        .with_blocks(TimeBlock::starting_this_hour(4));
        RunRecord::new(
            UserProfile::new("Ada"),
            context,
            vec!["Learn Rust".to_string()],
            specs,
        )
    }

    #[test]
    fn run_status_is_linear() {
        let mut status = RunStatus::Created;
        let mut seen = vec![status];
        while let Some(next) = status.next() {
            assert!(status.can_transition_to(&next));
            status = next;
            seen.push(status);
        }
        assert_eq!(seen.len(), 6);
        assert_eq!(status, RunStatus::Terminal);
        assert!(!RunStatus::Created.can_transition_to(&RunStatus::TasksIntegrated));
        assert!(!RunStatus::TasksAggregated.can_transition_to(&RunStatus::ContextAnalyzed));
    }

    #[test]
    fn run_reaches_terminal_with_full_history() {
        let done = Pipeline::new().run(record(Vec::new())).unwrap();
        assert_eq!(done.status, RunStatus::Terminal);

        let stages: Vec<_> = done.history.iter().map(|e| e.stage).collect();
        assert_eq!(
            stages,
            vec![
                Some(Stage::ContextAnalyzer),
                Some(Stage::TaskIntegrator),
                Some(Stage::TaskAggregator),
                Some(Stage::MotivationComposer),
                None,
            ]
        );
        assert_eq!(done.history[0].from, RunStatus::Created);
        assert_eq!(done.history[4].to, RunStatus::Terminal);
    }

    #[test]
    fn run_fills_derived_outputs() {
        let done = Pipeline::new()
            .run(record(vec![TaskSpec::new("Write report")]))
            .unwrap();

        assert!(done.insights.contains("Ada"));
        assert!(done.motivation_message.contains("1 of your own tasks"));
        assert!(done.pending_user_tasks.is_empty());
        assert_eq!(done.current_tasks[0].title, "Write report");
        assert!(done.current_tasks[0].user_created);
        // 240 - 30 = 210 -> goal task and stress relief
        assert_eq!(done.current_tasks.len(), 3);
    }

    #[test]
    fn second_run_is_rejected() {
        let pipeline = Pipeline::new();
        let done = pipeline.run(record(Vec::new())).unwrap();
        let err = pipeline.run(done).unwrap_err();
        assert_eq!(err, PipelineError::AlreadyRun(RunStatus::Terminal));
    }

    #[test]
    fn run_status_serializes_kebab_case() {
        let json = serde_json::to_string(&RunStatus::MotivationReady).unwrap();
        assert_eq!(json, "\"motivation-ready\"");
    }
}
