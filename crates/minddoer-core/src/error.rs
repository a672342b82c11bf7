//! Core error types for minddoer-core.
//!
//! The planning stages themselves never fail. Errors come from the edges:
//! parsing user input, reading configuration, the goal index on disk, and
//! lookups through the task mutation API.

use std::path::PathBuf;
use thiserror::Error;

use crate::pipeline::RunStatus;
use crate::task::TaskTransitionError;

/// Core error type for minddoer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Goal memory errors
    #[error("Goal memory error: {0}")]
    Memory(#[from] MemoryError),

    /// Pipeline errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Task lookup failed
    #[error(transparent)]
    TaskNotFound(#[from] TaskNotFound),

    /// Invalid task status change
    #[error(transparent)]
    Transition(#[from] TaskTransitionError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Home/config directory could not be prepared
    #[error("Cannot prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Validation errors raised while parsing user input at the boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Empty required text
    #[error("'{0}' must not be empty")]
    Empty(String),
}

impl ValidationError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Goal memory (similarity index) errors.
#[derive(Error, Debug)]
pub enum MemoryError {
    /// No index has been persisted at the handle location
    #[error("No goal index found at {0}")]
    NotFound(PathBuf),

    /// Stored vectors were produced by an embedder of another size
    #[error("Embedding dimension mismatch: index has {stored}, embedder produces {expected}")]
    DimensionMismatch { stored: usize, expected: usize },

    /// IO failure while reading or writing the index
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The embedding model failed to load or to embed a text
    #[error("Embedding failed: {0}")]
    Embedding(String),

    /// Index file is not valid JSON
    #[error("Corrupt goal index: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Pipeline runner errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The record has already left the `created` state
    #[error("Run record already processed (status: {0})")]
    AlreadyRun(RunStatus),

    /// A stage tried to move the record out of order
    #[error("Invalid stage transition: {from} → {to}")]
    InvalidTransition { from: RunStatus, to: RunStatus },
}

/// Returned by task mutations when no current task has the given identifier.
///
/// Not fatal: the caller decides whether to surface it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Task not found: {id}")]
pub struct TaskNotFound {
    pub id: String,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_not_found_display() {
        let err = TaskNotFound { id: "task-1".to_string() };
        assert_eq!(err.to_string(), "Task not found: task-1");

        let core: CoreError = err.into();
        assert_eq!(core.to_string(), "Task not found: task-1");
    }

    #[test]
    fn pipeline_error_display() {
        let err = PipelineError::AlreadyRun(RunStatus::Terminal);
        assert_eq!(
            err.to_string(),
            "Run record already processed (status: terminal)"
        );
    }

    #[test]
    fn validation_error_wraps_into_core() {
        let err = ValidationError::invalid("mood", "expected 1-5, got 9");
        let core: CoreError = err.into();
        assert!(matches!(core, CoreError::Validation(_)));
        assert!(core.to_string().contains("mood"));
    }
}
