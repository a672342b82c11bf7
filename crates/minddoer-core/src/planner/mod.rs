//! The four planning stages applied by the pipeline runner.
//!
//! Each stage is a pure function over plain data; sequencing and record
//! bookkeeping live in [`crate::pipeline`].

pub mod aggregator;
pub mod analyzer;
pub mod integrator;
pub mod motivation;

pub use aggregator::aggregate_tasks;
pub use analyzer::analyze_context;
pub use integrator::integrate_user_tasks;
pub use motivation::{compose_motivation, MoodTier};
