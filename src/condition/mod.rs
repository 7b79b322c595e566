// src/condition/mod.rs

//! Condition evaluation.
//!
//! One evaluation maps a condition plus a fresh snapshot of external state
//! to an [`Evaluation`]. Expected "not yet" situations, including failures
//! to fetch the snapshot, come back as `met = false` with the reason in the
//! message; they are never errors.
//!
//! - [`matcher`]: exact/prefix/regex job name matching.
//! - [`aggregate`]: reduce matched jobs to a single verdict.
//! - [`file`], [`artifact`], [`job`]: one evaluator per condition type.
//! - [`evaluator`]: the `ConditionEvaluator` seam the poll engine drives.

pub mod aggregate;
pub mod artifact;
pub mod evaluator;
pub mod file;
pub mod job;
pub mod matcher;

pub use aggregate::{aggregate, JOBS_FAILED_PHRASE};
pub use evaluator::{ConditionEvaluator, EvalFuture, Evaluator, RemoteRun};
pub use matcher::{match_names, MatchPattern};

/// Result of a single tick.
///
/// `all_succeeded` is only meaningful when `met` is true: it is false when
/// the awaited jobs finished but at least one did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub met: bool,
    pub all_succeeded: bool,
    pub message: String,
}

impl Evaluation {
    pub fn met(message: impl Into<String>) -> Self {
        Self {
            met: true,
            all_succeeded: true,
            message: message.into(),
        }
    }

    pub fn met_with_failures(message: impl Into<String>) -> Self {
        Self {
            met: true,
            all_succeeded: false,
            message: message.into(),
        }
    }

    pub fn not_met(message: impl Into<String>) -> Self {
        Self {
            met: false,
            all_succeeded: false,
            message: message.into(),
        }
    }
}
