// src/engine/mod.rs

//! Poll engine for waitgate.
//!
//! The pure state machine lives in [`core`]: it decides, from the result
//! of each tick, whether to sleep and poll again or to stop with an
//! outcome. The async shell in [`runtime`] owns the clock, the sleeps and
//! the logging.

use std::fmt;

pub mod core;
pub mod runtime;

pub use self::core::{PollCore, PollStep};
pub use self::runtime::{wait_for, Poller};

/// How a wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    /// A tick reported the condition as met.
    Success,
    /// The deadline passed without the condition being met.
    Timeout,
    /// Invalid configuration or an unexpected evaluation failure.
    Error,
}

impl PollStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PollStatus::Success => "success",
            PollStatus::Timeout => "timeout",
            PollStatus::Error => "error",
        }
    }
}

impl fmt::Display for PollStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one full wait. Produced exactly once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOutcome {
    pub status: PollStatus,
    pub message: String,
    /// False when the wait succeeded but the awaited jobs did not all
    /// succeed. Always false for timeout and error.
    pub all_succeeded: bool,
}

impl PollOutcome {
    pub fn success(message: impl Into<String>, all_succeeded: bool) -> Self {
        Self {
            status: PollStatus::Success,
            message: message.into(),
            all_succeeded,
        }
    }

    pub fn timeout(timeout_seconds: u64) -> Self {
        Self {
            status: PollStatus::Timeout,
            message: format!("Timeout: condition not met within {timeout_seconds} seconds"),
            all_succeeded: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: PollStatus::Error,
            message: message.into(),
            all_succeeded: false,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == PollStatus::Success
    }

    /// The wait was satisfied, but what it waited on failed.
    pub fn is_logical_failure(&self) -> bool {
        self.is_success() && !self.all_succeeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_failure_only_on_success() {
        assert!(PollOutcome::success("done", false).is_logical_failure());
        assert!(!PollOutcome::success("done", true).is_logical_failure());
        assert!(!PollOutcome::timeout(5).is_logical_failure());
        assert!(!PollOutcome::error("boom").is_logical_failure());
    }

    #[test]
    fn timeout_message_reports_limit() {
        assert_eq!(
            PollOutcome::timeout(30).message,
            "Timeout: condition not met within 30 seconds"
        );
    }
}
