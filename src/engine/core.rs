// src/engine/core.rs

//! Pure poll state machine.
//!
//! `PollCore` knows the deadline and the interval and turns each tick's
//! result into a [`PollStep`]. It has no clock and no Tokio types; the
//! caller passes in elapsed time and evaluation results.

use std::time::Duration;

use crate::condition::Evaluation;
use crate::config::ConditionConfig;
use crate::engine::PollOutcome;
use crate::errors::WaitgateError;

/// What the shell should do after a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStep {
    /// Not met yet: sleep this long, then poll again if time remains.
    Sleep(Duration),
    /// Terminal.
    Finish(PollOutcome),
}

#[derive(Debug, Clone)]
pub struct PollCore {
    timeout: Duration,
    timeout_seconds: u64,
    poll_interval: Duration,
    ticks: u32,
}

impl PollCore {
    pub fn new(config: &ConditionConfig) -> Self {
        Self {
            timeout: config.timeout(),
            timeout_seconds: config.timeout_seconds(),
            poll_interval: config.poll_interval(),
            ticks: 0,
        }
    }

    /// Number of ticks evaluated so far.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Whether another tick may start at `elapsed` since the wait began.
    pub fn should_poll(&self, elapsed: Duration) -> bool {
        elapsed < self.timeout
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.timeout.saturating_sub(elapsed)
    }

    /// Consume one tick's result.
    pub fn step(&mut self, result: Result<Evaluation, WaitgateError>) -> PollStep {
        self.ticks += 1;
        match result {
            Ok(eval) if eval.met => {
                PollStep::Finish(PollOutcome::success(eval.message, eval.all_succeeded))
            }
            Ok(_) => PollStep::Sleep(self.poll_interval),
            Err(e) => PollStep::Finish(PollOutcome::error(e.to_string())),
        }
    }

    /// Outcome once the deadline has passed without success.
    pub fn timed_out(&self) -> PollOutcome {
        PollOutcome::timeout(self.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RawConditionConfig;
    use crate::engine::PollStatus;

    fn core(timeout: u64, interval: u64) -> PollCore {
        let raw = RawConditionConfig {
            condition_type: Some("file".to_string()),
            file_path: Some("done".to_string()),
            timeout_seconds: Some(timeout),
            poll_interval_seconds: Some(interval),
            ..Default::default()
        };
        PollCore::new(&ConditionConfig::try_from(raw).unwrap())
    }

    #[test]
    fn not_met_sleeps_for_interval() {
        let mut c = core(60, 5);
        let step = c.step(Ok(Evaluation::not_met("waiting")));
        assert_eq!(step, PollStep::Sleep(Duration::from_secs(5)));
        assert_eq!(c.ticks(), 1);
    }

    #[test]
    fn met_finishes_with_success() {
        let mut c = core(60, 5);
        match c.step(Ok(Evaluation::met_with_failures("jobs failed"))) {
            PollStep::Finish(outcome) => {
                assert_eq!(outcome.status, PollStatus::Success);
                assert!(outcome.is_logical_failure());
                assert_eq!(outcome.message, "jobs failed");
            }
            other => panic!("expected Finish, got {other:?}"),
        }
    }

    #[test]
    fn evaluation_error_is_terminal() {
        let mut c = core(60, 5);
        let step = c.step(Err(WaitgateError::Evaluation("boom".to_string())));
        match step {
            PollStep::Finish(outcome) => {
                assert_eq!(outcome.status, PollStatus::Error);
                assert!(outcome.message.contains("boom"));
            }
            other => panic!("expected Finish, got {other:?}"),
        }
    }

    #[test]
    fn deadline_is_exclusive() {
        let c = core(10, 3);
        assert!(c.should_poll(Duration::from_secs(9)));
        assert!(!c.should_poll(Duration::from_secs(10)));
        assert_eq!(c.timed_out().status, PollStatus::Timeout);
    }

    #[test]
    fn remaining_saturates_at_zero() {
        let c = core(10, 3);
        assert_eq!(c.remaining(Duration::from_secs(4)), Duration::from_secs(6));
        assert_eq!(c.remaining(Duration::from_secs(12)), Duration::ZERO);
    }
}
