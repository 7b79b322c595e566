// src/engine/runtime.rs

use std::fmt;

use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::condition::ConditionEvaluator;
use crate::config::ConditionConfig;

use super::core::{PollCore, PollStep};
use super::{PollOutcome, PollStatus};

/// Drives a [`PollCore`] against the clock.
///
/// Ticks are strictly sequential. Between ticks the poller sleeps for the
/// full interval; there is no early wake-up. A tick still running when the
/// deadline passes is dropped and the wait times out.
pub struct Poller<E: ConditionEvaluator> {
    core: PollCore,
    evaluator: E,
}

impl<E: ConditionEvaluator> fmt::Debug for Poller<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poller")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<E: ConditionEvaluator> Poller<E> {
    pub fn new(core: PollCore, evaluator: E) -> Self {
        Self { core, evaluator }
    }

    /// Poll until met, error, or timeout.
    pub async fn run(mut self) -> PollOutcome {
        let started = Instant::now();
        info!("waiting for condition");

        while self.core.should_poll(started.elapsed()) {
            let tick = self.core.ticks() + 1;
            let remaining = self.core.remaining(started.elapsed());

            // A tick never outlives the deadline.
            let result = match tokio::time::timeout(remaining, self.evaluator.evaluate()).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(tick, "evaluation still running at the deadline; abandoning it");
                    break;
                }
            };

            if let Ok(eval) = &result {
                if !eval.met {
                    info!(tick, message = %eval.message, "condition not met");
                }
            }

            match self.core.step(result) {
                PollStep::Finish(outcome) => {
                    log_outcome(&outcome, tick);
                    return outcome;
                }
                PollStep::Sleep(interval) => {
                    debug!(tick, ?interval, "sleeping before next poll");
                    tokio::time::sleep(interval).await;
                }
            }
        }

        let outcome = self.core.timed_out();
        log_outcome(&outcome, self.core.ticks());
        outcome
    }
}

fn log_outcome(outcome: &PollOutcome, ticks: u32) {
    if outcome.is_logical_failure() {
        warn!(ticks, message = %outcome.message, "condition met, but awaited jobs failed");
    } else if outcome.is_success() {
        info!(ticks, message = %outcome.message, "condition met");
    } else if outcome.status == PollStatus::Timeout {
        warn!(ticks, message = %outcome.message, "wait timed out");
    } else {
        error!(ticks, message = %outcome.message, "wait failed");
    }
}

/// Convenience: build a core from `config` and poll `evaluator` to completion.
pub async fn wait_for<E: ConditionEvaluator>(config: &ConditionConfig, evaluator: E) -> PollOutcome {
    Poller::new(PollCore::new(config), evaluator).run().await
}
