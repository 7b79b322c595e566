// src/condition/job.rs

use std::collections::HashSet;

use tracing::debug;

use crate::condition::matcher::match_names;
use crate::condition::{aggregate, Evaluation};
use crate::errors::WaitgateError;
use crate::source::RunSource;
use crate::types::{JobRecord, RunContext};

/// Match jobs of the run against `pattern` and aggregate their states.
///
/// The pattern is recompiled on every call. A malformed regex is reported
/// like a failed listing: not met, retried until the timeout.
pub async fn evaluate_job(source: &dyn RunSource, run: &RunContext, pattern: &str) -> Evaluation {
    let jobs = match source.list_jobs(run).await {
        Ok(jobs) => jobs,
        Err(e) => {
            debug!(%run, error = %e, "job listing failed");
            return Evaluation::not_met(format!("Error checking jobs: {e}"));
        }
    };

    let all_names: Vec<&str> = jobs.iter().map(|j| j.name.as_str()).collect();
    let matched_names: HashSet<&str> = match match_names(pattern, all_names.iter().copied()) {
        Ok(names) => names.into_iter().collect(),
        Err(e) => {
            let e = WaitgateError::from(e);
            return Evaluation::not_met(format!("Error checking jobs: {e}"));
        }
    };

    let matched: Vec<&JobRecord> = jobs
        .iter()
        .filter(|j| matched_names.contains(j.name.as_str()))
        .collect();
    debug!(pattern, matched = matched.len(), total = jobs.len(), "matched jobs");

    aggregate(&matched, pattern, &all_names)
}
