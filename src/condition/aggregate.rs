// src/condition/aggregate.rs

//! Reduce the jobs matched by a pattern to one verdict.
//!
//! Policy, in order:
//! 1. nothing matched: not met, list every available job name;
//! 2. any matched job still running: not met, list the incomplete ones;
//! 3. all completed, some not successful: met, but flagged as failed;
//! 4. all completed successfully: met.
//!
//! Case 3 is deliberately "met": the wait is for completion, not success.
//! The caller decides what a failed dependency means for its own step.

use crate::condition::Evaluation;
use crate::types::JobRecord;

/// Phrase that starts every "completed but failed" message.
pub const JOBS_FAILED_PHRASE: &str = "Jobs completed with failures";

pub fn aggregate(matched: &[&JobRecord], pattern: &str, all_job_names: &[&str]) -> Evaluation {
    if matched.is_empty() {
        let available = if all_job_names.is_empty() {
            "(none)".to_string()
        } else {
            all_job_names.join(", ")
        };
        return Evaluation::not_met(format!(
            "No jobs found matching \"{pattern}\". Available jobs: {available}"
        ));
    }

    let incomplete: Vec<&JobRecord> = matched
        .iter()
        .copied()
        .filter(|job| !job.is_completed())
        .collect();

    if !incomplete.is_empty() {
        let listing = incomplete
            .iter()
            .map(|job| format!("{} ({})", job.name, job.status))
            .collect::<Vec<_>>()
            .join(", ");
        return Evaluation::not_met(format!(
            "{}/{} job(s) not completed: {listing}",
            incomplete.len(),
            matched.len()
        ));
    }

    let failed: Vec<&JobRecord> = matched
        .iter()
        .copied()
        .filter(|job| !job.succeeded())
        .collect();

    if !failed.is_empty() {
        let listing = failed
            .iter()
            .map(|job| {
                let conclusion = job
                    .conclusion
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "none".to_string());
                format!("{} ({conclusion})", job.name)
            })
            .collect::<Vec<_>>()
            .join(", ");
        return Evaluation::met_with_failures(format!("{JOBS_FAILED_PHRASE}: {listing}"));
    }

    let names = matched
        .iter()
        .map(|job| job.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    Evaluation::met(format!(
        "All {} matching job(s) completed successfully: {names}",
        matched.len()
    ))
}
