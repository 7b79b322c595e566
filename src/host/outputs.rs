// src/host/outputs.rs

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::engine::{PollOutcome, PollStatus};
use crate::errors::Result;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_TIMEOUT: i32 = 2;
pub const EXIT_JOBS_FAILED: i32 = 3;

/// `status` plus the logical-failure distinction:
/// `success`, `failure`, `timeout` or `error`.
pub fn result_label(outcome: &PollOutcome) -> &'static str {
    if outcome.is_logical_failure() {
        "failure"
    } else {
        outcome.status.as_str()
    }
}

/// Process exit code for an outcome.
///
/// With `allow_job_failure`, jobs that completed unsuccessfully still exit 0.
pub fn exit_code(outcome: &PollOutcome, allow_job_failure: bool) -> i32 {
    match outcome.status {
        PollStatus::Success if outcome.is_logical_failure() && !allow_job_failure => {
            EXIT_JOBS_FAILED
        }
        PollStatus::Success => EXIT_SUCCESS,
        PollStatus::Timeout => EXIT_TIMEOUT,
        PollStatus::Error => EXIT_ERROR,
    }
}

/// Append `status`, `result` and `message` to a step-output file.
///
/// Values use the `name<<DELIMITER` form so messages may span lines.
pub fn write_outputs(path: &Path, outcome: &PollOutcome) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut buf = String::new();
    push_output(&mut buf, "status", outcome.status.as_str());
    push_output(&mut buf, "result", result_label(outcome));
    push_output(&mut buf, "message", &outcome.message);
    file.write_all(buf.as_bytes())?;
    Ok(())
}

fn push_output(buf: &mut String, name: &str, value: &str) {
    let delimiter = delimiter_for(value);
    buf.push_str(&format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"));
}

fn delimiter_for(value: &str) -> String {
    let mut n = 0u32;
    loop {
        let candidate = format!("WAITGATE_EOF_{n}");
        if !value.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
