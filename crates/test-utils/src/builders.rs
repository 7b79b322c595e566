#![allow(dead_code)]

use waitgate::config::{ConditionConfig, RawConditionConfig};
use waitgate::types::{JobConclusion, JobRecord, JobStatus};

/// Builder for `ConditionConfig` to simplify test setup.
pub struct ConditionConfigBuilder {
    raw: RawConditionConfig,
}

impl ConditionConfigBuilder {
    pub fn file(path: &str) -> Self {
        Self::of_type("file").with(|raw| raw.file_path = Some(path.to_string()))
    }

    pub fn artifact(name: &str) -> Self {
        Self::of_type("artifact").with(|raw| raw.artifact_name = Some(name.to_string()))
    }

    pub fn job(pattern: &str) -> Self {
        Self::of_type("job").with(|raw| raw.job_name = Some(pattern.to_string()))
    }

    fn of_type(condition_type: &str) -> Self {
        Self {
            raw: RawConditionConfig {
                condition_type: Some(condition_type.to_string()),
                ..Default::default()
            },
        }
    }

    fn with(mut self, f: impl FnOnce(&mut RawConditionConfig)) -> Self {
        f(&mut self.raw);
        self
    }

    pub fn timeout(mut self, seconds: u64) -> Self {
        self.raw.timeout_seconds = Some(seconds);
        self
    }

    pub fn poll_interval(mut self, seconds: u64) -> Self {
        self.raw.poll_interval_seconds = Some(seconds);
        self
    }

    pub fn raw(self) -> RawConditionConfig {
        self.raw
    }

    pub fn build(self) -> ConditionConfig {
        ConditionConfig::try_from(self.raw).expect("Failed to build valid config from builder")
    }
}

/// A job that has not started yet.
pub fn queued(name: &str) -> JobRecord {
    job(name, JobStatus::Queued, None)
}

pub fn in_progress(name: &str) -> JobRecord {
    job(name, JobStatus::InProgress, None)
}

pub fn completed(name: &str, conclusion: &str) -> JobRecord {
    job(name, JobStatus::Completed, Some(JobConclusion::from(conclusion)))
}

pub fn job(name: &str, status: JobStatus, conclusion: Option<JobConclusion>) -> JobRecord {
    JobRecord {
        name: name.to_string(),
        status,
        conclusion,
    }
}
