// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Which kind of external state a wait is polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionType {
    File,
    Artifact,
    Job,
}

impl FromStr for ConditionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(ConditionType::File),
            "artifact" => Ok(ConditionType::Artifact),
            "job" => Ok(ConditionType::Job),
            other => Err(format!(
                "invalid condition type: {other:?} (expected \"file\", \"artifact\" or \"job\")"
            )),
        }
    }
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConditionType::File => "file",
            ConditionType::Artifact => "artifact",
            ConditionType::Job => "job",
        };
        f.write_str(s)
    }
}

/// Lifecycle status of a job as reported by the job registry.
///
/// Unknown values are kept verbatim so they can be echoed in messages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum JobStatus {
    Queued,
    InProgress,
    Completed,
    Other(String),
}

impl From<String> for JobStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "queued" => JobStatus::Queued,
            "in_progress" => JobStatus::InProgress,
            "completed" => JobStatus::Completed,
            _ => JobStatus::Other(s),
        }
    }
}

impl From<&str> for JobStatus {
    fn from(s: &str) -> Self {
        JobStatus::from(s.to_string())
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Queued => f.write_str("queued"),
            JobStatus::InProgress => f.write_str("in_progress"),
            JobStatus::Completed => f.write_str("completed"),
            JobStatus::Other(s) => f.write_str(s),
        }
    }
}

/// Terminal result of a completed job.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum JobConclusion {
    Success,
    Failure,
    Cancelled,
    Skipped,
    Other(String),
}

impl From<String> for JobConclusion {
    fn from(s: String) -> Self {
        match s.as_str() {
            "success" => JobConclusion::Success,
            "failure" => JobConclusion::Failure,
            "cancelled" => JobConclusion::Cancelled,
            "skipped" => JobConclusion::Skipped,
            _ => JobConclusion::Other(s),
        }
    }
}

impl From<&str> for JobConclusion {
    fn from(s: &str) -> Self {
        JobConclusion::from(s.to_string())
    }
}

impl fmt::Display for JobConclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobConclusion::Success => f.write_str("success"),
            JobConclusion::Failure => f.write_str("failure"),
            JobConclusion::Cancelled => f.write_str("cancelled"),
            JobConclusion::Skipped => f.write_str("skipped"),
            JobConclusion::Other(s) => f.write_str(s),
        }
    }
}

/// One job in a run, as seen on a single poll tick.
///
/// `conclusion` stays `None` until the job has completed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobRecord {
    pub name: String,
    pub status: JobStatus,
    #[serde(default)]
    pub conclusion: Option<JobConclusion>,
}

impl JobRecord {
    pub fn is_completed(&self) -> bool {
        self.status == JobStatus::Completed
    }

    pub fn succeeded(&self) -> bool {
        self.conclusion == Some(JobConclusion::Success)
    }
}

/// An uploaded artifact. Only the name matters for waiting.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Artifact {
    pub name: String,
}

/// Identifies the remote run whose artifacts and jobs are polled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub owner: String,
    pub repo: String,
    pub run_id: u64,
}

impl RunContext {
    /// Build a context from an `owner/repo` slug and a run id.
    pub fn from_slug(slug: &str, run_id: u64) -> Result<Self, String> {
        match slug.trim().split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                    run_id,
                })
            }
            _ => Err(format!(
                "invalid repository {slug:?} (expected \"owner/repo\")"
            )),
        }
    }
}

impl fmt::Display for RunContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.run_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_type_parses_case_insensitively() {
        assert_eq!("File".parse::<ConditionType>(), Ok(ConditionType::File));
        assert_eq!(" job ".parse::<ConditionType>(), Ok(ConditionType::Job));
        assert!("workflow".parse::<ConditionType>().is_err());
    }

    #[test]
    fn unknown_status_and_conclusion_are_kept_verbatim() {
        assert_eq!(JobStatus::from("waiting").to_string(), "waiting");
        assert_eq!(JobConclusion::from("timed_out").to_string(), "timed_out");
    }

    #[test]
    fn job_record_deserializes_registry_shape() {
        let json = r#"{"name": "build", "status": "completed", "conclusion": "success", "id": 7}"#;
        let job: JobRecord = serde_json::from_str(json).unwrap();
        assert!(job.is_completed());
        assert!(job.succeeded());

        let json = r#"{"name": "lint", "status": "in_progress", "conclusion": null}"#;
        let job: JobRecord = serde_json::from_str(json).unwrap();
        assert_eq!(job.status, JobStatus::InProgress);
        assert_eq!(job.conclusion, None);
    }

    #[test]
    fn run_context_requires_owner_and_repo() {
        let ctx = RunContext::from_slug("acme/widgets", 42).unwrap();
        assert_eq!(ctx.to_string(), "acme/widgets#42");
        assert!(RunContext::from_slug("widgets", 42).is_err());
        assert!(RunContext::from_slug("a/b/c", 42).is_err());
    }
}
