// src/config/model.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::types::ConditionType;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 300;
pub const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 10;

/// Top-level configuration file as read from TOML.
///
/// ```toml
/// [condition]
/// condition_type = "job"
/// job_name = "test"
/// timeout_seconds = 600
/// poll_interval_seconds = 15
/// ```
///
/// The file is optional; every field can also come from the CLI or the
/// environment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub condition: RawConditionConfig,
}

/// Unvalidated condition inputs.
///
/// Every field is optional so that a file and CLI/env layers can be merged
/// before validation decides what is actually required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawConditionConfig {
    /// `"file"`, `"artifact"` or `"job"`.
    #[serde(default)]
    pub condition_type: Option<String>,

    #[serde(default)]
    pub file_path: Option<String>,

    #[serde(default)]
    pub artifact_name: Option<String>,

    /// Job name pattern. `/.../` means regex, anything else is a prefix.
    #[serde(default)]
    pub job_name: Option<String>,

    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    #[serde(default)]
    pub poll_interval_seconds: Option<u64>,
}

impl RawConditionConfig {
    /// Layer `overrides` on top of `self`; any field set in `overrides` wins.
    pub fn merged_with(self, overrides: RawConditionConfig) -> RawConditionConfig {
        RawConditionConfig {
            condition_type: overrides.condition_type.or(self.condition_type),
            file_path: overrides.file_path.or(self.file_path),
            artifact_name: overrides.artifact_name.or(self.artifact_name),
            job_name: overrides.job_name.or(self.job_name),
            timeout_seconds: overrides.timeout_seconds.or(self.timeout_seconds),
            poll_interval_seconds: overrides
                .poll_interval_seconds
                .or(self.poll_interval_seconds),
        }
    }
}

/// The thing being waited for. Exactly one target exists per condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    File(PathBuf),
    Artifact(String),
    /// Raw pattern string; compiled on every tick.
    Job(String),
}

impl Condition {
    pub fn condition_type(&self) -> ConditionType {
        match self {
            Condition::File(_) => ConditionType::File,
            Condition::Artifact(_) => ConditionType::Artifact,
            Condition::Job(_) => ConditionType::Job,
        }
    }

    /// Whether evaluating this condition needs the remote run registry.
    pub fn needs_run_source(&self) -> bool {
        matches!(self, Condition::Artifact(_) | Condition::Job(_))
    }
}

/// Validated, immutable input to one wait.
///
/// Construct via `ConditionConfig::try_from(RawConditionConfig)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionConfig {
    condition: Condition,
    timeout_seconds: u64,
    poll_interval_seconds: u64,
}

impl ConditionConfig {
    pub(crate) fn new_unchecked(
        condition: Condition,
        timeout_seconds: u64,
        poll_interval_seconds: u64,
    ) -> Self {
        Self {
            condition,
            timeout_seconds,
            poll_interval_seconds,
        }
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    pub fn condition_type(&self) -> ConditionType {
        self.condition.condition_type()
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    pub fn poll_interval_seconds(&self) -> u64 {
        self.poll_interval_seconds
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }

    /// The configured file path, if this is a file condition.
    pub fn file_path(&self) -> Option<&Path> {
        match &self.condition {
            Condition::File(p) => Some(p.as_path()),
            _ => None,
        }
    }
}
