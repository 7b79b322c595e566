// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Every condition input can also come from the environment, which is how
//! CI steps usually hand inputs to a tool. The run context defaults to the
//! standard `GITHUB_*` variables.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::RawConditionConfig;
use crate::host::Phase;
use crate::source::github::DEFAULT_API_URL;

/// Command-line arguments for `waitgate`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "waitgate",
    version,
    about = "Wait for a file, an artifact, or other jobs of a CI run.",
    long_about = None
)]
pub struct CliArgs {
    /// Optional TOML file with a `[condition]` table.
    ///
    /// Flags and environment variables override values from the file.
    #[arg(long, env = "WAITGATE_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// What to wait for: file, artifact or job.
    #[arg(long, env = "WAITGATE_CONDITION_TYPE", value_name = "TYPE")]
    pub condition_type: Option<String>,

    /// Path that must exist (file conditions).
    #[arg(long, env = "WAITGATE_FILE_PATH", value_name = "PATH")]
    pub file_path: Option<String>,

    /// Exact artifact name (artifact conditions).
    #[arg(long, env = "WAITGATE_ARTIFACT_NAME", value_name = "NAME")]
    pub artifact_name: Option<String>,

    /// Job name prefix, or `/regex/` (job conditions).
    #[arg(long, env = "WAITGATE_JOB_NAME", value_name = "PATTERN")]
    pub job_name: Option<String>,

    /// Give up after this many seconds (default 300).
    #[arg(long = "timeout", env = "WAITGATE_TIMEOUT", value_name = "SECONDS")]
    pub timeout_seconds: Option<u64>,

    /// Seconds between polls (default 10).
    #[arg(long = "poll-interval", env = "WAITGATE_POLL_INTERVAL", value_name = "SECONDS")]
    pub poll_interval_seconds: Option<u64>,

    /// API token for the run registry.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    pub github_token: Option<String>,

    /// Repository as `owner/repo`.
    #[arg(long, env = "GITHUB_REPOSITORY", value_name = "OWNER/REPO")]
    pub repository: Option<String>,

    /// Run whose artifacts and jobs are inspected.
    #[arg(long, env = "GITHUB_RUN_ID", value_name = "ID")]
    pub run_id: Option<u64>,

    /// Base URL of the REST API.
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL, value_name = "URL")]
    pub api_url: String,

    /// File that step outputs are appended to.
    #[arg(long, env = "GITHUB_OUTPUT", value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// File that step state is appended to (used by --detached).
    #[arg(long, env = "GITHUB_STATE", value_name = "PATH")]
    pub state_file: Option<PathBuf>,

    /// Defer the wait from the main phase to the post phase.
    #[arg(long, env = "WAITGATE_DETACHED")]
    pub detached: bool,

    /// Lifecycle phase this invocation runs in.
    #[arg(long, value_enum, env = "WAITGATE_PHASE", default_value_t = Phase::Main)]
    pub phase: Phase,

    /// Exit 0 even when awaited jobs completed unsuccessfully.
    #[arg(long, env = "WAITGATE_ALLOW_JOB_FAILURE")]
    pub allow_job_failure: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WAITGATE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Validate and print the condition, but don't poll.
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// Condition fields given on the command line or via environment.
    pub fn condition_overrides(&self) -> RawConditionConfig {
        RawConditionConfig {
            condition_type: self.condition_type.clone(),
            file_path: self.file_path.clone(),
            artifact_name: self.artifact_name.clone(),
            job_name: self.job_name.clone(),
            timeout_seconds: self.timeout_seconds,
            poll_interval_seconds: self.poll_interval_seconds,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
