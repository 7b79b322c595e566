// src/lib.rs

pub mod cli;
pub mod condition;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fs;
pub mod host;
pub mod logging;
pub mod source;
pub mod types;

use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};

use crate::cli::CliArgs;
use crate::condition::{Evaluator, RemoteRun};
use crate::config::{load_and_validate, Condition, ConditionConfig};
use crate::engine::{wait_for, PollOutcome};
use crate::errors::WaitgateError;
use crate::fs::RealFileSystem;
use crate::host::outputs::EXIT_SUCCESS;
use crate::host::{exit_code, plan_phase, record_deferral, write_outputs, PhaseAction};
use crate::source::github::DEFAULT_REQUEST_TIMEOUT;
use crate::source::GitHubRunSource;
use crate::types::RunContext;

/// High-level entry point used by `main.rs`. Returns the process exit code.
///
/// This wires together:
/// - phase planning (wait now, defer, or skip)
/// - config loading and validation
/// - snapshot providers (local filesystem, remote run registry)
/// - the poll engine
/// - step outputs
pub async fn run(args: CliArgs) -> Result<i32> {
    if args.dry_run {
        let config = load_and_validate(args.config.as_deref(), args.condition_overrides())?;
        print_dry_run(&config, &args);
        return Ok(EXIT_SUCCESS);
    }

    match plan_phase(args.detached, args.phase) {
        PhaseAction::WaitNow => {}
        PhaseAction::Defer => {
            if let Some(state_file) = &args.state_file {
                record_deferral(state_file)?;
            }
            info!("detached: deferring wait to the post phase");
            return Ok(EXIT_SUCCESS);
        }
        PhaseAction::Skip => {
            info!(phase = ?args.phase, "nothing to wait for in this phase");
            return Ok(EXIT_SUCCESS);
        }
    }

    let outcome = match prepare(&args) {
        Ok((config, evaluator)) => wait_for(&config, evaluator).await,
        Err(e) => {
            error!(error = %e, "invalid configuration; not polling");
            PollOutcome::error(e.to_string())
        }
    };

    if let Some(output_file) = &args.output_file {
        write_outputs(output_file, &outcome)?;
    }

    println!("{}: {}", outcome.status, outcome.message);
    Ok(exit_code(&outcome, args.allow_job_failure))
}

/// Validate config and bind it to its providers. Any failure here ends the
/// run with an error outcome before the first tick.
fn prepare(args: &CliArgs) -> errors::Result<(ConditionConfig, Evaluator)> {
    let config = load_and_validate(args.config.as_deref(), args.condition_overrides())?;
    let remote = remote_run(args, &config)?;
    let evaluator = Evaluator::new(&config, Arc::new(RealFileSystem), remote)?;
    Ok((config, evaluator))
}

fn remote_run(args: &CliArgs, config: &ConditionConfig) -> errors::Result<Option<RemoteRun>> {
    if !config.condition().needs_run_source() {
        return Ok(None);
    }

    let repository = args.repository.as_deref().ok_or_else(|| {
        WaitgateError::ConfigError(
            "repository is required (--repository or GITHUB_REPOSITORY)".to_string(),
        )
    })?;
    let run_id = args.run_id.ok_or_else(|| {
        WaitgateError::ConfigError("run id is required (--run-id or GITHUB_RUN_ID)".to_string())
    })?;
    let run = RunContext::from_slug(repository, run_id).map_err(WaitgateError::ConfigError)?;

    let request_timeout = config.timeout().min(DEFAULT_REQUEST_TIMEOUT);
    let source = GitHubRunSource::new(&args.api_url, args.github_token.clone(), request_timeout)?;
    Ok(Some(RemoteRun {
        source: Arc::new(source),
        run,
    }))
}

/// Simple dry-run output: print the validated condition and timing.
fn print_dry_run(config: &ConditionConfig, args: &CliArgs) {
    println!("waitgate dry-run");
    println!("  condition_type = {}", config.condition_type());
    match config.condition() {
        Condition::File(path) => println!("  file_path = {}", path.display()),
        Condition::Artifact(name) => println!("  artifact_name = {name}"),
        Condition::Job(pattern) => println!("  job_name = {pattern}"),
    }
    println!("  timeout_seconds = {}", config.timeout_seconds());
    println!("  poll_interval_seconds = {}", config.poll_interval_seconds());
    if config.condition().needs_run_source() {
        println!(
            "  run = {}#{}",
            args.repository.as_deref().unwrap_or("(unset)"),
            args.run_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "(unset)".to_string())
        );
        println!("  api_url = {}", args.api_url);
    }
    println!("  phase = {:?}, detached = {}", args.phase, args.detached);
}
