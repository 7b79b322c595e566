// src/condition/evaluator.rs

//! Pluggable evaluator abstraction.
//!
//! The poll engine talks to a `ConditionEvaluator` instead of the concrete
//! file/artifact/job functions. Production code uses [`Evaluator`]; tests
//! can supply scripted evaluators that return canned results per tick.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::condition::artifact::evaluate_artifact;
use crate::condition::file::evaluate_file;
use crate::condition::job::evaluate_job;
use crate::condition::Evaluation;
use crate::config::{Condition, ConditionConfig};
use crate::errors::{Result, WaitgateError};
use crate::fs::FileSystem;
use crate::source::RunSource;
use crate::types::RunContext;

pub type EvalFuture<'a> = Pin<Box<dyn Future<Output = Result<Evaluation>> + Send + 'a>>;

/// One tick's worth of work for the poll engine.
///
/// `Ok` covers both met and not-met; `Err` means something unexpected went
/// wrong and ends the wait.
pub trait ConditionEvaluator: Send {
    fn evaluate(&mut self) -> EvalFuture<'_>;
}

/// A remote run plus the source used to inspect it.
#[derive(Clone)]
pub struct RemoteRun {
    pub source: Arc<dyn RunSource>,
    pub run: RunContext,
}

impl fmt::Debug for RemoteRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteRun")
            .field("run", &self.run)
            .finish_non_exhaustive()
    }
}

/// Evaluator dispatching on the configured condition type.
#[derive(Debug)]
pub struct Evaluator {
    condition: Condition,
    fs: Arc<dyn FileSystem>,
    remote: Option<RemoteRun>,
}

impl Evaluator {
    /// Bind a validated config to its snapshot providers.
    ///
    /// Artifact and job conditions need `remote`; a missing run context is
    /// a configuration error caught here, before polling starts.
    pub fn new(
        config: &ConditionConfig,
        fs: Arc<dyn FileSystem>,
        remote: Option<RemoteRun>,
    ) -> Result<Self> {
        let condition = config.condition().clone();
        if condition.needs_run_source() && remote.is_none() {
            return Err(WaitgateError::ConfigError(format!(
                "{} conditions need a repository and run id",
                condition.condition_type()
            )));
        }
        Ok(Self {
            condition,
            fs,
            remote,
        })
    }

    fn remote(&self) -> Result<&RemoteRun> {
        self.remote.as_ref().ok_or_else(|| {
            WaitgateError::ConfigError("no run context configured".to_string())
        })
    }
}

impl ConditionEvaluator for Evaluator {
    fn evaluate(&mut self) -> EvalFuture<'_> {
        Box::pin(async move {
            match &self.condition {
                Condition::File(path) => evaluate_file(self.fs.as_ref(), path),
                Condition::Artifact(name) => {
                    let remote = self.remote()?;
                    Ok(evaluate_artifact(remote.source.as_ref(), &remote.run, name).await)
                }
                Condition::Job(pattern) => {
                    let remote = self.remote()?;
                    Ok(evaluate_job(remote.source.as_ref(), &remote.run, pattern).await)
                }
            }
        })
    }
}
