// src/source/mock.rs

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::errors::WaitgateError;
use crate::source::{RunSource, SourceFuture};
use crate::types::{Artifact, JobRecord, RunContext};

/// Queue of per-call responses. The last entry repeats forever.
#[derive(Debug, Clone)]
struct Script<T> {
    steps: VecDeque<Result<T, String>>,
    calls: usize,
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self {
            steps: VecDeque::new(),
            calls: 0,
        }
    }
}

impl<T: Clone + Default> Script<T> {
    fn next(&mut self) -> Result<T, String> {
        self.calls += 1;
        if self.steps.len() > 1 {
            return self.steps.pop_front().unwrap_or_else(|| Ok(T::default()));
        }
        self.steps.front().cloned().unwrap_or_else(|| Ok(T::default()))
    }
}

#[derive(Debug, Default)]
struct MockState {
    artifacts: Script<Vec<Artifact>>,
    jobs: Script<Vec<JobRecord>>,
}

/// In-memory [`RunSource`] with scripted snapshots.
///
/// Each `push_*` call appends the response for the next listing call; once
/// the script runs out, the final response is returned for every later call.
/// With nothing pushed, listings are empty.
#[derive(Debug, Clone, Default)]
pub struct MockRunSource {
    state: Arc<Mutex<MockState>>,
}

impl MockRunSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut MockState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    pub fn push_artifacts<I, S>(&self, names: I) -> &Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let artifacts = names
            .into_iter()
            .map(|n| Artifact { name: n.into() })
            .collect();
        self.with_state(|s| s.artifacts.steps.push_back(Ok(artifacts)));
        self
    }

    pub fn push_artifacts_error(&self, message: &str) -> &Self {
        self.with_state(|s| s.artifacts.steps.push_back(Err(message.to_string())));
        self
    }

    pub fn push_jobs(&self, jobs: Vec<JobRecord>) -> &Self {
        self.with_state(|s| s.jobs.steps.push_back(Ok(jobs)));
        self
    }

    pub fn push_jobs_error(&self, message: &str) -> &Self {
        self.with_state(|s| s.jobs.steps.push_back(Err(message.to_string())));
        self
    }

    pub fn artifact_calls(&self) -> usize {
        self.with_state(|s| s.artifacts.calls)
    }

    pub fn job_calls(&self) -> usize {
        self.with_state(|s| s.jobs.calls)
    }
}

impl RunSource for MockRunSource {
    fn list_artifacts<'a>(&'a self, _run: &'a RunContext) -> SourceFuture<'a, Vec<Artifact>> {
        let next = self.with_state(|s| s.artifacts.next());
        Box::pin(async move { next.map_err(WaitgateError::Http) })
    }

    fn list_jobs<'a>(&'a self, _run: &'a RunContext) -> SourceFuture<'a, Vec<JobRecord>> {
        let next = self.with_state(|s| s.jobs.next());
        Box::pin(async move { next.map_err(WaitgateError::Http) })
    }
}
