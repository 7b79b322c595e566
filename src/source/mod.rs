// src/source/mod.rs

//! Snapshot providers for remote run state.
//!
//! The condition evaluators never talk to the network themselves; they ask
//! a [`RunSource`] for a fresh list of artifacts or jobs on every tick.
//!
//! - [`github`] is the production implementation backed by the GitHub
//!   Actions REST API.
//! - [`mock`] is an in-memory implementation with scripted per-call
//!   snapshots, used by tests.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;
use crate::types::{Artifact, JobRecord, RunContext};

pub mod github;
pub mod mock;

pub use github::GitHubRunSource;
pub use mock::MockRunSource;

/// Boxed future returned by [`RunSource`] methods.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Capability to list the artifacts and jobs of a run.
///
/// Every call must return a fresh snapshot; callers never cache results
/// across ticks.
pub trait RunSource: Send + Sync {
    fn list_artifacts<'a>(&'a self, run: &'a RunContext) -> SourceFuture<'a, Vec<Artifact>>;

    fn list_jobs<'a>(&'a self, run: &'a RunContext) -> SourceFuture<'a, Vec<JobRecord>>;
}
