// src/host/phase.rs

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use clap::ValueEnum;

use crate::errors::Result;

/// Which lifecycle hook of the surrounding step is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Phase {
    #[default]
    Main,
    Post,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseAction {
    /// Run the wait in this invocation.
    WaitNow,
    /// Record that the wait belongs to the post phase and exit.
    Defer,
    /// Nothing to do in this phase.
    Skip,
}

/// Decide when the wait runs.
///
/// Detached waits are deferred from `main` to `post`, letting the step's
/// other work proceed in between. Non-detached waits run in `main` only.
pub fn plan_phase(detached: bool, phase: Phase) -> PhaseAction {
    match (detached, phase) {
        (false, Phase::Main) => PhaseAction::WaitNow,
        (false, Phase::Post) => PhaseAction::Skip,
        (true, Phase::Main) => PhaseAction::Defer,
        (true, Phase::Post) => PhaseAction::WaitNow,
    }
}

/// Append the deferral marker to the step state file.
pub fn record_deferral(state_file: &Path) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(state_file)?;
    file.write_all(b"detached=true\n")?;
    Ok(())
}
