// src/host/mod.rs

//! Host-process concerns around the poll engine.
//!
//! - [`outputs`]: step outputs and the exit-code policy.
//! - [`phase`]: whether to wait now, defer to the post phase, or skip.
//!
//! None of this influences how a condition is evaluated.

pub mod outputs;
pub mod phase;

pub use outputs::{exit_code, result_label, write_outputs};
pub use phase::{plan_phase, record_deferral, Phase, PhaseAction};
