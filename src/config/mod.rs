// src/config/mod.rs

//! Configuration loading and validation for waitgate.
//!
//! Responsibilities:
//! - Define the raw (mergeable) and validated condition model (`model.rs`).
//! - Load an optional TOML file and layer CLI/env values over it (`loader.rs`).
//! - Validate the condition once before polling (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{Condition, ConditionConfig, RawConditionConfig, RawConfigFile};
