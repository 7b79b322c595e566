// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{ConditionConfig, RawConditionConfig, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path.
///
/// This only performs TOML deserialization; it does **not** validate the
/// condition. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let contents = fs::read_to_string(path.as_ref())?;
    let config: RawConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Resolve the effective condition config.
///
/// - Reads the optional TOML file.
/// - Layers `overrides` (CLI flags / environment) on top, field by field.
/// - Validates the result once, before any polling starts.
pub fn load_and_validate(
    path: Option<&Path>,
    overrides: RawConditionConfig,
) -> Result<ConditionConfig> {
    let base = match path {
        Some(p) => load_from_path(p)?.condition,
        None => RawConditionConfig::default(),
    };
    ConditionConfig::try_from(base.merged_with(overrides))
}
