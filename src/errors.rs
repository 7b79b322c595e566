// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WaitgateError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Evaluation error: {0}")]
    Evaluation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<reqwest::Error> for WaitgateError {
    fn from(err: reqwest::Error) -> Self {
        WaitgateError::Http(err.to_string())
    }
}

impl From<regex::Error> for WaitgateError {
    fn from(err: regex::Error) -> Self {
        WaitgateError::Evaluation(format!("invalid job name pattern: {err}"))
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, WaitgateError>;
