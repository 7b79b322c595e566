// src/fs/mock.rs

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{anyhow, Result};

use super::FileSystem;

/// In-memory filesystem with a fixed working directory.
///
/// Clones share state, so a test can keep a handle and create files while
/// an evaluator holds another.
#[derive(Debug, Clone)]
pub struct MockFileSystem {
    cwd: Option<PathBuf>,
    files: Arc<Mutex<HashSet<PathBuf>>>,
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_cwd("/work")
    }

    pub fn with_cwd(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(cwd.into()),
            files: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// A filesystem whose working directory cannot be resolved.
    pub fn without_cwd() -> Self {
        Self {
            cwd: None,
            files: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Create a file. Relative paths are resolved against the working directory.
    pub fn add_file(&self, path: impl AsRef<Path>) {
        let path = self.join_cwd(path.as_ref());
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path);
    }

    fn join_cwd(&self, path: &Path) -> PathBuf {
        match &self.cwd {
            Some(cwd) if path.is_relative() => cwd.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(path)
    }

    fn absolute(&self, path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        match &self.cwd {
            Some(cwd) => Ok(cwd.join(path)),
            None => Err(anyhow!("current working directory is unavailable")),
        }
    }
}
