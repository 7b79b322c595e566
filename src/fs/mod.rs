// src/fs/mod.rs

use std::fmt::Debug;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub mod mock;

/// Abstract filesystem interface used by file conditions.
pub trait FileSystem: Send + Sync + Debug {
    /// Whether anything exists at `path` right now.
    fn exists(&self, path: &Path) -> bool;

    /// Make `path` absolute without touching the filesystem, so it works
    /// for files that do not exist yet.
    fn absolute(&self, path: &Path) -> Result<PathBuf>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn absolute(&self, path: &Path) -> Result<PathBuf> {
        std::path::absolute(path).with_context(|| format!("resolving absolute path for {:?}", path))
    }
}
