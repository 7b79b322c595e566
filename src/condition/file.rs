// src/condition/file.rs

use std::path::Path;

use crate::condition::Evaluation;
use crate::errors::Result;
use crate::fs::FileSystem;

/// Met once anything exists at `path`.
///
/// Only existence is checked: an empty or half-written file counts.
/// Failing to resolve the absolute path is an error, not "not met".
pub fn evaluate_file(fs: &dyn FileSystem, path: &Path) -> Result<Evaluation> {
    let absolute = fs.absolute(path)?;

    if fs.exists(&absolute) {
        Ok(Evaluation::met(format!("File found: {}", absolute.display())))
    } else {
        Ok(Evaluation::not_met(format!(
            "File not found: {}",
            absolute.display()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::RealFileSystem;
    use crate::fs::mock::MockFileSystem;

    #[test]
    fn relative_path_is_resolved_against_cwd() {
        let fs = MockFileSystem::with_cwd("/repo");
        let eval = evaluate_file(&fs, Path::new("out/done.txt")).unwrap();
        assert!(!eval.met);
        assert_eq!(eval.message, "File not found: /repo/out/done.txt");

        fs.add_file("out/done.txt");
        let eval = evaluate_file(&fs, Path::new("out/done.txt")).unwrap();
        assert!(eval.met);
        assert_eq!(eval.message, "File found: /repo/out/done.txt");
    }

    #[test]
    fn unresolvable_cwd_is_an_error() {
        let fs = MockFileSystem::without_cwd();
        assert!(evaluate_file(&fs, Path::new("done.txt")).is_err());
    }

    #[test]
    fn empty_file_on_disk_counts_as_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marker");
        let eval = evaluate_file(&RealFileSystem, &path).unwrap();
        assert!(!eval.met);

        std::fs::write(&path, b"").unwrap();
        let eval = evaluate_file(&RealFileSystem, &path).unwrap();
        assert!(eval.met);
    }
}
