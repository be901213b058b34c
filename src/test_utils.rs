//! Test utilities for building temporary directory trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tempfile::TempDir;

/// A temporary directory tree for testing.
///
/// Relative paths are created beneath the temp root, with parent directories
/// as needed. Everything is cleaned up on drop.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Root of the tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a file with the given content, creating parent directories.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Create an empty directory.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Create a symlink at `link` pointing at `target`; both are relative to
    /// the tree root.
    pub fn add_symlink(&self, target: &str, link: &str) -> PathBuf {
        let link_path = self.dir.path().join(link);
        if let Some(parent) = link_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::os::unix::fs::symlink(self.dir.path().join(target), &link_path)
            .expect("Failed to create symlink");
        link_path
    }

    /// Create a file and backdate its modification time by `days_ago` days.
    pub fn add_file_modified_days_ago(&self, path: &str, content: &str, days_ago: u64) -> PathBuf {
        let full_path = self.add_file(path, content);
        let when = SystemTime::now() - Duration::from_secs(days_ago * 24 * 3600);
        let file = fs::File::options()
            .write(true)
            .open(&full_path)
            .expect("Failed to reopen file");
        file.set_modified(when).expect("Failed to set mtime");
        full_path
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}
