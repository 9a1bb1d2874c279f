//! Change detection for follow mode.
//!
//! Polls the source and reports when the file it resolves to is a different
//! file, or the same file with a newer modification time.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::SeriesSource;

/// Tracks the last loaded file and its modification time.
#[derive(Debug, Default)]
pub struct ChangeWatcher {
    last_path: Option<PathBuf>,
    last_modified: Option<SystemTime>,
}

impl ChangeWatcher {
    /// Create a watcher with nothing recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `path` as the currently loaded file.
    pub fn mark(&mut self, path: &Path) {
        self.last_path = Some(path.to_path_buf());
        self.last_modified = modified_time(path);
    }

    /// Check whether the source now resolves to new content.
    ///
    /// Returns `true` on first poll, when the resolved path differs from the
    /// marked one, or when the marked file was modified since. A source that
    /// fails to resolve or a file that disappeared does not count as changed.
    pub fn poll(&self, source: &dyn SeriesSource) -> bool {
        let Ok(path) = source.locate() else {
            return false;
        };

        let current_modified = modified_time(&path);
        match (&self.last_path, &self.last_modified, &current_modified) {
            (None, _, _) => true,
            (Some(last), _, _) if *last != path => true,
            (Some(_), _, None) => false,
            (Some(_), None, Some(_)) => true,
            (Some(_), Some(last), Some(current)) => current > last,
        }
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).ok()?.modified().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{DirectorySource, FileSource};
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_first_poll_is_changed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.csv");
        fs::write(&path, "").unwrap();

        let watcher = ChangeWatcher::new();
        assert!(watcher.poll(&FileSource::new(&path)));
    }

    #[test]
    fn test_unchanged_after_mark() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.csv");
        fs::write(&path, "").unwrap();
        let source = FileSource::new(&path);

        let mut watcher = ChangeWatcher::new();
        watcher.mark(&path);
        assert!(!watcher.poll(&source));
    }

    #[test]
    fn test_detects_new_file_in_directory() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("a.csv");
        fs::write(&first, "").unwrap();
        let source = DirectorySource::new(dir.path(), None);

        let mut watcher = ChangeWatcher::new();
        watcher.mark(&first);
        assert!(!watcher.poll(&source));

        std::thread::sleep(Duration::from_millis(50));
        fs::write(dir.path().join("b.csv"), "").unwrap();
        assert!(watcher.poll(&source));
    }

    #[test]
    fn test_detects_modification() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.csv");
        fs::write(&path, "").unwrap();
        let source = FileSource::new(&path);

        let mut watcher = ChangeWatcher::new();
        watcher.mark(&path);

        let later = SystemTime::now() + Duration::from_secs(5);
        let file = fs::OpenOptions::new().write(true).open(&path).unwrap();
        file.set_modified(later).unwrap();

        assert!(watcher.poll(&source));
    }

    #[test]
    fn test_missing_file_is_not_a_change() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.csv");
        fs::write(&path, "").unwrap();
        let source = FileSource::new(&path);

        let mut watcher = ChangeWatcher::new();
        watcher.mark(&path);
        fs::remove_file(&path).unwrap();

        assert!(!watcher.poll(&source));
    }
}
