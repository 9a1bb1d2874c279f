//! Single-file source.

use std::path::{Path, PathBuf};

use super::SeriesSource;
use crate::error::Result;

/// A source that always loads the same file, bypassing directory selection.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being loaded.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SeriesSource for FileSource {
    fn locate(&self) -> Result<PathBuf> {
        Ok(self.path.clone())
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/latency.csv");
        assert_eq!(source.path(), Path::new("/tmp/latency.csv"));
        assert_eq!(source.description(), "file: /tmp/latency.csv");
    }

    #[test]
    fn test_locate_missing_file_is_deferred_to_read() {
        // Existence is checked when the pipeline reads the file.
        let source = FileSource::new("/nonexistent/latency.csv");
        assert_eq!(
            source.locate().unwrap(),
            PathBuf::from("/nonexistent/latency.csv")
        );
    }
}
