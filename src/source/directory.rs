//! Directory-based source: newest file wins.

use std::path::{Path, PathBuf};

use super::{select_latest, SeriesSource};
use crate::error::Result;

/// A source that selects the most recently created file in a directory.
#[derive(Debug)]
pub struct DirectorySource {
    dir: PathBuf,
    extension: Option<String>,
    description: String,
}

impl DirectorySource {
    /// Create a directory source. `extension` restricts candidates, e.g. `"csv"`.
    pub fn new<P: AsRef<Path>>(dir: P, extension: Option<String>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let description = match &extension {
            Some(ext) => format!("dir: {} (*.{})", dir.display(), ext.trim_start_matches('.')),
            None => format!("dir: {}", dir.display()),
        };
        Self {
            dir,
            extension,
            description,
        }
    }

    /// Returns the directory being scanned.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SeriesSource for DirectorySource {
    fn locate(&self) -> Result<PathBuf> {
        select_latest(&self.dir, self.extension.as_deref())
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_directory_source_new() {
        let source = DirectorySource::new("/tmp/data", None);
        assert_eq!(source.dir(), Path::new("/tmp/data"));
        assert_eq!(source.description(), "dir: /tmp/data");

        let source = DirectorySource::new("/tmp/data", Some(".csv".to_string()));
        assert_eq!(source.description(), "dir: /tmp/data (*.csv)");
    }

    #[test]
    fn test_locate_picks_up_new_files() {
        let dir = TempDir::new().unwrap();
        let source = DirectorySource::new(dir.path(), None);
        assert!(matches!(
            source.locate(),
            Err(PipelineError::NoCandidateFiles { .. })
        ));

        let path = dir.path().join("latency.txt");
        fs::write(&path, "").unwrap();
        assert_eq!(source.locate().unwrap(), path);
    }
}
