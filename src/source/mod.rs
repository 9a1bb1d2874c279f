//! Where latency logs come from.
//!
//! A [`SeriesSource`] resolves the file the pipeline should load. The
//! [`DirectorySource`] picks the newest file in a data directory on every
//! call; [`FileSource`] always answers with one fixed file.

mod directory;
mod file;
mod select;
mod watch;

pub use directory::DirectorySource;
pub use file::FileSource;
pub use select::select_latest;
pub use watch::ChangeWatcher;

use std::fmt::Debug;
use std::path::PathBuf;

use crate::error::Result;

/// Trait for resolving the latency log to load.
///
/// # Example
///
/// ```
/// use latency_graph::{FileSource, SeriesSource};
///
/// let source = FileSource::new("latency.csv");
/// assert_eq!(source.locate().unwrap().to_str(), Some("latency.csv"));
/// ```
pub trait SeriesSource: Debug {
    /// Resolve the file to load now.
    ///
    /// Called again on every reload, so directory sources can pick up files
    /// created since the last call.
    fn locate(&self) -> Result<PathBuf>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI header.
    fn description(&self) -> &str;
}
