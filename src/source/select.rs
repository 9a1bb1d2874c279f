//! Newest-file selection in a data directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

use crate::error::{PipelineError, Result};

/// Pick the most recently created regular file in `dir`.
///
/// Creation time is platform-reported; entries whose filesystem does not
/// record it fall back to modification time. Hidden entries (names starting
/// with `.`) and subdirectories are skipped, and when `extension` is set only
/// files with that extension are considered. Ties keep the entry listed first.
pub fn select_latest(dir: &Path, extension: Option<&str>) -> Result<PathBuf> {
    let no_candidates = || PipelineError::NoCandidateFiles {
        dir: dir.to_path_buf(),
    };

    let entries = fs::read_dir(dir).map_err(|_| no_candidates())?;

    let candidates = entries.flatten().filter_map(|entry| {
        let path = entry.path();
        if is_hidden(&path) || !matches_extension(&path, extension) {
            return None;
        }
        creation_time(&path).map(|created| (created, path))
    });

    let path = newest(candidates).ok_or_else(no_candidates)?;
    debug!(path = %path.display(), "selected newest file");
    Ok(path)
}

/// The path with the greatest time; on ties the earliest one wins.
fn newest(candidates: impl IntoIterator<Item = (SystemTime, PathBuf)>) -> Option<PathBuf> {
    let mut latest: Option<(SystemTime, PathBuf)> = None;
    for (created, path) in candidates {
        let newer = match &latest {
            None => true,
            Some((best, _)) => created > *best,
        };
        if newer {
            latest = Some((created, path));
        }
    }
    latest.map(|(_, path)| path)
}

/// Creation time of a regular file, or `None` for anything else.
pub(crate) fn creation_time(path: &Path) -> Option<SystemTime> {
    let metadata = fs::metadata(path).ok()?;
    if !metadata.is_file() {
        return None;
    }
    entry_time(metadata.created(), metadata.modified())
}

fn entry_time(
    created: io::Result<SystemTime>,
    modified: io::Result<SystemTime>,
) -> Option<SystemTime> {
    created.or(modified).ok()
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

fn matches_extension(path: &Path, extension: Option<&str>) -> bool {
    let Some(wanted) = extension else {
        return true;
    };
    let wanted = wanted.trim_start_matches('.');
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
}
