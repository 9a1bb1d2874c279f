//! The load pipeline: select → parse → normalize.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::data::{normalize, read_series, NormalizedSeries, SeriesStats};
use crate::error::Result;
use crate::source::SeriesSource;

/// Output of a successful pipeline run, ready to render.
#[derive(Debug, Clone)]
pub struct Loaded {
    /// File the series was read from.
    pub path: PathBuf,
    pub series: NormalizedSeries,
    pub stats: SeriesStats,
}

/// Run every stage once against `source`.
///
/// Stops at the first failing stage; no partial series is returned.
pub fn load(source: &dyn SeriesSource) -> Result<Loaded> {
    let path = source.locate()?;
    load_path(&path)
}

/// Run the parse and normalize stages on a known file.
pub fn load_path(path: &Path) -> Result<Loaded> {
    debug!(path = %path.display(), "reading latency log");
    let series = read_series(path)?;
    let normalized = normalize(&series)?;
    let stats = normalized.stats();

    info!(
        path = %path.display(),
        records = stats.count,
        duration_secs = stats.duration_secs,
        "loaded latency series"
    );

    Ok(Loaded {
        path: path.to_path_buf(),
        series: normalized,
        stats,
    })
}
