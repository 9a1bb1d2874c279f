//! Time normalization: absolute timestamps to elapsed seconds.

use std::path::{Path, PathBuf};

use chrono::TimeDelta;
use serde::Serialize;

use super::series::Series;
use crate::error::{PipelineError, Result};

/// One chart point: seconds since the first record, and its latency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub elapsed_secs: f64,
    pub latency: f64,
}

/// A series with timestamps rewritten relative to its first record.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSeries {
    source: PathBuf,
    points: Vec<Point>,
}

impl NormalizedSeries {
    /// Returns the file the underlying series was read from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a series produced by [`normalize`].
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points as `(x, y)` pairs, the shape chart datasets take.
    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.elapsed_secs, p.latency)).collect()
    }

    /// Smallest and largest elapsed value.
    ///
    /// Input order is not guaranteed chronological, so this scans all points.
    pub fn time_range(&self) -> (f64, f64) {
        min_max(self.points.iter().map(|p| p.elapsed_secs))
    }

    /// Smallest and largest latency value.
    pub fn latency_range(&self) -> (f64, f64) {
        min_max(self.points.iter().map(|p| p.latency))
    }

    /// Summary statistics over the whole series.
    pub fn stats(&self) -> SeriesStats {
        let (min, max) = self.latency_range();
        let (start, end) = self.time_range();
        let sum: f64 = self.points.iter().map(|p| p.latency).sum();
        let count = self.points.len();
        SeriesStats {
            count,
            min,
            max,
            mean: if count > 0 { sum / count as f64 } else { 0.0 },
            duration_secs: end - start,
        }
    }
}

/// Summary statistics for the header bar and exports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub duration_secs: f64,
}

/// Rewrite every timestamp as seconds elapsed since the first record.
///
/// Fails with [`PipelineError::EmptySeries`] when there is no first record.
/// Records earlier than the first one produce negative offsets.
pub fn normalize(series: &Series) -> Result<NormalizedSeries> {
    let Some(first) = series.records().first() else {
        return Err(PipelineError::EmptySeries {
            path: series.source().to_path_buf(),
        });
    };
    let origin = first.timestamp;

    let points = series
        .records()
        .iter()
        .map(|r| Point {
            elapsed_secs: delta_secs(r.timestamp - origin),
            latency: r.latency,
        })
        .collect();

    Ok(NormalizedSeries {
        source: series.source().to_path_buf(),
        points,
    })
}

/// Convert a signed time delta to fractional seconds.
fn delta_secs(delta: TimeDelta) -> f64 {
    match delta.num_nanoseconds() {
        Some(nanos) => nanos as f64 / 1e9,
        // Spans beyond ~292 years overflow i64 nanoseconds
        None => delta.num_milliseconds() as f64 / 1e3,
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}
