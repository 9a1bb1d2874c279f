//! Error types for the load pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used by the pipeline stages.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// The pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Picking the newest file from the data directory.
    Select,
    /// Reading and parsing the selected file.
    Parse,
    /// Converting timestamps to elapsed seconds.
    Normalize,
}

impl Stage {
    /// Returns the display label for this stage.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Select => "select",
            Stage::Parse => "parse",
            Stage::Normalize => "normalize",
        }
    }
}

/// Errors that abort a pipeline run.
///
/// Every variant is fatal for the run that produced it; nothing is retried
/// and no partial series is returned.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The data directory is missing or has no candidate files.
    #[error("no candidate files in {}", dir.display())]
    NoCandidateFiles { dir: PathBuf },

    /// The selected file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line did not parse into a (timestamp, latency) pair.
    #[error("{}:{line}: malformed record '{content}': {reason}", path.display())]
    MalformedRecord {
        path: PathBuf,
        line: u64,
        content: String,
        reason: String,
    },

    /// Normalization was attempted on a series without records.
    #[error("{} contains no records", path.display())]
    EmptySeries { path: PathBuf },
}

impl PipelineError {
    /// Returns the stage that failed.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::NoCandidateFiles { .. } => Stage::Select,
            PipelineError::Read { .. } | PipelineError::MalformedRecord { .. } => Stage::Parse,
            PipelineError::EmptySeries { .. } => Stage::Normalize,
        }
    }
}
