//! # latency-graph
//!
//! A terminal chart for latency logs.
//!
//! Latency logs are header-less CSV files of `timestamp,latency` lines, one
//! file per measurement session. This crate picks the newest log in a data
//! directory, converts its timestamps to seconds since the first record and
//! draws latency over elapsed time, with `M:SS.mmm` labels on the time axis.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  source          data                         ui               │
//! │ ┌─────────┐    ┌────────────┐   ┌───────────┐   ┌──────────┐   │
//! │ │ select  │───▶│ read_series│──▶│ normalize │──▶│  chart   │   │
//! │ │ newest  │    │  (Series)  │   │(Normalized│   │ (ratatui)│   │
//! │ └─────────┘    └────────────┘   │  Series)  │   └──────────┘   │
//! │                                 └───────────┘                  │
//! │        └──────────── pipeline::load ────────────┘              │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: resolves the file to load ([`SeriesSource`] trait with
//!   [`DirectorySource`] and [`FileSource`])
//! - **[`data`]**: records, the CSV parser, time normalization and tick labels
//! - **[`pipeline`]**: runs the stages in order and stops at the first failure
//! - **[`app`]** / **[`events`]** / **[`ui`]**: the interactive terminal viewer
//! - **[`export`]**: JSON export of a loaded series
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Chart the newest file in ./data
//! latency-graph --dir data
//!
//! # Chart one file and keep following it
//! latency-graph --file 2024-01-01_10-00-00.txt --follow 2
//!
//! # Write the normalized series as JSON instead of drawing it
//! latency-graph --dir data --export latency.json
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use latency_graph::{pipeline, DirectorySource};
//!
//! let loaded = pipeline::load(&DirectorySource::new("data", None))?;
//! for point in loaded.series.points() {
//!     println!(
//!         "{} {}",
//!         latency_graph::format_elapsed(point.elapsed_secs),
//!         point.latency
//!     );
//! }
//! # Ok::<(), latency_graph::PipelineError>(())
//! ```

pub mod app;
pub mod data;
pub mod error;
pub mod events;
pub mod export;
pub mod pipeline;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, Viewport};
pub use data::{format_elapsed, NormalizedSeries, Point, Record, Series, SeriesStats};
pub use error::{PipelineError, Stage};
pub use pipeline::Loaded;
pub use settings::{Settings, ThemeChoice};
pub use source::{select_latest, DirectorySource, FileSource, SeriesSource};
