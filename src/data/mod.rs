//! Latency data models and processing.
//!
//! ## Submodules
//!
//! - [`series`]: [`Record`]/[`Series`] and the CSV parser
//! - [`normalize`]: elapsed-time conversion into a [`NormalizedSeries`]
//! - [`ticks`]: axis tick placement and the `M:SS.mmm` formatter
//!
//! ## Data Flow
//!
//! ```text
//! latency log (CSV)
//!        │
//!        ▼
//! read_series() ──▶ Series (file order)
//!        │
//!        ▼
//! normalize() ──▶ NormalizedSeries (elapsed seconds)
//!        │
//!        └──▶ ticks::time_labels() (for the chart x-axis)
//! ```

pub mod normalize;
pub mod series;
pub mod ticks;

pub use normalize::{normalize, NormalizedSeries, Point, SeriesStats};
pub use series::{parse_series, read_series, Record, Series};
pub use ticks::format_elapsed;
