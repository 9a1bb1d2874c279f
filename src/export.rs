//! JSON export of a loaded series.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::format_elapsed;
use crate::pipeline::Loaded;

/// Build the export document for a loaded series.
pub fn to_json(loaded: &Loaded) -> serde_json::Value {
    let points: Vec<serde_json::Value> = loaded
        .series
        .points()
        .iter()
        .map(|p| {
            serde_json::json!({
                "elapsed_secs": p.elapsed_secs,
                "elapsed": format_elapsed(p.elapsed_secs),
                "latency": p.latency,
            })
        })
        .collect();

    serde_json::json!({
        "source": loaded.path.display().to_string(),
        "summary": loaded.stats,
        "points": points,
    })
}

/// Write the export document to `path`, pretty-printed.
pub fn write_json(loaded: &Loaded, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&to_json(loaded))?;
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
