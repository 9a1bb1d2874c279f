//! Layered configuration.
//!
//! Values are resolved from, lowest to highest priority:
//!
//! 1. built-in defaults
//! 2. a TOML file (`--config <FILE>`, or `latency-graph.toml` in the working
//!    directory when present)
//! 3. environment variables prefixed with `LATENCY_GRAPH_`
//!
//! Command-line flags are applied on top by the binary.
//!
//! ```toml
//! data_dir = "src/webrtcommunication/data"
//! extension = "txt"
//! tick_count = 6
//! theme = "dark"
//! ```

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Directory scanned when nothing else is configured.
pub const DEFAULT_DATA_DIR: &str = "data";
/// Config file looked up in the working directory (any supported extension).
pub const DEFAULT_CONFIG_NAME: &str = "latency-graph";
/// Prefix for environment overrides, e.g. `LATENCY_GRAPH_DATA_DIR`.
pub const ENV_PREFIX: &str = "LATENCY_GRAPH";

/// Which color theme the TUI uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Detect from the terminal background.
    #[default]
    Auto,
    Dark,
    Light,
}

/// Resolved settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Directory holding latency logs.
    pub data_dir: PathBuf,
    /// Only consider files with this extension. `None` considers all files.
    #[serde(default)]
    pub extension: Option<String>,
    /// Number of labels on each chart axis.
    pub tick_count: usize,
    /// Chart title.
    pub title: String,
    #[serde(default)]
    pub theme: ThemeChoice,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            extension: None,
            tick_count: 5,
            title: "Latency over time".to_string(),
            theme: ThemeChoice::Auto,
        }
    }
}

impl Settings {
    /// Load settings, reading `path` if given (it must exist then).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        let builder = Config::builder()
            .set_default("data_dir", defaults.data_dir.to_string_lossy().to_string())?
            .set_default("tick_count", defaults.tick_count as i64)?
            .set_default("title", defaults.title)?
            .set_default("theme", "auto")?;

        let builder = match path {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn toml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = toml_file(
            r#"
            data_dir = "/var/log/latency"
            extension = "txt"
            tick_count = 7
            theme = "light"
            "#,
        );

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("/var/log/latency"));
        assert_eq!(settings.extension.as_deref(), Some("txt"));
        assert_eq!(settings.tick_count, 7);
        assert_eq!(settings.theme, ThemeChoice::Light);
        assert_eq!(settings.title, "Latency over time");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = toml_file("title = \"Peer latency\"\n");

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.title, "Peer latency");
        assert_eq!(settings.tick_count, 5);
        assert!(settings.extension.is_none());
        assert_eq!(settings.theme, ThemeChoice::Auto);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("/nonexistent/latency-graph.toml"))).is_err());
    }

    #[test]
    fn test_invalid_theme_rejected() {
        let file = toml_file("theme = \"neon\"\n");
        assert!(Settings::load(Some(file.path())).is_err());
    }
}
