//! Application state: the loaded series, the visible window and reloads.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::pipeline::{self, Loaded};
use crate::settings::Settings;
use crate::source::{ChangeWatcher, SeriesSource};
use crate::ui::Theme;

/// Fraction of the window width moved by one pan step.
const PAN_STEP: f64 = 0.25;
/// Narrowest window the chart zooms into, in seconds.
const MIN_WINDOW_SECS: f64 = 0.001;
/// How long a status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);
/// Where the `e` key writes its export.
pub const DEFAULT_EXPORT_PATH: &str = "latency_export.json";

/// The visible x-range of the chart, within the full range of the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    full: (f64, f64),
    window: (f64, f64),
}

impl Viewport {
    /// A viewport showing all of `[lo, hi]`.
    ///
    /// A zero-width range (single point) is widened to one second.
    pub fn new(lo: f64, hi: f64) -> Self {
        let full = if hi > lo { (lo, hi) } else { (lo, lo + 1.0) };
        Self { full, window: full }
    }

    /// Returns the visible `(start, end)` in elapsed seconds.
    pub fn window(&self) -> (f64, f64) {
        self.window
    }

    /// Returns the full data range.
    pub fn full(&self) -> (f64, f64) {
        self.full
    }

    pub fn is_full(&self) -> bool {
        self.window == self.full
    }

    fn width(&self) -> f64 {
        self.window.1 - self.window.0
    }

    fn full_width(&self) -> f64 {
        self.full.1 - self.full.0
    }

    /// Place a window of `width` starting at `start`, kept inside the full range.
    fn place(&mut self, start: f64, width: f64) {
        let width = width.clamp(MIN_WINDOW_SECS.min(self.full_width()), self.full_width());
        let max_start = (self.full.1 - width).max(self.full.0);
        let start = start.clamp(self.full.0, max_start);
        self.window = (start, start + width);
        if self.width() >= self.full_width() {
            self.window = self.full;
        }
    }

    /// Move the window by `steps` pan steps (negative moves left).
    pub fn pan(&mut self, steps: f64) {
        let width = self.width();
        self.place(self.window.0 + width * PAN_STEP * steps, width);
    }

    /// Halve the window width around its center.
    pub fn zoom_in(&mut self) {
        let center = (self.window.0 + self.window.1) / 2.0;
        let width = self.width() / 2.0;
        self.place(center - width / 2.0, width);
    }

    /// Double the window width around its center, up to the full range.
    pub fn zoom_out(&mut self) {
        let center = (self.window.0 + self.window.1) / 2.0;
        let width = self.width() * 2.0;
        self.place(center - width / 2.0, width);
    }

    /// Show the full range again.
    pub fn reset(&mut self) {
        self.window = self.full;
    }

    /// Adopt a new full range after a reload.
    ///
    /// A viewport showing everything keeps showing everything; a zoomed one
    /// keeps its window where the new range allows.
    pub fn rebase(&mut self, lo: f64, hi: f64) {
        let was_full = self.is_full();
        let (start, width) = (self.window.0, self.width());
        *self = Viewport::new(lo, hi);
        if !was_full {
            self.place(start, width);
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    // Data source
    source: Box<dyn SeriesSource>,
    watcher: ChangeWatcher,
    pub loaded: Loaded,
    pub loaded_at: Instant,
    pub load_error: Option<String>,

    // View
    pub viewport: Viewport,
    pub settings: Settings,
    pub theme: Theme,
    pub export_path: PathBuf,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create the app around an already loaded series.
    ///
    /// The initial load happens before the TUI starts, so a failing pipeline
    /// never reaches the screen.
    pub fn new(source: Box<dyn SeriesSource>, loaded: Loaded, settings: Settings) -> Self {
        let (lo, hi) = loaded.series.time_range();
        let mut watcher = ChangeWatcher::new();
        watcher.mark(&loaded.path);
        let theme = Theme::for_choice(settings.theme);

        Self {
            running: true,
            show_help: false,
            source,
            watcher,
            loaded,
            loaded_at: Instant::now(),
            load_error: None,
            viewport: Viewport::new(lo, hi),
            settings,
            theme,
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// Re-run the pipeline from source selection.
    ///
    /// On failure the previous series stays on screen and the error is kept
    /// in `load_error`. Returns whether the reload succeeded.
    pub fn reload(&mut self) -> bool {
        match pipeline::load(self.source.as_ref()) {
            Ok(loaded) => {
                let (lo, hi) = loaded.series.time_range();
                self.viewport.rebase(lo, hi);
                self.watcher.mark(&loaded.path);
                self.loaded = loaded;
                self.loaded_at = Instant::now();
                self.load_error = None;
                true
            }
            Err(err) => {
                debug!(stage = err.stage().label(), error = %err, "reload failed");
                self.load_error = Some(format!("{} failed: {}", err.stage().label(), err));
                false
            }
        }
    }

    /// Reload if the source now resolves to a new or modified file.
    pub fn poll_source(&mut self) -> bool {
        if self.watcher.poll(self.source.as_ref()) {
            info!("source changed, reloading");
            return self.reload();
        }
        false
    }

    /// Export the loaded series and report the outcome in the status bar.
    pub fn export(&mut self) {
        let message = match crate::export::write_json(&self.loaded, &self.export_path) {
            Ok(()) => format!("Exported to {}", self.export_path.display()),
            Err(e) => format!("Export failed: {}", e),
        };
        self.set_status_message(message);
    }

    pub fn pan_left(&mut self) {
        self.viewport.pan(-1.0);
    }

    pub fn pan_right(&mut self) {
        self.viewport.pan(1.0);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ThemeChoice;
    use crate::source::FileSource;
    use std::fs;
    use tempfile::TempDir;

    fn app_for(dir: &TempDir, content: &str) -> App {
        let path = dir.path().join("run.csv");
        fs::write(&path, content).unwrap();
        let loaded = pipeline::load_path(&path).unwrap();
        let settings = Settings {
            theme: ThemeChoice::Dark,
            ..Settings::default()
        };
        App::new(Box::new(FileSource::new(&path)), loaded, settings)
    }

    #[test]
    fn test_viewport_starts_full() {
        let vp = Viewport::new(0.0, 100.0);
        assert!(vp.is_full());
        assert_eq!(vp.window(), (0.0, 100.0));
    }

    #[test]
    fn test_viewport_single_point_is_widened() {
        let vp = Viewport::new(0.0, 0.0);
        assert_eq!(vp.full(), (0.0, 1.0));
    }

    #[test]
    fn test_zoom_in_and_out() {
        let mut vp = Viewport::new(0.0, 100.0);
        vp.zoom_in();
        assert_eq!(vp.window(), (25.0, 75.0));
        vp.zoom_out();
        assert!(vp.is_full());
        vp.zoom_out();
        assert!(vp.is_full());
    }

    #[test]
    fn test_pan_is_clamped() {
        let mut vp = Viewport::new(0.0, 100.0);
        vp.zoom_in();
        vp.pan(1.0);
        assert_eq!(vp.window(), (37.5, 87.5));
        vp.pan(1.0);
        vp.pan(1.0);
        assert_eq!(vp.window(), (50.0, 100.0));
        for _ in 0..10 {
            vp.pan(-1.0);
        }
        assert_eq!(vp.window(), (0.0, 50.0));
    }

    #[test]
    fn test_zoom_has_a_floor() {
        let mut vp = Viewport::new(0.0, 1.0);
        for _ in 0..30 {
            vp.zoom_in();
        }
        let (lo, hi) = vp.window();
        assert!(hi - lo >= MIN_WINDOW_SECS * 0.999);
    }

    #[test]
    fn test_rebase_keeps_full_view_growing() {
        let mut vp = Viewport::new(0.0, 10.0);
        vp.rebase(0.0, 20.0);
        assert_eq!(vp.window(), (0.0, 20.0));

        vp.zoom_in();
        let zoomed = vp.window();
        vp.rebase(0.0, 40.0);
        assert_eq!(vp.window(), zoomed);
    }

    #[test]
    fn test_reload_failure_keeps_previous_series() {
        let dir = TempDir::new().unwrap();
        let mut app = app_for(&dir, "2024-01-01T00:00:00Z,1\n2024-01-01T00:00:04Z,2\n");

        fs::write(dir.path().join("run.csv"), "notadate,abc\n").unwrap();
        assert!(!app.reload());
        assert_eq!(app.loaded.series.len(), 2);
        let err = app.load_error.as_deref().unwrap();
        assert!(err.starts_with("parse failed"));
    }

    #[test]
    fn test_reload_picks_up_new_records() {
        let dir = TempDir::new().unwrap();
        let mut app = app_for(&dir, "2024-01-01T00:00:00Z,1\n");

        fs::write(
            dir.path().join("run.csv"),
            "2024-01-01T00:00:00Z,1\n2024-01-01T00:00:08Z,3\n",
        )
        .unwrap();
        assert!(app.reload());
        assert_eq!(app.loaded.series.len(), 2);
        assert_eq!(app.viewport.window(), (0.0, 8.0));
        assert!(app.load_error.is_none());
    }

    #[test]
    fn test_export_sets_status_message() {
        let dir = TempDir::new().unwrap();
        let mut app = app_for(&dir, "2024-01-01T00:00:00Z,1\n");
        app.export_path = dir.path().join("out.json");

        app.export();
        assert!(app.export_path.exists());
        assert!(app.get_status_message().unwrap().starts_with("Exported to"));
    }

    #[test]
    fn test_help_and_quit() {
        let dir = TempDir::new().unwrap();
        let mut app = app_for(&dir, "2024-01-01T00:00:00Z,1\n");
        app.toggle_help();
        assert!(app.show_help);
        app.quit();
        assert!(!app.running);
    }
}
