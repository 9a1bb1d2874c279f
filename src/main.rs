use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use latency_graph::{
    events, export, pipeline, ui, App, DirectorySource, FileSource, Loaded, SeriesSource,
    Settings,
};

#[derive(Parser, Debug)]
#[command(name = "latency-graph")]
#[command(about = "Chart the newest latency log in a data directory")]
struct Args {
    /// Directory holding latency logs; the newest file is charted
    #[arg(short, long, conflicts_with = "file")]
    dir: Option<PathBuf>,

    /// Chart this file instead of selecting the newest one
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Only consider files with this extension (e.g. "csv")
    #[arg(long, conflicts_with = "file")]
    extension: Option<String>,

    /// Configuration file (defaults to ./latency-graph.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the normalized series to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Reload when the source changes, checking every SECS seconds
    #[arg(long, value_name = "SECS", conflicts_with = "export")]
    follow: Option<u64>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose, args.log_file.as_deref())?;

    let mut settings =
        Settings::load(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(dir) = args.dir {
        settings.data_dir = dir;
    }
    if let Some(extension) = args.extension {
        settings.extension = Some(extension);
    }

    let source: Box<dyn SeriesSource> = match args.file {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(DirectorySource::new(
            &settings.data_dir,
            settings.extension.clone(),
        )),
    };

    // Fail before touching the terminal so no partial chart is ever shown
    let loaded = load(source.as_ref())?;

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        export::write_json(&loaded, &export_path)?;
        println!(
            "Exported {} records from {} to {}",
            loaded.stats.count,
            loaded.path.display(),
            export_path.display()
        );
        return Ok(());
    }

    let follow = args.follow.map(Duration::from_secs);
    let app = App::new(source, loaded, settings);
    run_tui(app, follow)
}

/// Run the pipeline once, naming the failed stage in the error.
fn load(source: &dyn SeriesSource) -> Result<Loaded> {
    pipeline::load(source).map_err(|err| {
        let stage = err.stage().label();
        anyhow::Error::new(err).context(format!("{stage} stage failed"))
    })
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` overrides the level picked from `-v`.
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

/// Run the TUI until the user quits
fn run_tui(mut app: App, follow: Option<Duration>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    info!(source = app.source_description(), "starting viewer");

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, follow);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    follow: Option<Duration>,
) -> Result<()> {
    let mut last_check = Instant::now();

    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Follow mode: reload when the source changes
        if let Some(interval) = follow {
            if last_check.elapsed() >= interval {
                app.poll_source();
                last_check = Instant::now();
            }
        }
    }

    Ok(())
}
