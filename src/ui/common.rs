//! Common UI components around the chart.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::format_elapsed;

/// Render the header bar with a summary of the loaded series.
///
/// Displays: file name, record count, latency min/mean/max, time span.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let stats = &app.loaded.stats;
    let file_name = app
        .loaded
        .path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| app.loaded.path.display().to_string());

    let line = Line::from(vec![
        Span::styled(" LATENCY ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(file_name, Style::default().fg(app.theme.highlight)),
        Span::raw(" │ "),
        Span::styled(
            format!("{}", stats.count),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" records │ "),
        Span::raw(format!(
            "min {:.1} avg {:.1} max {:.1}",
            stats.min, stats.mean, stats.max
        )),
        Span::raw(" │ "),
        Span::raw(format!("span {}", format_elapsed(stats.duration_secs))),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar at the bottom.
///
/// Shows the source, the visible window and available controls. Temporary
/// status messages and reload errors take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    if let Some(ref err) = app.load_error {
        let paragraph = Paragraph::new(format!(" Error: {} | r:retry q:quit", err))
            .style(Style::default().fg(app.theme.error));
        frame.render_widget(paragraph, area);
        return;
    }

    let (lo, hi) = app.viewport.window();
    let window = if app.viewport.is_full() {
        "all".to_string()
    } else {
        format!("{} - {}", format_elapsed(lo), format_elapsed(hi))
    };

    let status = format!(
        " {} | view {} | loaded {:.0}s ago | ←→:pan +-:zoom 0:reset r:reload ?:help q:quit",
        app.source_description(),
        window,
        app.loaded_at.elapsed().as_secs_f64(),
    );

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the chart.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " View",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l    Pan time window"),
        Line::from("  +/=        Zoom in"),
        Line::from("  -          Zoom out"),
        Line::from("  0/Home     Show everything"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r          Reload newest file"),
        Line::from("  e          Export to JSON"),
        Line::from("  q/Esc      Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 38u16.min(area.width.saturating_sub(4));
    let help_height = 16u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
