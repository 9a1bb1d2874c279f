use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return;
    }

    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // Pan
        KeyCode::Left | KeyCode::Char('h') => app.pan_left(),
        KeyCode::Right | KeyCode::Char('l') => app.pan_right(),

        // Zoom
        KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
        KeyCode::Char('-') => app.zoom_out(),
        KeyCode::Char('0') | KeyCode::Home => app.reset_view(),

        // Reload
        KeyCode::Char('r') => {
            if app.reload() {
                app.set_status_message(format!("Reloaded {}", app.loaded.path.display()));
            }
        }

        // Export
        KeyCode::Char('e') => app.export(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}
