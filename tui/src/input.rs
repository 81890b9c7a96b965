//! Input handling for the slurp TUI.
//!
//! Events are drained without blocking, a bounded number per frame so a
//! burst of key repeats can never starve rendering. Dispatch is modal:
//! the confirm prompt eats keys first, then an open preview, then the
//! listing.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::trace;

use slurp_engine::App;

const MAX_EVENTS_PER_FRAME: usize = 64;

/// Preview pane page-scroll stride.
const PAGE_STRIDE: usize = 10;

/// Drain pending terminal events into app intents. Call once per frame.
pub fn handle_events(app: &mut App) -> Result<()> {
    for _ in 0..MAX_EVENTS_PER_FRAME {
        if !event::poll(Duration::ZERO)? {
            break;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
            // Resize redraws on the next frame anyway.
            _ => {}
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    trace!(?key, "key press");
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }
    if app.view().confirm.is_some() {
        handle_confirm_key(app, key);
    } else if app.view().preview.is_some() {
        handle_preview_key(app, key);
    } else {
        handle_listing_key(app, key);
    }
}

fn handle_confirm_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('y') => app.confirm_delete(),
        KeyCode::Esc | KeyCode::Char('n' | 'q') => app.dismiss_confirm(),
        _ => {}
    }
}

fn handle_preview_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => app.close_overlay(),
        KeyCode::Up | KeyCode::Char('k') => app.preview_scroll_up(1),
        KeyCode::Down | KeyCode::Char('j') => app.preview_scroll_down(1),
        KeyCode::PageUp => app.preview_scroll_up(PAGE_STRIDE),
        KeyCode::PageDown => app.preview_scroll_down(PAGE_STRIDE),
        _ => {}
    }
}

fn handle_listing_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Up | KeyCode::Char('k') => app.select_up(),
        KeyCode::Down | KeyCode::Char('j') => app.select_down(),
        KeyCode::Home | KeyCode::Char('g') => app.select_top(),
        KeyCode::End | KeyCode::Char('G') => app.select_bottom(),
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.activate_selected(),
        KeyCode::Backspace | KeyCode::Char('h') => app.go_to_parent(),
        KeyCode::Left | KeyCode::Char('b') => app.back(),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Delete | KeyCode::Char('d') => app.request_delete(),
        _ => {}
    }
}
