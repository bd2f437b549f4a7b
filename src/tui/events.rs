//! Event handling for the `ViewApp`.

use super::app::{FocusPanel, ViewApp};
use super::theme::toggle_theme;
use super::viewmodel::OverlayKind;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Terminal events.
#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

/// Forwards terminal events from a background thread.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    _tx: mpsc::Sender<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        let event_tx = tx.clone();
        thread::spawn(move || {
            loop {
                let event = if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            Event::Key(key)
                        }
                        Ok(CrosstermEvent::Resize(w, h)) => Event::Resize(w, h),
                        _ => continue,
                    }
                } else {
                    Event::Tick
                };
                if event_tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx, _tx: tx }
    }

    pub fn next(&self) -> io::Result<Event> {
        self.rx.recv().map_err(io::Error::other)
    }
}

/// Handle key events for `ViewApp`.
pub fn handle_key_event(app: &mut ViewApp, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.overlay.current() {
        Some(OverlayKind::Help) => {
            app.overlay.close();
            return;
        }
        Some(OverlayKind::Lookup) => {
            handle_lookup_key(app, key);
            return;
        }
        None => {}
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => app.toggle_focus(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::PageDown => app.page_down(),
        KeyCode::PageUp => app.page_up(),
        KeyCode::Home | KeyCode::Char('g') => app.go_first(),
        KeyCode::End | KeyCode::Char('G') => app.go_last(),
        KeyCode::Char(' ') => app.toggle_current_allergen(),
        KeyCode::Enter => match app.focus {
            FocusPanel::Allergens => app.toggle_current_allergen(),
            FocusPanel::Products => app.toggle_current_product(),
        },
        KeyCode::Char('m') => app.cycle_mode(),
        KeyCode::Char('J') => app.toggle_raw(),
        KeyCode::Char('/') => app.start_lookup(),
        KeyCode::Char('C') => app.clear_data(),
        KeyCode::Char('r') => {
            app.reload();
        }
        KeyCode::Char('T') => {
            let name = toggle_theme();
            app.state_mut().status.info(format!("Theme: {name}"));
        }
        _ => {}
    }
}

fn handle_lookup_key(app: &mut ViewApp, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_lookup(),
        KeyCode::Enter => app.submit_lookup(),
        KeyCode::Backspace => app.lookup_pop(),
        KeyCode::Char(c) => app.lookup_push(c),
        _ => {}
    }
}
