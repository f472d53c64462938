//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::ChronosError;
use crate::tui::app::{App, Screen};

/// Action that needs the main loop (fallible or terminal-level).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Reload the task list.
    Refresh,
    /// Stop the current session.
    Stop,
}

const PICKER_HELP: &str = "j/k:nav | Enter:focus | r:refresh | q:quit";
const TIMER_HELP: &str = "space:pause/resume | n:skip | r/R:reset | +/-:work length | s:stop | q:quit";

/// Help line for a screen.
pub const fn help_text(screen: Screen) -> &'static str {
    match screen {
        Screen::Picker => PICKER_HELP,
        Screen::Timer => TIMER_HELP,
    }
}

/// Wait up to `timeout` for a terminal event and apply it.
///
/// Returns an action for the main loop, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(app: &mut App<'_>, timeout: Duration) -> Result<Option<Action>, ChronosError> {
    if !event::poll(timeout).map_err(|e| ChronosError::Terminal(format!("Event poll failed: {e}")))? {
        return Ok(None);
    }

    match event::read().map_err(|e| ChronosError::Terminal(format!("Event read failed: {e}")))? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(handle_key(app, key)),
        _ => Ok(None),
    }
}

/// Apply a single key press.
pub fn handle_key(app: &mut App<'_>, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char('?') => {
            app.status = Some(help_text(app.screen).to_string());
            return None;
        }
        _ => {}
    }

    match app.screen {
        Screen::Picker => handle_picker_key(app, key.code),
        Screen::Timer => handle_timer_key(app, key.code),
    }
}

fn handle_picker_key(app: &mut App<'_>, code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.clear_status();
            app.select_next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.clear_status();
            app.select_previous();
        }
        KeyCode::Enter => app.start_selected(),
        KeyCode::Char('r') => return Some(Action::Refresh),
        _ => app.clear_status(),
    }
    None
}

fn handle_timer_key(app: &mut App<'_>, code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char(' ') | KeyCode::Char('p') => app.toggle(),
        KeyCode::Char('n') => app.skip(),
        KeyCode::Char('r') => app.reset(false),
        KeyCode::Char('R') => app.reset(true),
        KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_work(1),
        KeyCode::Char('-') => app.adjust_work(-1),
        KeyCode::Char('s') => return Some(Action::Stop),
        _ => app.clear_status(),
    }
    None
}
