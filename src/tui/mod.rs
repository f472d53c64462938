//! Terminal User Interface (TUI) for the focus timer.
//!
//! Built with ratatui and crossterm. The event loop is single-threaded: it
//! waits for input until the next tick is due, advances the countdown, then
//! redraws.

mod app;
mod event;
mod ui;

pub use app::{App, Screen};

use std::io::{self, Write};
use std::time::Instant;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::error::ChronosError;
use crate::features::focus::TimerEngine;
use crate::tasks::{TaskProvider, TaskRef};

/// Run the focus screen until the user quits.
///
/// Starts a session on `task` right away when given. Returns the number of
/// pomodoros completed during the run.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or the task list cannot
/// be read.
pub fn run(
    provider: &dyn TaskProvider,
    engine: TimerEngine,
    task: Option<TaskRef>,
    bell: bool,
) -> Result<u32, ChronosError> {
    let mut app = App::new(provider, engine, bell)?;
    if let Some(task) = task {
        app.start(task);
    }

    enable_raw_mode()
        .map_err(|e| ChronosError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| ChronosError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| ChronosError::Terminal(format!("Failed to create terminal: {e}")))?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    let total = app.total_pomodoros();
    app.engine.stop();
    result.map(|()| total)
}

/// Run the main application loop.
fn run_app<B: Backend + Write>(
    terminal: &mut Terminal<B>,
    app: &mut App<'_>,
) -> Result<(), ChronosError> {
    loop {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| ChronosError::Terminal(format!("Failed to draw: {e}")))?;

        if app.pending_bell {
            app.pending_bell = false;
            if let Err(e) = ring_bell(terminal.backend_mut()) {
                tracing::warn!("failed to ring bell: {e}");
            }
        }

        let timeout = app.poll_timeout(Instant::now());
        if let Some(action) = event::handle_events(app, timeout)? {
            match action {
                event::Action::Quit => break,
                event::Action::Refresh => app.refresh()?,
                event::Action::Stop => app.stop_session()?,
            }
        }

        app.on_tick(Instant::now());
    }

    Ok(())
}

/// Write the terminal bell and flush it out.
fn ring_bell<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(b"\x07")?;
    Write::flush(out)
}
