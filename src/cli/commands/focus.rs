//! Focus mode command implementation.

use std::num::NonZeroU32;

use colored::Colorize;

use crate::cli::args::{FocusArgs, FocusCommands, FocusStartArgs, OutputFormat, TimerOverrides};
use crate::config::Config;
use crate::error::ChronosError;
use crate::features::focus::{CyclePlan, TimerEngine, TimerSettings};
use crate::output::format_plan;
use crate::tasks::{TaskProvider, TaskRef, TaskStore};
use crate::tui;

/// Execute focus commands.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the task cannot be
/// found, or the terminal UI fails.
pub fn focus(args: FocusArgs, config: &Config, format: OutputFormat) -> Result<String, ChronosError> {
    let settings = config.focus.timer_settings()?;

    match args.command {
        Some(FocusCommands::Plan { cycles, timer }) => plan(settings, cycles, timer, format),
        None => run_timer(args.start, settings, config.focus.bell),
    }
}

fn plan(
    settings: TimerSettings,
    cycles: u32,
    overrides: TimerOverrides,
    format: OutputFormat,
) -> Result<String, ChronosError> {
    let cycles = NonZeroU32::new(cycles)
        .ok_or_else(|| ChronosError::InvalidInput("cycles must be at least 1".to_string()))?;
    let plan = CyclePlan::build(settings.merged(&overrides.to_update()), cycles);
    format_plan(&plan, format)
}

fn run_timer(
    args: FocusStartArgs,
    settings: TimerSettings,
    bell: bool,
) -> Result<String, ChronosError> {
    let store = TaskStore::new()?;

    let task = match args.title {
        Some(title) => Some(TaskRef::from(&store.add(&title)?)),
        None => resolve_task(&store, args.task)?,
    };

    let mut engine = TimerEngine::new(settings);
    let overrides = args.timer.to_update();
    if !overrides.is_empty() {
        engine.update_settings(&overrides);
    }

    let pomodoros = tui::run(&store, engine, task, bell)?;

    Ok(match pomodoros {
        0 => "No pomodoros completed this time.".dimmed().to_string(),
        1 => format!("{} 1 pomodoro completed. Nice work!", "✓".green()),
        n => format!("{} {n} pomodoros completed. Nice work!", "✓".green()),
    })
}

/// Look up the task to focus on, if an ID was given.
///
/// Completed tasks are accepted; the timer only needs the title.
///
/// # Errors
///
/// Returns `NotFound` if the ID does not exist.
pub fn resolve_task(
    provider: &dyn TaskProvider,
    task_id: Option<i64>,
) -> Result<Option<TaskRef>, ChronosError> {
    let Some(id) = task_id else {
        return Ok(None);
    };

    provider
        .get(id)?
        .map(|task| Some(TaskRef::from(&task)))
        .ok_or_else(|| ChronosError::NotFound(format!("Task with ID: {id}")))
}
