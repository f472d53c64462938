//! Output formatting for chronos.
//!
//! Formatters for displaying tasks and timer plans as pretty text or JSON.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::ChronosError;
use crate::features::focus::CyclePlan;
use crate::tasks::Task;

pub use json::*;
pub use pretty::*;

/// Format tasks based on output format
///
/// # Errors
///
/// Returns `ChronosError::Json` if JSON serialization fails.
pub fn format_tasks(tasks: &[Task], title: &str, format: OutputFormat) -> Result<String, ChronosError> {
    match format {
        OutputFormat::Pretty => Ok(format_tasks_pretty(tasks, title)),
        OutputFormat::Json => format_tasks_json(tasks, title),
    }
}

/// Format a cycle plan based on output format
///
/// # Errors
///
/// Returns `ChronosError::Json` if JSON serialization fails.
pub fn format_plan(plan: &CyclePlan, format: OutputFormat) -> Result<String, ChronosError> {
    match format {
        OutputFormat::Pretty => Ok(format_plan_pretty(plan)),
        OutputFormat::Json => to_json(plan),
    }
}
