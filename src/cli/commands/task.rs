//! Task list command implementation.

use colored::Colorize;

use crate::cli::args::{OutputFormat, TaskCommands};
use crate::error::ChronosError;
use crate::output::{format_task_line, format_tasks, to_json};
use crate::tasks::{TaskProvider, TaskStore};

/// Execute task subcommands.
///
/// # Errors
///
/// Returns an error if the database cannot be opened, the input is invalid,
/// or the task does not exist.
pub fn task(cmd: TaskCommands, format: OutputFormat) -> Result<String, ChronosError> {
    let store = TaskStore::new()?;
    task_with_store(&store, cmd, format)
}

fn task_with_store(
    store: &TaskStore,
    cmd: TaskCommands,
    format: OutputFormat,
) -> Result<String, ChronosError> {
    match cmd {
        TaskCommands::Add { title } => {
            let task = store.add(&title.join(" "))?;
            match format {
                OutputFormat::Json => to_json(&task),
                OutputFormat::Pretty => Ok(format!(
                    "{} {}\n   {}",
                    "Added".green(),
                    format_task_line(&task),
                    format!("Focus on it with: chronos focus --task {}", task.id).dimmed()
                )),
            }
        }
        TaskCommands::List { all } => {
            if all {
                format_tasks(&store.list_all()?, "All tasks", format)
            } else {
                format_tasks(&store.list_open()?, "Open tasks", format)
            }
        }
        TaskCommands::Done { id } => {
            let task = store.complete(id)?;
            match format {
                OutputFormat::Json => to_json(&task),
                OutputFormat::Pretty => Ok(format!("{} {}", "Done".green(), format_task_line(&task))),
            }
        }
    }
}
