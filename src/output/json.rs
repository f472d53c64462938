//! JSON output formatting for chronos.

use serde::Serialize;
use serde_json::json;

use crate::error::ChronosError;
use crate::tasks::Task;

/// Format tasks as JSON
///
/// # Errors
///
/// Returns `ChronosError::Json` if serialization fails.
pub fn format_tasks_json(tasks: &[Task], list_name: &str) -> Result<String, ChronosError> {
    let output = json!({
        "list": list_name,
        "count": tasks.len(),
        "items": tasks
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `ChronosError::Json` if serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, ChronosError> {
    Ok(serde_json::to_string_pretty(value)?)
}
