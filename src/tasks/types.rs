use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task in the local list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
}

/// Non-owning handle to the task a focus session is about.
///
/// The timer only displays it; it never reads or changes the task itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskRef {
    pub id: String,
    pub title: String,
}

impl From<&Task> for TaskRef {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            title: task.title.clone(),
        }
    }
}
