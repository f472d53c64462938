//! SQLite-backed task list.

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};

use super::types::Task;
use super::TaskProvider;
use crate::error::ChronosError;
use crate::storage::Database;

const SELECT_TASK: &str = "SELECT id, title, created_at, completed FROM tasks";

/// Local task storage.
pub struct TaskStore {
    db: Database,
}

impl TaskStore {
    /// Open the task store in the default database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn new() -> Result<Self, ChronosError> {
        Ok(Self {
            db: Database::open()?,
        })
    }

    /// Create a store over an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Add a task.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank title, or a database error.
    pub fn add(&self, title: &str) -> Result<Task, ChronosError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ChronosError::InvalidInput(
                "Task title cannot be empty".to_string(),
            ));
        }

        let created_at = Utc::now();
        let conn = self.db.connection();
        conn.execute(
            "INSERT INTO tasks (title, created_at, completed) VALUES (?1, ?2, 0)",
            params![title, created_at.to_rfc3339()],
        )
        .map_err(|e| ChronosError::Database(format!("Failed to insert task: {e}")))?;

        let task = Task {
            id: conn.last_insert_rowid(),
            title: title.to_string(),
            created_at,
            completed: false,
        };
        tracing::info!(id = task.id, title = %task.title, "task added");
        Ok(task)
    }

    /// List every task, open and completed, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_all(&self) -> Result<Vec<Task>, ChronosError> {
        self.query_tasks(&format!("{SELECT_TASK} ORDER BY id"))
    }

    /// Mark a task completed and return it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no task has this ID, or a database error.
    pub fn complete(&self, id: i64) -> Result<Task, ChronosError> {
        let rows = self
            .db
            .connection()
            .execute("UPDATE tasks SET completed = 1 WHERE id = ?1", [id])
            .map_err(|e| ChronosError::Database(format!("Failed to complete task: {e}")))?;

        if rows == 0 {
            return Err(ChronosError::NotFound(format!("Task with ID: {id}")));
        }
        tracing::info!(id, "task completed");

        self.get(id)?
            .ok_or_else(|| ChronosError::NotFound(format!("Task with ID: {id}")))
    }

    fn query_tasks(&self, sql: &str) -> Result<Vec<Task>, ChronosError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| ChronosError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], row_to_task)
            .map_err(|e| ChronosError::Database(format!("Failed to query tasks: {e}")))?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row.map_err(|e| ChronosError::Database(e.to_string()))?);
        }
        Ok(tasks)
    }
}

impl TaskProvider for TaskStore {
    fn get(&self, id: i64) -> Result<Option<Task>, ChronosError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(&format!("{SELECT_TASK} WHERE id = ?1"))
            .map_err(|e| ChronosError::Database(format!("Failed to prepare query: {e}")))?;

        stmt.query_row([id], row_to_task)
            .optional()
            .map_err(|e| ChronosError::Database(format!("Failed to query task: {e}")))
    }

    fn list_open(&self) -> Result<Vec<Task>, ChronosError> {
        self.query_tasks(&format!("{SELECT_TASK} WHERE completed = 0 ORDER BY id"))
    }
}

fn row_to_task(row: &Row<'_>) -> Result<Task, rusqlite::Error> {
    let created_at_str: String = row.get(2)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        created_at,
        completed: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> TaskStore {
        TaskStore::with_database(Database::open_in_memory().unwrap())
    }

    #[test]
    fn test_add_and_get() {
        let store = create_test_store();

        let task = store.add("  Write report  ").unwrap();
        assert_eq!(task.title, "Write report");
        assert!(!task.completed);

        let loaded = store.get(task.id).unwrap().unwrap();
        assert_eq!(loaded.id, task.id);
        assert_eq!(loaded.title, "Write report");
    }

    #[test]
    fn test_add_rejects_blank_title() {
        let store = create_test_store();
        let err = store.add("   ").unwrap_err();
        assert!(matches!(err, ChronosError::InvalidInput(_)));
    }

    #[test]
    fn test_get_missing() {
        let store = create_test_store();
        assert!(store.get(999).unwrap().is_none());
    }

    #[test]
    fn test_complete_hides_from_open_list() {
        let store = create_test_store();
        let first = store.add("First").unwrap();
        let second = store.add("Second").unwrap();

        let done = store.complete(first.id).unwrap();
        assert!(done.completed);

        let open = store.list_open().unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, second.id);

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_complete_missing() {
        let store = create_test_store();
        let err = store.complete(12).unwrap_err();
        assert!(matches!(err, ChronosError::NotFound(_)));
    }

    #[test]
    fn test_list_open_oldest_first() {
        let store = create_test_store();
        store.add("A").unwrap();
        store.add("B").unwrap();
        store.add("C").unwrap();

        let titles: Vec<String> = store
            .list_open()
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }
}
