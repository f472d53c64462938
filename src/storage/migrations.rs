//! Database migrations for chronos.
//!
//! Each migration upgrades the schema by one version. The version lives in
//! `PRAGMA user_version`; migrations run when the database is opened.

use rusqlite::Connection;

use crate::error::ChronosError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 for a new database.
pub fn get_version(conn: &Connection) -> Result<i32, ChronosError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| ChronosError::Database(format!("Failed to get schema version: {e}")))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), ChronosError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| ChronosError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), ChronosError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        run_migration(conn, version)?;
        set_version(conn, version)?;
        tracing::info!(version, "applied database migration");
    }

    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<(), ChronosError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(ChronosError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: the local task list.
fn migrate_v1(conn: &Connection) -> Result<(), ChronosError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            created_at TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_completed
        ON tasks(completed);
        ",
    )
    .map_err(|e| ChronosError::Database(format!("Migration v1 failed: {e}")))
}
