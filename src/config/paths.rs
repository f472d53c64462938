//! Path resolution for chronos configuration and data files.
//!
//! All chronos data is stored in `$CHRONOS_HOME`, or `~/.chronos/` when unset:
//! - `config.yaml` - Main configuration file
//! - `chronos.db` - SQLite database for the task list
//! - `logs/` - Rolling log files

use std::path::PathBuf;

use crate::error::ChronosError;

/// Environment variable overriding the data root.
pub const HOME_ENV: &str = "CHRONOS_HOME";

/// Paths to chronos configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory
    pub root: PathBuf,
    /// Config file: `<root>/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `<root>/chronos.db`
    pub database: PathBuf,
    /// Logs directory: `<root>/logs/`
    pub logs: PathBuf,
}

impl Paths {
    /// Resolve paths from `$CHRONOS_HOME` or the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, ChronosError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var_os("HOME").ok_or_else(|| {
            ChronosError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".chronos")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("chronos.db"),
            logs: root.join("logs"),
            root,
        }
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), ChronosError> {
        for dir in [&self.root, &self.logs] {
            std::fs::create_dir_all(dir).map_err(|e| {
                ChronosError::Config(format!(
                    "Failed to create directory {}: {e}",
                    dir.display()
                ))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-chronos");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("chronos.db"));
        assert_eq!(paths.logs, root.join("logs"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested"));

        paths.ensure_dirs().unwrap();
        paths.ensure_dirs().unwrap();

        assert!(paths.root.exists());
        assert!(paths.logs.exists());
    }
}
