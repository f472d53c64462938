//! Error types for chronos.

use thiserror::Error;

/// Errors raised by the chronos library.
#[derive(Debug, Error)]
pub enum ChronosError {
    /// Configuration could not be read, parsed or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A SQLite operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// A requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User input was rejected.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The terminal could not be set up or drawn.
    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ChronosError::NotFound("Task with ID: 3".to_string());
        assert_eq!(err.to_string(), "Not found: Task with ID: 3");
    }

    #[test]
    fn test_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: ChronosError = io.into();
        assert!(matches!(err, ChronosError::Io(_)));
        assert!(err.to_string().contains("disk full"));
    }
}
