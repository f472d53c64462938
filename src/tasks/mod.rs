//! Task source for focus sessions.
//!
//! The focus timer only needs an identifier and a title; [`TaskProvider`]
//! is the seam between the timer's presentation code and wherever tasks live.

mod store;
mod types;

pub use store::TaskStore;
pub use types::{Task, TaskRef};

use crate::error::ChronosError;

/// Read access to tasks.
#[cfg_attr(test, mockall::automock)]
pub trait TaskProvider {
    /// Look up a task by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, id: i64) -> Result<Option<Task>, ChronosError>;

    /// List tasks that are not completed, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn list_open(&self) -> Result<Vec<Task>, ChronosError>;
}
