//! Command implementations for chronos.
//!
//! Each handler returns the text to print, already formatted for the
//! requested output format.

mod config;
mod focus;
mod task;

pub use config::config;
pub use focus::{focus, resolve_task};
pub use task::task;
