//! chronos - a terminal task list with a Pomodoro focus timer
//!
//! The timer core lives in [`features::focus`]: a pure state machine that
//! walks work, short break, and long break stages, plus a ticker that feeds
//! it one-second ticks. Tasks are kept in a local `SQLite` database and the
//! focus screen is a ratatui TUI.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod storage;
pub mod tasks;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::ChronosError;
pub use features::focus::{Stage, TimerEngine, TimerSettings};
