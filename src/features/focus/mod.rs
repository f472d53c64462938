//! Focus mode: the Pomodoro timer.
//!
//! - `engine`: the session state machine (start, pause, resume, skip, reset, stop)
//! - `ticker`: turns wall-clock time into one-second engine ticks
//! - `plan`: previews the stage sequence for a set of cycles
//! - `format`: countdown and duration text helpers

pub mod engine;
pub mod format;
pub mod plan;
pub mod settings;
pub mod stage;
pub mod ticker;

pub use engine::{SessionSnapshot, TickOutcome, TimerEngine};
pub use format::{format_duration, format_mmss, parse_duration, parse_minutes, render_progress_bar};
pub use plan::{CyclePlan, PlannedStage};
pub use settings::{
    require_cycle_length, SettingsUpdate, TimerSettings, MAX_POMODOROS_PER_LONG_BREAK,
};
pub use stage::Stage;
pub use ticker::{Ticker, TICK_INTERVAL};
