//! Feature implementations for chronos.
//!
//! - Focus mode (Pomodoro timer engine, ticker, cycle preview)

pub mod focus;
