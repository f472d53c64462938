//! Wall-clock driver for the engine countdown.
//!
//! The UI loop polls for input with a short timeout and calls
//! [`Ticker::poll`] on every pass. The ticker is armed only while the engine
//! counts; it disarms as soon as the engine stops and re-arms from the moment
//! counting resumes, so paused time is never charged.

use std::time::{Duration, Instant};

use super::engine::{TickOutcome, TimerEngine};

/// Interval between ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Converts elapsed wall-clock time into engine ticks.
#[derive(Debug, Clone, Default)]
pub struct Ticker {
    /// When the next pending second started; `None` while disarmed.
    armed_at: Option<Instant>,
}

impl Ticker {
    /// Create a disarmed ticker.
    #[must_use]
    pub const fn new() -> Self {
        Self { armed_at: None }
    }

    /// Whether a tick is currently scheduled.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    /// Drop any pending tick.
    pub fn cancel(&mut self) {
        self.armed_at = None;
    }

    /// Deliver every whole second elapsed since the last tick.
    ///
    /// Returns [`TickOutcome::StageFinished`] if the stage ended during this
    /// poll, [`TickOutcome::Counted`] if at least one second was counted, and
    /// [`TickOutcome::Idle`] otherwise.
    pub fn poll(&mut self, engine: &mut TimerEngine, now: Instant) -> TickOutcome {
        if !engine.is_active() {
            self.cancel();
            return TickOutcome::Idle;
        }

        let Some(mut armed_at) = self.armed_at else {
            self.armed_at = Some(now);
            return TickOutcome::Idle;
        };

        let mut outcome = TickOutcome::Idle;
        while now.saturating_duration_since(armed_at) >= TICK_INTERVAL {
            armed_at += TICK_INTERVAL;
            match engine.tick() {
                TickOutcome::StageFinished => {
                    self.cancel();
                    return TickOutcome::StageFinished;
                }
                TickOutcome::Counted => outcome = TickOutcome::Counted,
                TickOutcome::Idle => break,
            }
        }

        self.armed_at = Some(armed_at);
        outcome
    }

    /// Time until the next tick is due, for sizing the input poll timeout.
    #[must_use]
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.armed_at
            .map(|armed_at| (armed_at + TICK_INTERVAL).saturating_duration_since(now))
    }
}
