//! Timer durations and cycle length.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::stage::Stage;
use crate::error::ChronosError;

const fn non_zero(value: u32) -> NonZeroU32 {
    match NonZeroU32::new(value) {
        Some(v) => v,
        None => panic!("default timer setting must be non-zero"),
    }
}

const DEFAULT_WORK_MINUTES: NonZeroU32 = non_zero(25);
const DEFAULT_SHORT_BREAK_MINUTES: NonZeroU32 = non_zero(5);
const DEFAULT_LONG_BREAK_MINUTES: NonZeroU32 = non_zero(15);
const DEFAULT_POMODOROS_PER_LONG_BREAK: NonZeroU32 = non_zero(4);

/// Upper bound on work stages per long break.
pub const MAX_POMODOROS_PER_LONG_BREAK: u32 = 12;

/// Durations for each stage and the number of work stages per long break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSettings {
    pub work_duration_minutes: NonZeroU32,
    pub short_break_duration_minutes: NonZeroU32,
    pub long_break_duration_minutes: NonZeroU32,
    pub pomodoros_per_long_break: NonZeroU32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_duration_minutes: DEFAULT_WORK_MINUTES,
            short_break_duration_minutes: DEFAULT_SHORT_BREAK_MINUTES,
            long_break_duration_minutes: DEFAULT_LONG_BREAK_MINUTES,
            pomodoros_per_long_break: DEFAULT_POMODOROS_PER_LONG_BREAK,
        }
    }
}

impl TimerSettings {
    /// Build settings from raw values, rejecting zeros.
    ///
    /// # Errors
    ///
    /// Returns `ChronosError::InvalidInput` naming the first zero field.
    pub fn from_minutes(
        work: u32,
        short_break: u32,
        long_break: u32,
        pomodoros_per_long_break: u32,
    ) -> Result<Self, ChronosError> {
        Ok(Self {
            work_duration_minutes: require_positive("work duration", work)?,
            short_break_duration_minutes: require_positive("short break duration", short_break)?,
            long_break_duration_minutes: require_positive("long break duration", long_break)?,
            pomodoros_per_long_break: require_cycle_length(pomodoros_per_long_break)?,
        })
    }

    /// Full length of a stage in seconds.
    ///
    /// Idle shares the work duration so a fresh session shows the work length.
    #[must_use]
    pub const fn duration_secs(&self, stage: Stage) -> u32 {
        let minutes = match stage {
            Stage::Idle | Stage::Work => self.work_duration_minutes,
            Stage::ShortBreak => self.short_break_duration_minutes,
            Stage::LongBreak => self.long_break_duration_minutes,
        };
        minutes.get().saturating_mul(60)
    }

    /// Merge a partial update, returning the new settings.
    #[must_use]
    pub fn merged(self, update: &SettingsUpdate) -> Self {
        Self {
            work_duration_minutes: update.work_minutes.unwrap_or(self.work_duration_minutes),
            short_break_duration_minutes: update
                .short_break_minutes
                .unwrap_or(self.short_break_duration_minutes),
            long_break_duration_minutes: update
                .long_break_minutes
                .unwrap_or(self.long_break_duration_minutes),
            pomodoros_per_long_break: update
                .pomodoros_per_long_break
                .unwrap_or(self.pomodoros_per_long_break),
        }
    }
}

fn require_positive(field: &str, value: u32) -> Result<NonZeroU32, ChronosError> {
    NonZeroU32::new(value)
        .ok_or_else(|| ChronosError::InvalidInput(format!("{field} must be greater than zero")))
}

/// Check a pomodoros-per-long-break value against `1..=MAX_POMODOROS_PER_LONG_BREAK`.
///
/// # Errors
///
/// Returns `ChronosError::InvalidInput` when the value is out of range.
pub fn require_cycle_length(value: u32) -> Result<NonZeroU32, ChronosError> {
    match NonZeroU32::new(value) {
        Some(n) if value <= MAX_POMODOROS_PER_LONG_BREAK => Ok(n),
        _ => Err(ChronosError::InvalidInput(format!(
            "pomodoros per long break must be between 1 and {MAX_POMODOROS_PER_LONG_BREAK}"
        ))),
    }
}

/// Partial settings change; `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub work_minutes: Option<NonZeroU32>,
    pub short_break_minutes: Option<NonZeroU32>,
    pub long_break_minutes: Option<NonZeroU32>,
    pub pomodoros_per_long_break: Option<NonZeroU32>,
}

impl SettingsUpdate {
    /// Update only the work duration.
    #[must_use]
    pub const fn work(minutes: NonZeroU32) -> Self {
        Self {
            work_minutes: Some(minutes),
            short_break_minutes: None,
            long_break_minutes: None,
            pomodoros_per_long_break: None,
        }
    }

    /// Check whether the update changes anything at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.work_minutes.is_none()
            && self.short_break_minutes.is_none()
            && self.long_break_minutes.is_none()
            && self.pomodoros_per_long_break.is_none()
    }
}
