//! The focus timer state machine.
//!
//! A [`TimerEngine`] owns exactly one session: the current stage, the seconds
//! left in it, whether the countdown is running and how many work stages have
//! been completed. Every operation is a total state transition. Control
//! operations called without an active session do nothing.
//!
//! Reaching zero stops the countdown but never moves to the next stage; the
//! user acknowledges the finished stage with [`TimerEngine::resume`] or
//! [`TimerEngine::skip_stage`].

use serde::Serialize;

use super::settings::{SettingsUpdate, TimerSettings};
use super::stage::Stage;
use crate::tasks::TaskRef;

/// Result of a single one-second tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown is not running; nothing changed.
    Idle,
    /// One second was counted and time remains.
    Counted,
    /// The last second of the stage was counted and the countdown stopped.
    StageFinished,
}

/// Read-only view of the engine handed to presentation code.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub stage: Stage,
    pub time_left: u32,
    pub stage_duration: u32,
    pub is_active: bool,
    pub is_session_active: bool,
    pub task: Option<TaskRef>,
    pub pomodoros_completed: u32,
    pub settings: TimerSettings,
    pub progress: f64,
}

/// Pomodoro work/break cycling for a single session.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    stage: Stage,
    time_left: u32,
    is_active: bool,
    is_session_active: bool,
    current_task: Option<TaskRef>,
    pomodoros_completed: u32,
    settings: TimerSettings,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(TimerSettings::default())
    }
}

impl TimerEngine {
    /// Create an idle engine with no session.
    #[must_use]
    pub const fn new(settings: TimerSettings) -> Self {
        Self {
            stage: Stage::Idle,
            time_left: settings.duration_secs(Stage::Work),
            is_active: false,
            is_session_active: false,
            current_task: None,
            pomodoros_completed: 0,
            settings,
        }
    }

    /// Start a focus session on a task, replacing any running session.
    pub fn start(&mut self, task: TaskRef) {
        tracing::info!(task_id = %task.id, title = %task.title, "focus session started");
        self.current_task = Some(task);
        self.stage = Stage::Work;
        self.time_left = self.settings.duration_secs(Stage::Work);
        self.is_active = true;
        self.is_session_active = true;
        self.pomodoros_completed = 0;
    }

    /// Stop counting down.
    pub fn pause(&mut self) {
        if self.is_session_active {
            self.is_active = false;
        }
    }

    /// Continue the session.
    ///
    /// Resumes a paused countdown, acknowledges a finished stage by moving to
    /// the next one (left paused), or begins work from idle.
    pub fn resume(&mut self) {
        if !self.is_session_active {
            return;
        }

        if self.stage == Stage::Idle {
            self.stage = Stage::Work;
            self.time_left = self.settings.duration_secs(Stage::Work);
            self.is_active = true;
        } else if self.time_left > 0 {
            self.is_active = true;
        } else {
            self.advance_stage();
        }
    }

    /// Abandon the current stage and move to the next one, paused.
    pub fn skip_stage(&mut self) {
        if !self.is_session_active {
            return;
        }
        self.is_active = false;
        self.advance_stage();
    }

    /// Restart the current stage, or move to the next one when `advance_stage`.
    ///
    /// Never resets the pomodoro count.
    pub fn reset_timer(&mut self, advance_stage: bool) {
        if !self.is_session_active {
            return;
        }
        self.is_active = false;
        if advance_stage {
            self.advance_stage();
        } else {
            self.time_left = self.settings.duration_secs(self.stage);
        }
    }

    /// End the session and return every field to its initial value.
    pub fn stop(&mut self) {
        if let Some(task) = &self.current_task {
            tracing::info!(
                task_id = %task.id,
                pomodoros = self.pomodoros_completed,
                "focus session stopped"
            );
        }
        self.is_active = false;
        self.is_session_active = false;
        self.stage = Stage::Idle;
        self.current_task = None;
        self.time_left = self.settings.duration_secs(Stage::Work);
        self.pomodoros_completed = 0;
    }

    /// Merge new durations.
    ///
    /// Without a running stage the countdown is recomputed from the work
    /// duration; otherwise the remaining time is kept, clamped to the new
    /// stage length.
    pub fn update_settings(&mut self, update: &SettingsUpdate) {
        self.settings = self.settings.merged(update);

        if !self.is_session_active || self.stage == Stage::Idle {
            self.time_left = self.settings.duration_secs(Stage::Work);
        } else {
            self.time_left = self.time_left.min(self.stage_duration());
        }
        tracing::debug!(settings = ?self.settings, time_left = self.time_left, "settings updated");
    }

    /// Count one second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_active || self.time_left == 0 {
            return TickOutcome::Idle;
        }

        self.time_left -= 1;
        if self.time_left == 0 {
            self.is_active = false;
            tracing::debug!(stage = %self.stage, "stage finished");
            TickOutcome::StageFinished
        } else {
            TickOutcome::Counted
        }
    }

    /// Apply the stage transition rule and leave the new stage paused.
    fn advance_stage(&mut self) {
        let next = match self.stage {
            Stage::Work => {
                self.pomodoros_completed += 1;
                if self.pomodoros_completed % self.settings.pomodoros_per_long_break.get() == 0 {
                    Stage::LongBreak
                } else {
                    Stage::ShortBreak
                }
            }
            Stage::ShortBreak | Stage::LongBreak | Stage::Idle => Stage::Work,
        };

        tracing::debug!(
            from = %self.stage,
            to = %next,
            pomodoros = self.pomodoros_completed,
            "stage advanced"
        );

        self.stage = next;
        self.time_left = self.settings.duration_secs(next);
        self.is_active = false;
    }

    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Seconds remaining in the current stage.
    #[must_use]
    pub const fn time_left(&self) -> u32 {
        self.time_left
    }

    /// Whether the countdown is running.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Whether a session is being presented.
    #[must_use]
    pub const fn is_session_active(&self) -> bool {
        self.is_session_active
    }

    #[must_use]
    pub const fn current_task(&self) -> Option<&TaskRef> {
        self.current_task.as_ref()
    }

    #[must_use]
    pub const fn pomodoros_completed(&self) -> u32 {
        self.pomodoros_completed
    }

    #[must_use]
    pub const fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    /// Full length of the current stage in seconds.
    #[must_use]
    pub const fn stage_duration(&self) -> u32 {
        self.settings.duration_secs(self.stage)
    }

    /// Fraction of the current stage already elapsed (0.0 - 1.0).
    #[must_use]
    pub fn progress(&self) -> f64 {
        let total = self.stage_duration();
        if total == 0 {
            return 1.0;
        }
        1.0 - f64::from(self.time_left) / f64::from(total)
    }

    /// Capture the current state for rendering or serialization.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            stage: self.stage,
            time_left: self.time_left,
            stage_duration: self.stage_duration(),
            is_active: self.is_active,
            is_session_active: self.is_session_active,
            task: self.current_task.clone(),
            pomodoros_completed: self.pomodoros_completed,
            settings: self.settings,
            progress: self.progress(),
        }
    }
}
