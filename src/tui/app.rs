//! Application state for the focus screen.

use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use crate::error::ChronosError;
use crate::features::focus::{SettingsUpdate, TickOutcome, Ticker, TimerEngine};
use crate::tasks::{Task, TaskProvider, TaskRef};

/// Longest wait for input between redraws.
const MAX_POLL: Duration = Duration::from_millis(250);

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Choosing a task.
    Picker,
    /// Running a focus session.
    Timer,
}

/// Application state.
///
/// The engine is handed in by the caller and owned here; every key handler
/// reaches it through `&mut App`.
pub struct App<'a> {
    provider: &'a dyn TaskProvider,
    /// The session state machine.
    pub engine: TimerEngine,
    ticker: Ticker,
    /// Open tasks for the picker.
    pub tasks: Vec<Task>,
    /// Currently selected index.
    pub selected: usize,
    /// Current screen.
    pub screen: Screen,
    /// Status message to display.
    pub status: Option<String>,
    /// Ring the terminal bell when a stage ends.
    pub bell: bool,
    /// A bell is waiting to be written.
    pub pending_bell: bool,
    /// The current stage ran out and waits for acknowledgement.
    pub stage_finished: bool,
    /// Pomodoros from sessions already stopped in this run.
    banked_pomodoros: u32,
}

impl<'a> App<'a> {
    /// Create a new app instance showing the task picker.
    ///
    /// # Errors
    ///
    /// Returns an error if the open tasks cannot be loaded.
    pub fn new(
        provider: &'a dyn TaskProvider,
        engine: TimerEngine,
        bell: bool,
    ) -> Result<Self, ChronosError> {
        let tasks = provider.list_open()?;

        Ok(Self {
            provider,
            engine,
            ticker: Ticker::new(),
            tasks,
            selected: 0,
            screen: Screen::Picker,
            status: Some("Press ? for help".to_string()),
            bell,
            pending_bell: false,
            stage_finished: false,
            banked_pomodoros: 0,
        })
    }

    /// Reload open tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if the tasks cannot be loaded.
    pub fn refresh(&mut self) -> Result<(), ChronosError> {
        self.tasks = self.provider.list_open()?;

        if self.selected >= self.tasks.len() {
            self.selected = self.tasks.len().saturating_sub(1);
        }
        Ok(())
    }

    /// Get the currently selected task.
    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected)
    }

    /// Move selection up.
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.tasks.len() {
            self.selected += 1;
        }
    }

    /// Start a session on the selected task.
    pub fn start_selected(&mut self) {
        match self.selected_task().map(TaskRef::from) {
            Some(task) => self.start(task),
            None => {
                self.status = Some("No open tasks. Add one with 'chronos task add'".to_string());
            }
        }
    }

    /// Start a session on a task and switch to the timer.
    pub fn start(&mut self, task: TaskRef) {
        self.banked_pomodoros += self.engine.pomodoros_completed();
        self.engine.start(task);
        self.ticker.cancel();
        self.screen = Screen::Timer;
        self.stage_finished = false;
        self.status = None;
    }

    /// Space: pause a running countdown, otherwise resume.
    pub fn toggle(&mut self) {
        if self.engine.is_active() {
            self.engine.pause();
            self.status = Some("Paused".to_string());
            return;
        }

        let was_finished = self.stage_finished;
        self.engine.resume();
        self.stage_finished = false;

        self.status = if was_finished {
            Some(format!(
                "{} ready. Press space to start",
                self.engine.stage()
            ))
        } else {
            None
        };
    }

    /// Skip to the next stage.
    pub fn skip(&mut self) {
        self.engine.skip_stage();
        self.stage_finished = false;
        self.status = Some(format!("Skipped to {}", self.engine.stage()));
    }

    /// Restart the stage, or move on to the next one when `advance`.
    pub fn reset(&mut self, advance: bool) {
        self.engine.reset_timer(advance);
        self.stage_finished = false;
        self.status = Some(if advance {
            format!("Reset into {}", self.engine.stage())
        } else {
            format!("{} restarted", self.engine.stage())
        });
    }

    /// Stop the session and go back to the picker.
    ///
    /// # Errors
    ///
    /// Returns an error if the task list cannot be reloaded.
    pub fn stop_session(&mut self) -> Result<(), ChronosError> {
        let completed = self.engine.pomodoros_completed();
        self.banked_pomodoros += completed;
        self.engine.stop();
        self.ticker.cancel();
        self.stage_finished = false;
        self.screen = Screen::Picker;
        self.status = Some(format!(
            "Session stopped after {completed} pomodoro{}",
            if completed == 1 { "" } else { "s" }
        ));
        self.refresh()
    }

    /// Lengthen or shorten work stages by `delta` minutes, never below one.
    pub fn adjust_work(&mut self, delta: i32) {
        let current = self.engine.settings().work_duration_minutes.get();
        let target = current.saturating_add_signed(delta).max(1);
        if let Some(minutes) = NonZeroU32::new(target) {
            self.engine.update_settings(&SettingsUpdate::work(minutes));
            self.status = Some(format!("Work stages: {minutes} min"));
        }
    }

    /// Advance the countdown to `now`.
    pub fn on_tick(&mut self, now: Instant) {
        if self.ticker.poll(&mut self.engine, now) == TickOutcome::StageFinished {
            self.stage_finished = true;
            self.pending_bell = self.bell;
            self.status = Some(format!(
                "{} complete. Press space to continue",
                self.engine.stage()
            ));
        }
    }

    /// How long to wait for input before the next redraw.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.ticker
            .until_next(now)
            .map_or(MAX_POLL, |d| d.min(MAX_POLL))
    }

    /// Pomodoros completed during this run, across sessions.
    pub const fn total_pomodoros(&self) -> u32 {
        self.banked_pomodoros + self.engine.pomodoros_completed()
    }

    /// Clear the transient status line.
    pub fn clear_status(&mut self) {
        if !self.stage_finished {
            self.status = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::features::focus::{Stage, TimerSettings};
    use crate::tasks::MockTaskProvider;

    fn make_task(id: i64, title: &str) -> Task {
        Task {
            id,
            title: title.to_string(),
            created_at: Utc::now(),
            completed: false,
        }
    }

    fn provider_with(tasks: Vec<Task>) -> MockTaskProvider {
        let mut provider = MockTaskProvider::new();
        provider
            .expect_list_open()
            .returning(move || Ok(tasks.clone()));
        provider
    }

    fn short_engine() -> TimerEngine {
        TimerEngine::new(TimerSettings::from_minutes(1, 1, 1, 2).unwrap())
    }

    #[test]
    fn test_new_shows_picker() {
        let provider = provider_with(vec![make_task(1, "A"), make_task(2, "B")]);
        let app = App::new(&provider, TimerEngine::default(), true).unwrap();

        assert_eq!(app.screen, Screen::Picker);
        assert_eq!(app.tasks.len(), 2);
        assert!(!app.engine.is_session_active());
    }

    #[test]
    fn test_selection_bounds() {
        let provider = provider_with(vec![make_task(1, "A"), make_task(2, "B")]);
        let mut app = App::new(&provider, TimerEngine::default(), true).unwrap();

        app.select_previous();
        assert_eq!(app.selected, 0);
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_start_selected() {
        let provider = provider_with(vec![make_task(1, "A"), make_task(2, "B")]);
        let mut app = App::new(&provider, TimerEngine::default(), true).unwrap();

        app.select_next();
        app.start_selected();

        assert_eq!(app.screen, Screen::Timer);
        assert_eq!(app.engine.stage(), Stage::Work);
        assert_eq!(app.engine.current_task().map(|t| t.id.as_str()), Some("2"));
    }

    #[test]
    fn test_start_selected_without_tasks() {
        let provider = provider_with(Vec::new());
        let mut app = App::new(&provider, TimerEngine::default(), true).unwrap();

        app.start_selected();

        assert_eq!(app.screen, Screen::Picker);
        assert!(!app.engine.is_session_active());
        assert!(app.status.as_deref().unwrap_or("").contains("No open tasks"));
    }

    #[test]
    fn test_toggle_pauses_and_resumes() {
        let provider = provider_with(vec![make_task(1, "A")]);
        let mut app = App::new(&provider, TimerEngine::default(), true).unwrap();
        app.start_selected();

        app.toggle();
        assert!(!app.engine.is_active());
        app.toggle();
        assert!(app.engine.is_active());
        assert_eq!(app.engine.stage(), Stage::Work);
    }

    #[test]
    fn test_stage_finish_rings_and_waits() {
        let provider = provider_with(vec![make_task(1, "A")]);
        let mut app = App::new(&provider, short_engine(), true).unwrap();
        app.start_selected();

        let t0 = Instant::now();
        app.on_tick(t0);
        app.on_tick(t0 + Duration::from_secs(61));

        assert!(app.stage_finished);
        assert!(app.pending_bell);
        assert_eq!(app.engine.stage(), Stage::Work);
        assert_eq!(app.engine.time_left(), 0);
        assert_eq!(
            app.status.as_deref(),
            Some("Focus complete. Press space to continue")
        );

        app.toggle();
        assert!(!app.stage_finished);
        assert_eq!(app.engine.stage(), Stage::ShortBreak);
        assert_eq!(
            app.status.as_deref(),
            Some("Short Break ready. Press space to start")
        );
        assert!(!app.engine.is_active());
        assert_eq!(app.total_pomodoros(), 1);

        app.toggle();
        assert!(app.engine.is_active());
    }

    #[test]
    fn test_bell_disabled() {
        let provider = provider_with(vec![make_task(1, "A")]);
        let mut app = App::new(&provider, short_engine(), false).unwrap();
        app.start_selected();

        let t0 = Instant::now();
        app.on_tick(t0);
        app.on_tick(t0 + Duration::from_secs(60));

        assert!(app.stage_finished);
        assert!(!app.pending_bell);
    }

    #[test]
    fn test_stop_banks_pomodoros_and_returns_to_picker() {
        let provider = provider_with(vec![make_task(1, "A")]);
        let mut app = App::new(&provider, short_engine(), true).unwrap();
        app.start_selected();
        app.skip();
        app.skip();
        app.skip();

        app.stop_session().unwrap();

        assert_eq!(app.screen, Screen::Picker);
        assert!(!app.engine.is_session_active());
        assert_eq!(app.engine.pomodoros_completed(), 0);
        assert_eq!(app.total_pomodoros(), 2);
    }

    #[test]
    fn test_adjust_work_never_below_one() {
        let provider = provider_with(vec![make_task(1, "A")]);
        let mut app = App::new(&provider, short_engine(), true).unwrap();

        app.adjust_work(-5);
        assert_eq!(app.engine.settings().work_duration_minutes.get(), 1);

        app.adjust_work(2);
        assert_eq!(app.engine.settings().work_duration_minutes.get(), 3);
        assert_eq!(app.engine.time_left(), 180);
    }

    #[test]
    fn test_reset_keeps_count() {
        let provider = provider_with(vec![make_task(1, "A")]);
        let mut app = App::new(&provider, TimerEngine::default(), true).unwrap();
        app.start_selected();
        app.skip();

        app.reset(false);
        assert_eq!(app.engine.stage(), Stage::ShortBreak);
        assert_eq!(app.engine.time_left(), 300);

        app.reset(true);
        assert_eq!(app.engine.stage(), Stage::Work);
        assert_eq!(app.engine.pomodoros_completed(), 1);
    }

    #[test]
    fn test_poll_timeout_tracks_ticker() {
        let provider = provider_with(vec![make_task(1, "A")]);
        let mut app = App::new(&provider, TimerEngine::default(), true).unwrap();
        let t0 = Instant::now();
        assert_eq!(app.poll_timeout(t0), MAX_POLL);

        app.start_selected();
        app.on_tick(t0);
        assert_eq!(
            app.poll_timeout(t0 + Duration::from_millis(900)),
            Duration::from_millis(100)
        );
    }
}
