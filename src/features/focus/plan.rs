//! Stage schedule preview.
//!
//! Walks a fresh engine through whole long-break cycles with `skip_stage`,
//! so the preview follows exactly the transitions a real session takes.

use std::num::NonZeroU32;

use serde::Serialize;

use super::engine::TimerEngine;
use super::settings::TimerSettings;
use super::stage::Stage;
use crate::tasks::TaskRef;

/// One stage in a previewed schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedStage {
    pub index: usize,
    pub stage: Stage,
    pub duration_secs: u32,
    /// Work stages completed before this stage begins.
    pub pomodoros_completed: u32,
}

/// Sequence of stages covering a number of long-break cycles.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CyclePlan {
    pub settings: TimerSettings,
    pub cycles: u32,
    pub stages: Vec<PlannedStage>,
    pub total_secs: u64,
    pub focus_secs: u64,
}

impl CyclePlan {
    /// Build the schedule for `cycles` full cycles, ending on a long break.
    #[must_use]
    pub fn build(settings: TimerSettings, cycles: NonZeroU32) -> Self {
        let target = cycles
            .get()
            .saturating_mul(settings.pomodoros_per_long_break.get());

        let mut engine = TimerEngine::new(settings);
        engine.start(TaskRef {
            id: "plan".to_string(),
            title: "Plan preview".to_string(),
        });

        let mut stages = Vec::new();
        loop {
            stages.push(PlannedStage {
                index: stages.len() + 1,
                stage: engine.stage(),
                duration_secs: engine.stage_duration(),
                pomodoros_completed: engine.pomodoros_completed(),
            });

            if engine.stage() == Stage::LongBreak && engine.pomodoros_completed() >= target {
                break;
            }
            engine.skip_stage();
        }

        let total_secs = stages.iter().map(|s| u64::from(s.duration_secs)).sum();
        let focus_secs = stages
            .iter()
            .filter(|s| s.stage == Stage::Work)
            .map(|s| u64::from(s.duration_secs))
            .sum();

        Self {
            settings,
            cycles: cycles.get(),
            stages,
            total_secs,
            focus_secs,
        }
    }
}
