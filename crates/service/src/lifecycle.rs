//! Status transitions for a single strategy.
//!
//! Only two operations move `status`:
//!
//! | Operation | Effect |
//! |---|---|
//! | toggle | `RUNNING` → `STOPPED`; anything else → `RUNNING`, stamping `lastRun` |
//! | schedule update | fields copied verbatim; `STOPPED` + enabled → `SCHEDULED`; `SCHEDULED` + disabled → `STOPPED` |
//!
//! `ERROR` is never produced here. Toggling an `ERROR` strategy starts it,
//! exactly like any other non-running state.

use chrono::{DateTime, Utc};
use core_types::{Strategy, StrategyStatus};
use serde::Deserialize;

/// The body of a schedule update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleUpdate {
    pub enabled: bool,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

/// Flips a strategy between running and not running.
pub fn toggle(strategy: &mut Strategy, now: DateTime<Utc>) {
    match strategy.status {
        StrategyStatus::Running => strategy.status = StrategyStatus::Stopped,
        StrategyStatus::Stopped | StrategyStatus::Scheduled | StrategyStatus::Error => {
            strategy.status = StrategyStatus::Running;
            strategy.last_run = Some(now);
        }
    }
}

/// Applies a schedule update. The window is copied as given, including
/// clearing it when the update carries no times.
pub fn apply_schedule(strategy: &mut Strategy, update: ScheduleUpdate) {
    strategy.schedule_enabled = update.enabled;
    strategy.start_time = update.start_time;
    strategy.end_time = update.end_time;

    strategy.status = match (update.enabled, strategy.status) {
        (true, StrategyStatus::Stopped) => StrategyStatus::Scheduled,
        (false, StrategyStatus::Scheduled) => StrategyStatus::Stopped,
        (_, unchanged) => unchanged,
    };
}
