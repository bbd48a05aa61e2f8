//! Overnight fasting windows and live fasting status.

use serde::Serialize;

use crate::duration::{HOUR_MS, format_duration, format_duration_long};
use crate::event::MealEvent;

/// The fixed intermittent-fasting threshold for overnight windows.
///
/// Deliberately independent of the configurable live-status goal: a window
/// is flagged as intermittent fasting at 16h regardless of what goal the
/// user tracks against.
pub const INTERMITTENT_FASTING_MS: i64 = 16 * HOUR_MS;

/// Windows longer than this are treated as unreliable and discarded.
///
/// Guards against clock skew, backfilled or edited entries, and queries
/// that accidentally span more than one day boundary.
pub const MAX_WINDOW_MS: i64 = 48 * HOUR_MS;

/// The overnight gap between the last qualifying event of one local day
/// and the first qualifying event of the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FastingWindow {
    /// Timestamp of the last qualifying event before the window.
    pub start_ms: i64,
    /// Timestamp of the first qualifying event after the window.
    pub end_ms: i64,
    /// `end_ms - start_ms`.
    pub duration_ms: i64,
    /// Human-readable duration, e.g. `"16h"`.
    pub duration_label: String,
    /// Whether the window meets the fixed 16h threshold.
    pub is_intermittent_fasting: bool,
}

/// Live progress of an in-flight fast against a configurable goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FastingStatus {
    /// Whether a fast is currently in progress.
    pub is_fasting: bool,
    /// Time since the last fast-breaking event, in milliseconds.
    pub fast_duration_ms: i64,
    /// Remaining time until the goal, zero once reached.
    pub time_to_goal_ms: i64,
    /// Whether the goal duration has elapsed.
    pub goal_reached: bool,
    /// Progress toward the goal, rounded, capped at 100.
    pub progress_percent: u8,
}

impl FastingStatus {
    /// The status when no qualifying event exists: not fasting, all zeros.
    #[must_use]
    pub const fn not_fasting() -> Self {
        Self {
            is_fasting: false,
            fast_duration_ms: 0,
            time_to_goal_ms: 0,
            goal_reached: false,
            progress_percent: 0,
        }
    }
}

/// Computes the overnight fasting window from two boundary events.
///
/// `last_prior` is the last qualifying event of the previous local day and
/// `first_today` the first qualifying event of this one. Returns `None`
/// when either side is missing, when the gap is non-positive, or when it
/// exceeds [`MAX_WINDOW_MS`]. A missing window is a normal state, not an
/// error.
#[must_use]
pub fn calculate_fasting_window(
    last_prior: Option<&MealEvent>,
    first_today: Option<&MealEvent>,
) -> Option<FastingWindow> {
    let last_prior = last_prior?;
    let first_today = first_today?;

    let duration_ms = first_today.timestamp_ms - last_prior.timestamp_ms;
    if duration_ms <= 0 || duration_ms > MAX_WINDOW_MS {
        tracing::debug!(duration_ms, "discarding unreliable fasting window");
        return None;
    }

    Some(FastingWindow {
        start_ms: last_prior.timestamp_ms,
        end_ms: first_today.timestamp_ms,
        duration_ms,
        duration_label: format_duration_long(duration_ms),
        is_intermittent_fasting: duration_ms >= INTERMITTENT_FASTING_MS,
    })
}

/// Computes live fasting progress against a configurable goal.
///
/// `last_qualifying` is the most recent fast-breaking event, `goal_hours`
/// the user's goal (validated to 8..=24 by the settings store), and
/// `now_ms` the current time. With no qualifying event the caller gets
/// [`FastingStatus::not_fasting`].
#[must_use]
pub fn current_fasting_status(
    last_qualifying: Option<&MealEvent>,
    goal_hours: i64,
    now_ms: i64,
) -> FastingStatus {
    let Some(last) = last_qualifying else {
        return FastingStatus::not_fasting();
    };

    let goal_ms = goal_hours * HOUR_MS;
    let fast_duration_ms = (now_ms - last.timestamp_ms).max(0);
    let goal_reached = fast_duration_ms >= goal_ms;
    let time_to_goal_ms = (goal_ms - fast_duration_ms).max(0);

    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "percentage is clamped to 0..=100 before conversion"
    )]
    let progress_percent = {
        let percent = (fast_duration_ms as f64 / goal_ms as f64 * 100.0).min(100.0);
        percent.round() as u8
    };

    FastingStatus {
        is_fasting: true,
        fast_duration_ms,
        time_to_goal_ms,
        goal_reached,
        progress_percent,
    }
}
