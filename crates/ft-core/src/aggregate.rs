//! Per-day aggregation over an injected event store.
//!
//! The aggregator owns nothing but a store handle, a fasting policy, and a
//! timezone. It is constructed explicitly by the host and injected where
//! needed; there is no global store instance. Tests run it against an
//! in-memory fake store.

use chrono::{Local, TimeZone};
use serde::Serialize;
use thiserror::Error;

use crate::category::FastingPolicy;
use crate::event::MealEvent;
use crate::fasting::{self, FastingStatus, FastingWindow};
use crate::gaps::{TimeGap, calculate_gaps};
use crate::local_date::{day_bounds_in, offset_id};
use crate::types::DayId;

/// A query or write failure from the event store.
///
/// Propagated to the caller so the user can be informed and retry; never
/// used for "no data yet" states, which are modeled as `Option`/empty.
#[derive(Debug, Error)]
#[error("event store failure: {message}")]
pub struct StorageError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Creates a storage error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a storage error wrapping an underlying cause.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// The event-store operations the engine consumes.
///
/// Implementations are expected to return events ascending by timestamp.
/// The engine takes shared borrows only and assumes a single writer; it
/// performs no locking of its own.
pub trait EventStore {
    /// Returns events with `timestamp_ms` in `start_ms..=end_ms`, ascending.
    fn events_in_range(&self, start_ms: i64, end_ms: i64) -> Result<Vec<MealEvent>, StorageError>;
}

impl<S: EventStore + ?Sized> EventStore for &S {
    fn events_in_range(&self, start_ms: i64, end_ms: i64) -> Result<Vec<MealEvent>, StorageError> {
        (**self).events_in_range(start_ms, end_ms)
    }
}

/// Everything derived for one local calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    /// The local day this summary covers.
    pub day: DayId,
    /// The day's events, ascending by timestamp.
    pub entries: Vec<MealEvent>,
    /// `entries.len()`.
    pub total_entries: usize,
    /// Timestamp of the first entry, present iff the day is non-empty.
    pub first_intake_ms: Option<i64>,
    /// Timestamp of the last entry, present iff the day is non-empty.
    pub last_intake_ms: Option<i64>,
    /// Gaps between adjacent entries; `max(0, entries - 1)` of them.
    pub gaps: Vec<TimeGap>,
    /// The overnight window against the previous local day, when reliable.
    pub fasting_window: Option<FastingWindow>,
}

impl DailySummary {
    fn empty(day: DayId) -> Self {
        Self {
            day,
            entries: Vec::new(),
            total_entries: 0,
            first_intake_ms: None,
            last_intake_ms: None,
            gaps: Vec::new(),
            fasting_window: None,
        }
    }
}

/// Aggregate statistics over one day's gaps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyStats {
    /// The shortest gap, first occurrence on ties. `None` when no gaps.
    pub shortest_gap: Option<TimeGap>,
    /// The longest gap, first occurrence on ties. `None` when no gaps.
    pub longest_gap: Option<TimeGap>,
    /// Arithmetic mean of gap durations, 0 when there are none.
    pub average_gap_ms: f64,
    /// Number of gaps.
    pub total_gaps: usize,
    /// 1 when the day's fasting window met the intermittent threshold.
    pub fasting_streak: u32,
    /// Number of intake events logged that day.
    pub total_intake_today: usize,
}

/// Computes daily summaries and stats against an injected store.
#[derive(Debug)]
pub struct DailyAggregator<S, Tz = Local> {
    store: S,
    policy: FastingPolicy,
    tz: Tz,
}

impl<S: EventStore> DailyAggregator<S> {
    /// Creates an aggregator over the device's local timezone with the
    /// default fasting policy.
    pub fn new(store: S) -> Self {
        Self::with_timezone(store, FastingPolicy::default(), Local)
    }
}

impl<S: EventStore, Tz: TimeZone> DailyAggregator<S, Tz> {
    /// Creates an aggregator with an explicit policy and timezone.
    pub const fn with_timezone(store: S, policy: FastingPolicy, tz: Tz) -> Self {
        Self { store, policy, tz }
    }

    /// Assembles the full summary for one local day.
    ///
    /// An empty day is a normal state and yields the zeroed summary; only
    /// store failures are errors.
    pub fn daily_summary(&self, day: &DayId) -> Result<DailySummary, StorageError> {
        let (start_ms, end_ms) = day_bounds_in(&self.tz, day);
        let mut entries = self.store.events_in_range(start_ms, end_ms)?;
        if entries.is_empty() {
            tracing::debug!(%day, "no entries for day");
            return Ok(DailySummary::empty(day.clone()));
        }
        entries.sort_by(|a, b| {
            a.timestamp_ms
                .cmp(&b.timestamp_ms)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });

        let gaps = calculate_gaps(&entries);
        let fasting_window = self.overnight_window(day, &entries)?;

        Ok(DailySummary {
            first_intake_ms: entries.first().map(|event| event.timestamp_ms),
            last_intake_ms: entries.last().map(|event| event.timestamp_ms),
            total_entries: entries.len(),
            day: day.clone(),
            entries,
            gaps,
            fasting_window,
        })
    }

    /// Computes stats over one summary's gaps.
    pub fn daily_stats(&self, summary: &DailySummary) -> DailyStats {
        let mut shortest: Option<&TimeGap> = None;
        let mut longest: Option<&TimeGap> = None;
        for gap in &summary.gaps {
            if shortest.is_none_or(|current| gap.duration_ms < current.duration_ms) {
                shortest = Some(gap);
            }
            if longest.is_none_or(|current| gap.duration_ms > current.duration_ms) {
                longest = Some(gap);
            }
        }

        #[expect(
            clippy::cast_precision_loss,
            reason = "gap durations are far below f64 integer precision"
        )]
        let average_gap_ms = if summary.gaps.is_empty() {
            0.0
        } else {
            let sum: i64 = summary.gaps.iter().map(|gap| gap.duration_ms).sum();
            sum as f64 / summary.gaps.len() as f64
        };

        DailyStats {
            shortest_gap: shortest.cloned(),
            longest_gap: longest.cloned(),
            average_gap_ms,
            total_gaps: summary.gaps.len(),
            fasting_streak: u32::from(
                summary
                    .fasting_window
                    .as_ref()
                    .is_some_and(|window| window.is_intermittent_fasting),
            ),
            total_intake_today: summary.total_entries,
        }
    }

    /// Computes the live fasting status against the given goal.
    ///
    /// Anchored on the most recent fast-breaking event regardless of how
    /// long ago it was; a multi-day fast stays "fasting" with progress
    /// capped at 100%. Only with no qualifying event at all is the status
    /// "not fasting".
    pub fn current_status(
        &self,
        goal_hours: i64,
        now_ms: i64,
    ) -> Result<FastingStatus, StorageError> {
        let events = self.store.events_in_range(i64::MIN, now_ms)?;
        let last_qualifying = events
            .iter()
            .filter(|event| self.policy.breaks_fast(event.category))
            .max_by_key(|event| event.timestamp_ms);
        Ok(fasting::current_fasting_status(
            last_qualifying,
            goal_hours,
            now_ms,
        ))
    }

    /// Computes the overnight fasting window for a day whose (non-empty,
    /// sorted) entries are already at hand.
    fn overnight_window(
        &self,
        day: &DayId,
        entries: &[MealEvent],
    ) -> Result<Option<FastingWindow>, StorageError> {
        let prior_day = offset_id(day, -1);
        let (prior_start, prior_end) = day_bounds_in(&self.tz, &prior_day);
        // A prior day with no data is a normal case, not an error.
        let prior_entries = self.store.events_in_range(prior_start, prior_end)?;

        let last_prior = prior_entries
            .iter()
            .filter(|event| self.policy.breaks_fast(event.category))
            .max_by_key(|event| event.timestamp_ms);
        let first_today = entries
            .iter()
            .filter(|event| self.policy.breaks_fast(event.category))
            .min_by_key(|event| event.timestamp_ms);

        Ok(fasting::calculate_fasting_window(last_prior, first_today))
    }
}
