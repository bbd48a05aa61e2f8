//! Cross-day eating and fasting pattern statistics.

use serde::Serialize;

use crate::aggregate::DailySummary;
use crate::duration::HOUR_MS;

/// Multi-day statistics over a run of daily summaries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternReport {
    /// Mean first-to-last intake span over days with at least two entries.
    pub average_eating_window_ms: f64,
    /// Mean entry count across all supplied days.
    pub average_meals_per_day: f64,
    /// Mean fasting-window duration, in hours, over days that have one.
    pub average_fasting_hours: f64,
    /// Days whose fasting window met the intermittent threshold.
    pub intermittent_fasting_days: usize,
    /// Share of supplied days that met the threshold, in percent.
    pub intermittent_fasting_percent: f64,
    /// Bounded regularity heuristic in 0..=100.
    ///
    /// `max(0, 100 - variance(daily meal counts) * 20)`. A rough gauge of
    /// how even the user's meal count is from day to day, not a calibrated
    /// statistical metric.
    pub consistency_score: f64,
}

impl PatternReport {
    const fn empty() -> Self {
        Self {
            average_eating_window_ms: 0.0,
            average_meals_per_day: 0.0,
            average_fasting_hours: 0.0,
            intermittent_fasting_days: 0,
            intermittent_fasting_percent: 0.0,
            consistency_score: 100.0,
        }
    }
}

/// Analyzes a run of daily summaries into a pattern report.
///
/// Accepts zero or more days; per-metric denominators only count the days
/// that qualify for that metric (days with ≥2 entries for the eating
/// window, days with a fasting window for the fasting average).
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,
    reason = "day counts and durations are far below f64 integer precision"
)]
pub fn analyze_patterns(summaries: &[DailySummary]) -> PatternReport {
    if summaries.is_empty() {
        return PatternReport::empty();
    }
    let total_days = summaries.len() as f64;

    let eating_windows: Vec<i64> = summaries
        .iter()
        .filter(|summary| summary.total_entries >= 2)
        .filter_map(|summary| {
            match (summary.first_intake_ms, summary.last_intake_ms) {
                (Some(first), Some(last)) => Some(last - first),
                _ => None,
            }
        })
        .collect();
    let average_eating_window_ms = mean(&eating_windows);

    let meal_counts: Vec<i64> = summaries
        .iter()
        .map(|summary| summary.total_entries as i64)
        .collect();
    let average_meals_per_day = mean(&meal_counts);

    let fasting_durations: Vec<i64> = summaries
        .iter()
        .filter_map(|summary| summary.fasting_window.as_ref())
        .map(|window| window.duration_ms)
        .collect();
    let average_fasting_hours = mean(&fasting_durations) / HOUR_MS as f64;

    let intermittent_fasting_days = summaries
        .iter()
        .filter_map(|summary| summary.fasting_window.as_ref())
        .filter(|window| window.is_intermittent_fasting)
        .count();
    let intermittent_fasting_percent = intermittent_fasting_days as f64 / total_days * 100.0;

    let consistency_score = (100.0 - variance(&meal_counts) * 20.0).max(0.0);

    PatternReport {
        average_eating_window_ms,
        average_meals_per_day,
        average_fasting_hours,
        intermittent_fasting_days,
        intermittent_fasting_percent,
        consistency_score,
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "values are far below f64 integer precision"
)]
fn mean(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<i64>() as f64 / values.len() as f64
}

/// Population variance.
#[expect(
    clippy::cast_precision_loss,
    reason = "values are far below f64 integer precision"
)]
fn variance(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = mean(values);
    values
        .iter()
        .map(|&value| {
            let delta = value as f64 - mean;
            delta * delta
        })
        .sum::<f64>()
        / values.len() as f64
}
