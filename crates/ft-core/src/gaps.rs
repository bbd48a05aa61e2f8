//! Gap derivation between temporally adjacent intake events.

use serde::Serialize;

use crate::duration::format_duration;
use crate::event::MealEvent;

/// Elapsed time between two adjacent events. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeGap {
    /// Timestamp of the earlier event, in epoch milliseconds.
    pub start_ms: i64,
    /// Timestamp of the later event, in epoch milliseconds.
    pub end_ms: i64,
    /// `end_ms - start_ms`.
    pub duration_ms: i64,
    /// Human-readable duration, e.g. `"2h 5m"`.
    pub duration_label: String,
}

/// Derives the ordered gaps between adjacent events.
///
/// The input may be unsorted; a copy is sorted ascending by timestamp
/// first. Fewer than two events yield no gaps; otherwise `n` events yield
/// `n - 1` gaps whose durations sum to `last - first`. Pure and total.
#[must_use]
pub fn calculate_gaps(events: &[MealEvent]) -> Vec<TimeGap> {
    if events.len() < 2 {
        return Vec::new();
    }
    let mut timestamps: Vec<i64> = events.iter().map(|event| event.timestamp_ms).collect();
    timestamps.sort_unstable();

    timestamps
        .windows(2)
        .map(|pair| {
            let duration_ms = pair[1] - pair[0];
            TimeGap {
                start_ms: pair[0],
                end_ms: pair[1],
                duration_ms,
                duration_label: format_duration(duration_ms),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::MealCategory;
    use crate::duration::{HOUR_MS, MINUTE_MS};
    use crate::types::EventId;

    fn event(id: &str, timestamp_ms: i64) -> MealEvent {
        MealEvent {
            id: EventId::new(id).unwrap(),
            category: MealCategory::LightMeal,
            timestamp_ms,
            notes: None,
            created_at_ms: timestamp_ms,
            updated_at_ms: timestamp_ms,
        }
    }

    #[test]
    fn fewer_than_two_events_yield_no_gaps() {
        assert!(calculate_gaps(&[]).is_empty());
        assert!(calculate_gaps(&[event("a", 1_000)]).is_empty());
    }

    #[test]
    fn unsorted_input_is_sorted_before_pairing() {
        let events = vec![
            event("c", 10 * HOUR_MS),
            event("a", 2 * HOUR_MS),
            event("b", 5 * HOUR_MS),
        ];
        let gaps = calculate_gaps(&events);
        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps[0].start_ms, 2 * HOUR_MS);
        assert_eq!(gaps[0].end_ms, 5 * HOUR_MS);
        assert_eq!(gaps[1].start_ms, 5 * HOUR_MS);
        assert_eq!(gaps[1].end_ms, 10 * HOUR_MS);
    }

    #[test]
    fn gap_durations_sum_to_total_span() {
        let timestamps = [3 * HOUR_MS, HOUR_MS, 7 * HOUR_MS + 23 * MINUTE_MS, 2 * HOUR_MS];
        let events: Vec<MealEvent> = timestamps
            .iter()
            .enumerate()
            .map(|(i, &ts)| event(&format!("e{i}"), ts))
            .collect();

        let gaps = calculate_gaps(&events);
        assert_eq!(gaps.len(), events.len() - 1);

        let sum: i64 = gaps.iter().map(|gap| gap.duration_ms).sum();
        let min = timestamps.iter().min().unwrap();
        let max = timestamps.iter().max().unwrap();
        assert_eq!(sum, max - min);
    }

    #[test]
    fn gaps_carry_formatted_durations() {
        let events = vec![event("a", 0), event("b", 125 * MINUTE_MS)];
        let gaps = calculate_gaps(&events);
        assert_eq!(gaps[0].duration_label, "2h 5m");
    }

    #[test]
    fn simultaneous_events_produce_zero_gap() {
        let events = vec![event("a", HOUR_MS), event("b", HOUR_MS)];
        let gaps = calculate_gaps(&events);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].duration_ms, 0);
        assert_eq!(gaps[0].duration_label, "0m");
    }
}
