//! Conversions between timestamps and local calendar-day identifiers.
//!
//! Every "which day does this event belong to" question in the engine goes
//! through this module. Day boundaries are computed from the timezone's
//! own calendar fields, never from a UTC conversion: a UTC-based boundary
//! silently misclassifies events near midnight in non-UTC timezones.
//!
//! The functions are generic over [`chrono::TimeZone`] so tests can pin a
//! [`chrono::FixedOffset`]; the `Local`-bound conveniences are what
//! production callers use.

use chrono::{DateTime, Duration, Local, LocalResult, NaiveTime, TimeZone, Utc};

use crate::types::DayId;

/// Converts an epoch-millisecond timestamp to a day ID in the given timezone.
pub fn date_id_in<Tz: TimeZone>(tz: &Tz, timestamp_ms: i64) -> DayId {
    let utc = utc_from_ms(timestamp_ms);
    DayId::from(utc.with_timezone(tz).date_naive())
}

/// Converts a timestamp to a day ID in the device's local timezone.
#[must_use]
pub fn date_id(timestamp_ms: i64) -> DayId {
    date_id_in(&Local, timestamp_ms)
}

/// Returns the current local day's ID.
#[must_use]
pub fn today_id() -> DayId {
    DayId::from(Local::now().date_naive())
}

/// Shifts a day ID by a number of calendar days.
///
/// Saturates at the calendar's representable bounds.
#[must_use]
pub fn offset_id(day: &DayId, delta_days: i64) -> DayId {
    day.to_naive_date()
        .checked_add_signed(Duration::days(delta_days))
        .map_or_else(|| day.clone(), DayId::from)
}

/// Returns the inclusive timestamp bounds of a day in the given timezone.
///
/// The range spans local midnight to the instant before the next local
/// midnight, so DST transition days keep their full 23h or 25h extent.
pub fn day_bounds_in<Tz: TimeZone>(tz: &Tz, day: &DayId) -> (i64, i64) {
    let date = day.to_naive_date();
    let start = midnight_in(tz, date);
    let end = midnight_in(tz, date + Duration::days(1));
    (start.timestamp_millis(), end.timestamp_millis() - 1)
}

/// Returns the inclusive timestamp bounds of a local day.
#[must_use]
pub fn day_bounds(day: &DayId) -> (i64, i64) {
    day_bounds_in(&Local, day)
}

/// Resolves midnight of a calendar date to an instant in the given timezone.
/// Handles DST ambiguity by picking the earlier time.
fn midnight_in<Tz: TimeZone>(tz: &Tz, date: chrono::NaiveDate) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        // Single or ambiguous (DST fall-back): use the earlier time
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => {
            // DST spring-forward gap at midnight is rare but possible.
            // Use 1am local which is guaranteed to exist.
            let one_am = date.and_time(NaiveTime::from_hms_opt(1, 0, 0).unwrap_or(NaiveTime::MIN));
            match tz.from_local_datetime(&one_am) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
                LocalResult::None => tz.from_utc_datetime(&midnight),
            }
        }
    }
}

/// Converts epoch milliseconds to a UTC instant, saturating out-of-range
/// input at the representable bounds.
fn utc_from_ms(timestamp_ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(timestamp_ms).unwrap_or_else(|| {
        if timestamp_ms < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn tz_east(hours: i32) -> FixedOffset {
        FixedOffset::east_opt(hours * 3600).unwrap()
    }

    fn tz_west(hours: i32) -> FixedOffset {
        FixedOffset::west_opt(hours * 3600).unwrap()
    }

    #[test]
    fn date_id_uses_the_given_timezone_not_utc() {
        // 2025-03-14T22:00:00Z is already March 15 at UTC+5:30.
        let ts = Utc
            .with_ymd_and_hms(2025, 3, 14, 22, 0, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(date_id_in(&tz_east(5), ts).as_str(), "2025-03-15");
        assert_eq!(date_id_in(&Utc, ts).as_str(), "2025-03-14");
        // At UTC-8 the same instant is still March 14.
        assert_eq!(date_id_in(&tz_west(8), ts).as_str(), "2025-03-14");
    }

    #[test]
    fn day_bounds_span_midnight_to_last_millisecond() {
        let day = DayId::new("2025-03-14").unwrap();
        let (start, end) = day_bounds_in(&Utc, &day);
        assert_eq!(end - start, 24 * 60 * 60 * 1000 - 1);
        assert_eq!(
            start,
            Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 0)
                .unwrap()
                .timestamp_millis()
        );
    }

    #[test]
    fn events_straddling_local_midnight_land_on_different_days() {
        // Regression test against UTC-based day boundaries: one event at
        // local 23:59:59.999 and one at local 00:00:00.000 the next minute
        // must fall on different days even under a non-zero UTC offset.
        for tz in [tz_east(5), tz_west(8), tz_east(9)] {
            let before_midnight = tz
                .with_ymd_and_hms(2025, 3, 14, 23, 59, 59)
                .unwrap()
                .timestamp_millis()
                + 999;
            let after_midnight = before_midnight + 1;

            let day_before = date_id_in(&tz, before_midnight);
            let day_after = date_id_in(&tz, after_midnight);
            assert_eq!(day_before.as_str(), "2025-03-14", "offset {tz}");
            assert_eq!(day_after.as_str(), "2025-03-15", "offset {tz}");

            let (start, end) = day_bounds_in(&tz, &day_before);
            assert!(before_midnight >= start && before_midnight <= end);
            assert!(after_midnight > end);
        }
    }

    #[test]
    fn bounds_and_date_id_agree() {
        // Every timestamp inside a day's bounds resolves back to that day.
        let tz = tz_west(8);
        let day = DayId::new("2025-06-01").unwrap();
        let (start, end) = day_bounds_in(&tz, &day);
        for ts in [start, start + 1, (start + end) / 2, end - 1, end] {
            assert_eq!(date_id_in(&tz, ts), day);
        }
        assert_ne!(date_id_in(&tz, start - 1), day);
        assert_ne!(date_id_in(&tz, end + 1), day);
    }

    #[test]
    fn offset_id_shifts_across_month_and_year_boundaries() {
        let day = DayId::new("2025-01-01").unwrap();
        assert_eq!(offset_id(&day, -1).as_str(), "2024-12-31");
        assert_eq!(offset_id(&day, 31).as_str(), "2025-02-01");
        assert_eq!(offset_id(&day, 0), day);
    }

    #[test]
    fn today_id_matches_local_clock() {
        assert_eq!(today_id(), DayId::from(Local::now().date_naive()));
    }
}
