//! Human-readable duration formatting and parsing.

/// Milliseconds in one minute.
pub const MINUTE_MS: i64 = 60_000;
/// Milliseconds in one hour.
pub const HOUR_MS: i64 = 60 * MINUTE_MS;
/// Milliseconds in one day.
pub const DAY_MS: i64 = 24 * HOUR_MS;

/// Formats milliseconds as a duration string.
///
/// Returns `"Xh Ym"` when both components are non-zero, `"Xh"` when the
/// minutes are zero, and `"Xm"` when under an hour. Durations truncate to
/// whole minutes; negative input clamps to `"0m"`.
#[must_use]
pub fn format_duration(ms: i64) -> String {
    if ms < 0 {
        return "0m".to_string();
    }
    let total_minutes = ms / MINUTE_MS;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours == 0 {
        format!("{minutes}m")
    } else if minutes == 0 {
        format!("{hours}h")
    } else {
        format!("{hours}h {minutes}m")
    }
}

/// Formats milliseconds as a duration string, breaking out whole days.
///
/// Intended for durations that may exceed 24h. Leading zero components are
/// omitted: `"1d 2h 5m"`, `"1d 5m"`, `"2h"`, `"0m"`.
#[must_use]
pub fn format_duration_long(ms: i64) -> String {
    if ms < DAY_MS {
        return format_duration(ms);
    }
    let days = ms / DAY_MS;
    let rest = ms % DAY_MS;
    let hours = rest / HOUR_MS;
    let minutes = (rest % HOUR_MS) / MINUTE_MS;

    let mut out = format!("{days}d");
    if hours > 0 {
        out.push_str(&format!(" {hours}h"));
    }
    if minutes > 0 {
        out.push_str(&format!(" {minutes}m"));
    }
    out
}

/// Parses a duration string back into milliseconds.
///
/// Extracts an optional `"{n}h"` token and an optional `"{n}m"` token, in
/// either order, either absent. Unrecognized text contributes nothing.
/// `parse_duration(&format_duration(x))` recovers `x` to within one minute
/// for non-negative `x` under 24h.
#[must_use]
pub fn parse_duration(s: &str) -> i64 {
    let mut total = 0;
    for token in s.split_whitespace() {
        if let Some(hours) = token.strip_suffix('h') {
            if let Ok(hours) = hours.parse::<i64>() {
                total += hours * HOUR_MS;
            }
        } else if let Some(minutes) = token.strip_suffix('m') {
            if let Ok(minutes) = minutes.parse::<i64>() {
                total += minutes * MINUTE_MS;
            }
        }
    }
    total
}
