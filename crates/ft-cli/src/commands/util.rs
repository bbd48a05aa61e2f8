//! Shared parsing and formatting helpers for subcommands.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Local};

use ft_core::MealCategory;

/// Parses a category argument, listing the valid values on failure.
pub(crate) fn parse_category(s: &str) -> Result<MealCategory> {
    s.parse().map_err(|_| {
        let valid: Vec<&str> = MealCategory::ALL.iter().map(MealCategory::as_str).collect();
        anyhow!("unknown category '{s}' (expected one of: {})", valid.join(", "))
    })
}

/// Parses an RFC 3339 timestamp argument into epoch milliseconds.
pub(crate) fn parse_timestamp(s: &str) -> Result<i64> {
    let parsed = DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("invalid timestamp '{s}' (expected RFC 3339)"))?;
    Ok(parsed.timestamp_millis())
}

/// Formats a timestamp as a local wall-clock time, `HH:MM`.
pub(crate) fn local_clock(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms).map_or_else(
        || "??:??".to_string(),
        |utc| utc.with_timezone(&Local).format("%H:%M").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parse_gives_helpful_error() {
        assert!(parse_category("fruit").is_ok());
        let err = parse_category("pizza").unwrap_err().to_string();
        assert!(err.contains("pizza"));
        assert!(err.contains("heavy_meal"));
    }

    #[test]
    fn timestamp_parse_handles_offsets() {
        let ms = parse_timestamp("2025-03-14T12:00:00+00:00").unwrap();
        assert_eq!(ms, 1_741_953_600_000);
        assert!(parse_timestamp("yesterday").is_err());
    }
}
