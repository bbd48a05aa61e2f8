//! Report command for multi-day pattern analysis.

use std::io::Write;

use anyhow::Result;

use ft_core::{DailyAggregator, DayId, PatternReport, analyze_patterns, format_duration, local_date};
use ft_db::Database;

pub fn run<W: Write>(writer: &mut W, db: &Database, days: u32, json: bool) -> Result<()> {
    let today = local_date::today_id();
    run_ending_at(writer, db, &today, days, json)
}

/// Analyzes the `days` trailing days ending at `last_day` inclusive.
pub fn run_ending_at<W: Write>(
    writer: &mut W,
    db: &Database,
    last_day: &DayId,
    days: u32,
    json: bool,
) -> Result<()> {
    let aggregator = DailyAggregator::new(db);

    // Independent day aggregations, joined before the report is computed.
    let mut summaries = Vec::with_capacity(usize::try_from(days).unwrap_or_default());
    for offset in (0..i64::from(days)).rev() {
        let day = local_date::offset_id(last_day, -offset);
        summaries.push(aggregator.daily_summary(&day)?);
    }
    let report = analyze_patterns(&summaries);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }
    render(writer, &report, days)?;
    Ok(())
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "millisecond averages fit i64 exactly for realistic windows"
)]
fn render<W: Write>(writer: &mut W, report: &PatternReport, days: u32) -> Result<()> {
    writeln!(writer, "Pattern over the last {days} days")?;
    writeln!(
        writer,
        "Average eating window: {}",
        format_duration(report.average_eating_window_ms as i64)
    )?;
    writeln!(
        writer,
        "Average meals per day: {:.1}",
        report.average_meals_per_day
    )?;
    writeln!(
        writer,
        "Average overnight fast: {:.1}h",
        report.average_fasting_hours
    )?;
    writeln!(
        writer,
        "Intermittent fasting: {} days ({:.0}%)",
        report.intermittent_fasting_days, report.intermittent_fasting_percent
    )?;
    writeln!(writer, "Consistency score: {:.0}/100", report.consistency_score)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ft_core::{MealCategory, NewMealEvent};

    use chrono::{Local, TimeZone};

    /// Builds a local wall-clock timestamp so the test holds in any timezone.
    fn local_ms(day: u32, hour: u32, minute: u32) -> i64 {
        Local
            .with_ymd_and_hms(2025, 3, day, hour, minute, 0)
            .unwrap()
            .timestamp_millis()
    }

    #[test]
    fn report_over_logged_days_counts_fasting_windows() {
        let mut db = Database::open_in_memory().unwrap();
        // Two days: breakfast at 10:30, dinner at 18:00 local. The second
        // morning sits 16.5h after the first dinner.
        for day in [14, 15] {
            db.insert_event(&NewMealEvent {
                category: MealCategory::Fruit,
                timestamp_ms: local_ms(day, 10, 30),
                notes: None,
            })
            .unwrap();
            db.insert_event(&NewMealEvent {
                category: MealCategory::HeavyMeal,
                timestamp_ms: local_ms(day, 18, 0),
                notes: None,
            })
            .unwrap();
        }

        let last_day = DayId::new("2025-03-15").unwrap();
        let mut output = Vec::new();
        run_ending_at(&mut output, &db, &last_day, 2, true).unwrap();

        let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(report["intermittent_fasting_days"].as_u64().unwrap(), 1);
        assert!((report["average_meals_per_day"].as_f64().unwrap() - 2.0).abs() < 1e-9);
        assert!((report["average_fasting_hours"].as_f64().unwrap() - 16.5).abs() < 1e-9);
    }

    #[test]
    fn report_over_empty_database_renders_zeros() {
        let db = Database::open_in_memory().unwrap();
        let last_day = DayId::new("2025-03-14").unwrap();
        let mut output = Vec::new();
        run_ending_at(&mut output, &db, &last_day, 7, false).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Pattern over the last 7 days"));
        assert!(output.contains("Average meals per day: 0.0"));
        assert!(output.contains("Intermittent fasting: 0 days (0%)"));
    }
}
