//! Day command for showing one local day's summary and stats.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use ft_core::{DailyAggregator, DailyStats, DailySummary, DayId, format_duration, local_date};
use ft_db::Database;

use super::util::local_clock;

/// Combined JSON payload for `ft day --json`.
#[derive(Debug, Serialize)]
struct DayReport<'a> {
    summary: &'a DailySummary,
    stats: &'a DailyStats,
}

pub fn run<W: Write>(writer: &mut W, db: &Database, date: Option<&str>, json: bool) -> Result<()> {
    let day = match date {
        Some(s) => DayId::new(s)?,
        None => local_date::today_id(),
    };

    let aggregator = DailyAggregator::new(db);
    let summary = aggregator.daily_summary(&day)?;
    let stats = aggregator.daily_stats(&summary);

    if json {
        let report = DayReport {
            summary: &summary,
            stats: &stats,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    render(writer, &summary, &stats)?;
    Ok(())
}

fn render<W: Write>(writer: &mut W, summary: &DailySummary, stats: &DailyStats) -> Result<()> {
    writeln!(writer, "Day {}", summary.day)?;

    if summary.entries.is_empty() {
        writeln!(writer, "No entries.")?;
        return Ok(());
    }

    writeln!(writer, "Entries: {}", summary.total_entries)?;
    for event in &summary.entries {
        let note = event
            .notes
            .as_deref()
            .map(|note| format!("  ({note})"))
            .unwrap_or_default();
        writeln!(
            writer,
            "- {}  {}{note}",
            local_clock(event.timestamp_ms),
            event.category
        )?;
    }

    if !summary.gaps.is_empty() {
        writeln!(writer, "Gaps:")?;
        for gap in &summary.gaps {
            writeln!(
                writer,
                "- {} -> {}  {}",
                local_clock(gap.start_ms),
                local_clock(gap.end_ms),
                gap.duration_label
            )?;
        }
        let shortest = stats
            .shortest_gap
            .as_ref()
            .map_or("-", |gap| gap.duration_label.as_str());
        let longest = stats
            .longest_gap
            .as_ref()
            .map_or("-", |gap| gap.duration_label.as_str());
        #[expect(
            clippy::cast_possible_truncation,
            reason = "millisecond averages fit i64 exactly for realistic gaps"
        )]
        let average = format_duration(stats.average_gap_ms as i64);
        writeln!(
            writer,
            "Shortest gap {shortest}, longest {longest}, average {average}"
        )?;
    }

    match &summary.fasting_window {
        Some(window) if window.is_intermittent_fasting => {
            writeln!(
                writer,
                "Overnight fast: {} (intermittent fasting)",
                window.duration_label
            )?;
        }
        Some(window) => {
            writeln!(writer, "Overnight fast: {}", window.duration_label)?;
        }
        None => writeln!(writer, "Overnight fast: no reliable window")?,
    }

    Ok(())
}
