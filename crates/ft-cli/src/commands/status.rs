//! Status command for live fasting progress.

use std::io::Write;

use anyhow::Result;
use chrono::Utc;

use ft_core::{DailyAggregator, FastingStatus, format_duration};
use ft_db::Database;

pub fn run<W: Write>(writer: &mut W, db: &Database) -> Result<()> {
    let goal_hours = db.fasting_goal_hours()?;
    let aggregator = DailyAggregator::new(db);
    let status = aggregator.current_status(goal_hours, Utc::now().timestamp_millis())?;
    render(writer, &status, goal_hours)?;
    Ok(())
}

fn render<W: Write>(writer: &mut W, status: &FastingStatus, goal_hours: i64) -> Result<()> {
    if !status.is_fasting {
        writeln!(writer, "Not fasting: no recent intake logged.")?;
        return Ok(());
    }

    writeln!(
        writer,
        "Fasting for {} ({}% of the {goal_hours}h goal)",
        format_duration(status.fast_duration_ms),
        status.progress_percent
    )?;
    if status.goal_reached {
        writeln!(writer, "Goal reached.")?;
    } else {
        writeln!(
            writer,
            "{} to go.",
            format_duration(status.time_to_goal_ms)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn empty_database_is_not_fasting() {
        let db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();
        run(&mut output, &db).unwrap();
        assert_snapshot!(String::from_utf8(output).unwrap(), @"Not fasting: no recent intake logged.");
    }

    #[test]
    fn render_shows_progress_and_remaining_time() {
        let status = FastingStatus {
            is_fasting: true,
            fast_duration_ms: 8 * 3_600_000,
            time_to_goal_ms: 8 * 3_600_000,
            goal_reached: false,
            progress_percent: 50,
        };
        let mut output = Vec::new();
        render(&mut output, &status, 16).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Fasting for 8h (50% of the 16h goal)"));
        assert!(output.contains("8h to go."));
    }

    #[test]
    fn render_announces_goal_reached() {
        let status = FastingStatus {
            is_fasting: true,
            fast_duration_ms: 17 * 3_600_000,
            time_to_goal_ms: 0,
            goal_reached: true,
            progress_percent: 100,
        };
        let mut output = Vec::new();
        render(&mut output, &status, 16).unwrap();
        assert!(String::from_utf8(output).unwrap().contains("Goal reached."));
    }
}
