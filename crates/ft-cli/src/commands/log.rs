//! Log command for recording an intake event.

use std::io::Write;

use anyhow::Result;
use chrono::Utc;

use ft_core::NewMealEvent;
use ft_db::Database;

use super::util::{local_clock, parse_category, parse_timestamp};

pub fn run<W: Write>(
    writer: &mut W,
    db: &mut Database,
    category: &str,
    at: Option<&str>,
    notes: Option<String>,
) -> Result<()> {
    let category = parse_category(category)?;
    let timestamp_ms = match at {
        Some(s) => parse_timestamp(s)?,
        None => Utc::now().timestamp_millis(),
    };

    let event = db.insert_event(&NewMealEvent {
        category,
        timestamp_ms,
        notes,
    })?;

    writeln!(
        writer,
        "Logged {} at {} (id: {})",
        event.category,
        local_clock(event.timestamp_ms),
        event.id
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_writes_event_and_reports_id() {
        let mut db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();

        run(
            &mut output,
            &mut db,
            "fruit",
            Some("2025-03-14T09:00:00Z"),
            Some("apple".to_string()),
        )
        .unwrap();

        let events = db.events_in_range(0, i64::MAX).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].notes.as_deref(), Some("apple"));

        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("Logged fruit at "));
        assert!(output.contains(events[0].id.as_str()));
    }

    #[test]
    fn log_rejects_unknown_category() {
        let mut db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();
        let result = run(&mut output, &mut db, "pizza", None, None);
        assert!(result.is_err());
    }
}
