//! Remove command for deleting a logged event.

use std::io::Write;

use anyhow::Result;

use ft_core::EventId;
use ft_db::{Database, DbError};

pub fn run<W: Write>(writer: &mut W, db: &mut Database, id: &str) -> Result<()> {
    let id = EventId::new(id)?;
    match db.delete_event(&id) {
        Ok(()) => {
            writeln!(writer, "Removed {id}")?;
            Ok(())
        }
        // Deleting something already gone is not worth a failure exit.
        Err(DbError::NotFound { .. }) => {
            writeln!(writer, "Event {id} was already removed")?;
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ft_core::{MealCategory, NewMealEvent};

    #[test]
    fn remove_deletes_the_event() {
        let mut db = Database::open_in_memory().unwrap();
        let event = db
            .insert_event(&NewMealEvent {
                category: MealCategory::Drink,
                timestamp_ms: 1_000,
                notes: None,
            })
            .unwrap();

        let mut output = Vec::new();
        run(&mut output, &mut db, event.id.as_str()).unwrap();
        assert!(db.event(&event.id).unwrap().is_none());
    }

    #[test]
    fn removing_twice_reports_already_removed() {
        let mut db = Database::open_in_memory().unwrap();
        let event = db
            .insert_event(&NewMealEvent {
                category: MealCategory::Drink,
                timestamp_ms: 1_000,
                notes: None,
            })
            .unwrap();

        let mut output = Vec::new();
        run(&mut output, &mut db, event.id.as_str()).unwrap();
        run(&mut output, &mut db, event.id.as_str()).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("already removed"));
    }
}
