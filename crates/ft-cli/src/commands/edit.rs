//! Edit command for amending a logged event.

use std::io::Write;

use anyhow::{Result, bail};

use ft_core::{EventId, MealEventPatch};
use ft_db::{Database, DbError};

use super::util::{parse_category, parse_timestamp};

pub fn run<W: Write>(
    writer: &mut W,
    db: &mut Database,
    id: &str,
    category: Option<&str>,
    at: Option<&str>,
    notes: Option<String>,
) -> Result<()> {
    let id = EventId::new(id)?;
    let patch = MealEventPatch {
        category: category.map(parse_category).transpose()?,
        timestamp_ms: at.map(parse_timestamp).transpose()?,
        // An empty string on the command line clears the note.
        notes: notes.map(|note| if note.is_empty() { None } else { Some(note) }),
    };
    if patch.is_empty() {
        bail!("nothing to change; pass --category, --at, or --notes");
    }

    match db.update_event(&id, &patch) {
        Ok(()) => {
            writeln!(writer, "Updated {id}")?;
            Ok(())
        }
        Err(DbError::NotFound { .. }) => bail!("no event with id {id}; it may have been removed"),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ft_core::{MealCategory, NewMealEvent};

    #[test]
    fn edit_changes_only_requested_fields() {
        let mut db = Database::open_in_memory().unwrap();
        let event = db
            .insert_event(&NewMealEvent {
                category: MealCategory::LightMeal,
                timestamp_ms: 1_000,
                notes: Some("toast".to_string()),
            })
            .unwrap();

        let mut output = Vec::new();
        run(
            &mut output,
            &mut db,
            event.id.as_str(),
            Some("heavy"),
            None,
            None,
        )
        .unwrap();

        let updated = db.event(&event.id).unwrap().unwrap();
        assert_eq!(updated.category, MealCategory::HeavyMeal);
        assert_eq!(updated.timestamp_ms, 1_000);
        assert_eq!(updated.notes.as_deref(), Some("toast"));
    }

    #[test]
    fn edit_with_no_fields_is_an_error() {
        let mut db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();
        let result = run(&mut output, &mut db, "some-id", None, None, None);
        assert!(result.is_err());
    }

    #[test]
    fn edit_missing_event_explains_itself() {
        let mut db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();
        let err = run(&mut output, &mut db, "ghost", Some("fruit"), None, None)
            .unwrap_err()
            .to_string();
        assert!(err.contains("ghost"));
        assert!(err.contains("removed"));
    }
}
