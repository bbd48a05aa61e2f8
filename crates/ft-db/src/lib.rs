//! Storage layer for the intake tracker.
//!
//! Provides persistence for meal events and settings using `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! This means a `Database` instance can be moved between threads but cannot be shared
//! across threads without external synchronization. The engine assumes a single
//! writer; the host serializes user actions.
//!
//! # Schema
//!
//! Timestamps are stored as INTEGER epoch milliseconds. The event timestamp
//! is the only temporal anchor: no calendar-date column exists, so the local
//! day an event belongs to is always derived at query time and cannot drift
//! from the timestamp. Schema evolution is handled by [`migrations`], which
//! runs before any query on open.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;
use uuid::Uuid;

use ft_core::{
    EventId, EventStore, MealEvent, MealEventPatch, NewMealEvent, StorageError, ValidationError,
};

pub mod migrations;

pub use migrations::MigrationError;

/// Inclusive range of accepted fasting goals, in hours.
pub const FASTING_GOAL_HOURS: std::ops::RangeInclusive<i64> = 8..=24;

/// The goal used when the user has never set one.
pub const DEFAULT_FASTING_GOAL_HOURS: i64 = 16;

const FASTING_GOAL_KEY: &str = "fasting_goal_hours";

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Schema migration failed; the store is not ready.
    #[error(transparent)]
    Migration(#[from] MigrationError),
    /// The requested event does not exist.
    #[error("no event with id {id}")]
    NotFound { id: String },
    /// A stored row could not be interpreted.
    #[error("invalid stored data for event {event_id}: {message}")]
    InvalidEventData { event_id: String, message: String },
    /// A stored setting could not be interpreted.
    #[error("invalid setting {key}: {message}")]
    InvalidSetting { key: String, message: String },
    /// A domain validation failure, e.g. an out-of-range fasting goal.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// Migrations run before the handle is returned; a migration failure
    /// means the store never becomes ready.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let mut db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Ensures the on-disk schema matches the current event shape.
    ///
    /// Idempotent: each migration step introspects the live schema and
    /// no-ops when already applied, so calling this on an initialized
    /// store is cheap.
    pub fn initialize(&mut self) -> Result<(), DbError> {
        migrations::run(&mut self.conn)?;
        Ok(())
    }

    /// Inserts a new meal event, assigning its ID and bookkeeping stamps.
    pub fn insert_event(&mut self, new: &NewMealEvent) -> Result<MealEvent, DbError> {
        self.insert_event_at(new, chrono::Utc::now().timestamp_millis())
    }

    fn insert_event_at(&mut self, new: &NewMealEvent, now_ms: i64) -> Result<MealEvent, DbError> {
        let id = EventId::new(Uuid::new_v4().to_string())?;
        let event = MealEvent {
            id,
            category: new.category,
            timestamp_ms: new.timestamp_ms,
            notes: new.notes.clone(),
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
        };
        self.conn.execute(
            "
            INSERT INTO meal_events (id, category, timestamp_ms, notes, created_at_ms, updated_at_ms)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
            params![
                event.id.as_str(),
                event.category.as_str(),
                event.timestamp_ms,
                event.notes,
                event.created_at_ms,
                event.updated_at_ms,
            ],
        )?;
        tracing::debug!(id = %event.id, category = %event.category, "inserted event");
        Ok(event)
    }

    /// Fetches a single event by ID.
    pub fn event(&self, id: &EventId) -> Result<Option<MealEvent>, DbError> {
        self.conn
            .query_row(
                "
                SELECT id, category, timestamp_ms, notes, created_at_ms, updated_at_ms
                FROM meal_events
                WHERE id = ?
                ",
                [id.as_str()],
                row_to_raw_event,
            )
            .optional()?
            .map(RawEvent::into_event)
            .transpose()
    }

    /// Applies a partial update to an event, touching its `updated_at_ms`.
    ///
    /// Only the fields present in the patch change. Fails with
    /// [`DbError::NotFound`] when the ID does not exist.
    pub fn update_event(&mut self, id: &EventId, patch: &MealEventPatch) -> Result<(), DbError> {
        let Some(existing) = self.event(id)? else {
            return Err(DbError::NotFound {
                id: id.to_string(),
            });
        };
        if patch.is_empty() {
            return Ok(());
        }

        let category = patch.category.unwrap_or(existing.category);
        let timestamp_ms = patch.timestamp_ms.unwrap_or(existing.timestamp_ms);
        let notes = match &patch.notes {
            Some(notes) => notes.clone(),
            None => existing.notes,
        };
        let updated_at_ms = chrono::Utc::now().timestamp_millis();

        self.conn.execute(
            "
            UPDATE meal_events
            SET category = ?, timestamp_ms = ?, notes = ?, updated_at_ms = ?
            WHERE id = ?
            ",
            params![
                category.as_str(),
                timestamp_ms,
                notes,
                updated_at_ms,
                id.as_str(),
            ],
        )?;
        tracing::debug!(%id, "updated event");
        Ok(())
    }

    /// Deletes an event, failing with [`DbError::NotFound`] when absent.
    pub fn delete_event(&mut self, id: &EventId) -> Result<(), DbError> {
        let deleted = self
            .conn
            .execute("DELETE FROM meal_events WHERE id = ?", [id.as_str()])?;
        if deleted == 0 {
            return Err(DbError::NotFound {
                id: id.to_string(),
            });
        }
        tracing::debug!(%id, "deleted event");
        Ok(())
    }

    /// Lists events with `timestamp_ms` in `start_ms..=end_ms`, ascending
    /// by timestamp then ID.
    pub fn events_in_range(&self, start_ms: i64, end_ms: i64) -> Result<Vec<MealEvent>, DbError> {
        if end_ms < start_ms {
            return Ok(Vec::new());
        }
        let mut stmt = self.conn.prepare(
            "
            SELECT id, category, timestamp_ms, notes, created_at_ms, updated_at_ms
            FROM meal_events
            WHERE timestamp_ms >= ? AND timestamp_ms <= ?
            ORDER BY timestamp_ms ASC, id ASC
            ",
        )?;
        let rows = stmt.query_map(params![start_ms, end_ms], row_to_raw_event)?;
        let mut events = Vec::new();
        for row in rows {
            events.push(row?.into_event()?);
        }
        Ok(events)
    }

    /// Returns the configured fasting goal, defaulting to 16 hours.
    pub fn fasting_goal_hours(&self) -> Result<i64, DbError> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?",
                [FASTING_GOAL_KEY],
                |row| row.get(0),
            )
            .optional()?;
        match stored {
            Some(value) => value.parse().map_err(|_| DbError::InvalidSetting {
                key: FASTING_GOAL_KEY.to_string(),
                message: format!("unparseable fasting goal: {value}"),
            }),
            None => Ok(DEFAULT_FASTING_GOAL_HOURS),
        }
    }

    /// Closes the connection, surfacing any pending error.
    pub fn close(self) -> Result<(), DbError> {
        self.conn.close().map_err(|(_, err)| DbError::Sqlite(err))
    }

    /// Stores the fasting goal, rejecting values outside 8..=24 hours.
    pub fn set_fasting_goal_hours(&mut self, hours: i64) -> Result<(), DbError> {
        if !FASTING_GOAL_HOURS.contains(&hours) {
            return Err(ValidationError::GoalOutOfRange {
                value: hours,
                min: *FASTING_GOAL_HOURS.start(),
                max: *FASTING_GOAL_HOURS.end(),
            }
            .into());
        }
        self.conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?, ?)",
            params![FASTING_GOAL_KEY, hours.to_string()],
        )?;
        Ok(())
    }
}

impl EventStore for Database {
    fn events_in_range(&self, start_ms: i64, end_ms: i64) -> Result<Vec<MealEvent>, StorageError> {
        Self::events_in_range(self, start_ms, end_ms)
            .map_err(|err| StorageError::with_source("event query failed", err))
    }
}

/// A row as read from SQLite, before category validation.
struct RawEvent {
    id: String,
    category: String,
    timestamp_ms: i64,
    notes: Option<String>,
    created_at_ms: i64,
    updated_at_ms: i64,
}

impl RawEvent {
    fn into_event(self) -> Result<MealEvent, DbError> {
        let category = self
            .category
            .parse()
            .map_err(|err: ft_core::UnknownCategory| DbError::InvalidEventData {
                event_id: self.id.clone(),
                message: err.to_string(),
            })?;
        let id = EventId::new(self.id.clone()).map_err(|err| DbError::InvalidEventData {
            event_id: self.id,
            message: err.to_string(),
        })?;
        Ok(MealEvent {
            id,
            category,
            timestamp_ms: self.timestamp_ms,
            notes: self.notes,
            created_at_ms: self.created_at_ms,
            updated_at_ms: self.updated_at_ms,
        })
    }
}

fn row_to_raw_event(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawEvent> {
    Ok(RawEvent {
        id: row.get(0)?,
        category: row.get(1)?,
        timestamp_ms: row.get(2)?,
        notes: row.get(3)?,
        created_at_ms: row.get(4)?,
        updated_at_ms: row.get(5)?,
    })
}
