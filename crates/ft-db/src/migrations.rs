//! Idempotent schema migration.
//!
//! Migrations are an ordered list of steps. Each step decides whether it is
//! needed by introspecting the live schema (`PRAGMA table_info`), not by
//! trusting a version counter, so a counter that has drifted from the
//! actual schema can never cause a destructive step to re-run. Each step
//! applies inside its own transaction: it either commits fully or the
//! pre-migration schema stays live. `PRAGMA user_version` is maintained as
//! a secondary record only.

use rusqlite::Connection;
use thiserror::Error;

/// Schema evolution failed; the store must not be considered ready.
#[derive(Debug, Error)]
#[error("migration step '{step}' failed: {source}")]
pub struct MigrationError {
    /// Name of the step that failed.
    pub step: &'static str,
    #[source]
    source: rusqlite::Error,
}

struct MigrationStep {
    name: &'static str,
    /// Inspects the live schema; `false` means already applied.
    needed: fn(&Connection) -> rusqlite::Result<bool>,
    apply: fn(&Connection) -> rusqlite::Result<()>,
}

const STEPS: &[MigrationStep] = &[
    MigrationStep {
        name: "create-base-schema",
        needed: |conn| {
            Ok(!table_exists(conn, "meal_events")? || !table_exists(conn, "settings")?)
        },
        apply: |conn| {
            conn.execute_batch(
                "
                CREATE TABLE IF NOT EXISTS meal_events (
                    id TEXT PRIMARY KEY,
                    category TEXT NOT NULL,
                    timestamp_ms INTEGER NOT NULL,
                    notes TEXT,
                    created_at_ms INTEGER NOT NULL,
                    updated_at_ms INTEGER NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_meal_events_timestamp
                    ON meal_events(timestamp_ms);

                CREATE TABLE IF NOT EXISTS settings (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );
                ",
            )
        },
    },
    MigrationStep {
        name: "add-notes-column",
        needed: |conn| {
            let columns = table_columns(conn, "meal_events")?;
            Ok(!columns.iter().any(|column| column == "notes"))
        },
        apply: |conn| {
            conn.execute_batch("ALTER TABLE meal_events ADD COLUMN notes TEXT;")
        },
    },
    // Early schemas stored a derived local-date column alongside the
    // timestamp; the two could disagree across timezones, so the column
    // was removed and the day is always derived at query time.
    MigrationStep {
        name: "drop-derived-date-column",
        needed: |conn| {
            let columns = table_columns(conn, "meal_events")?;
            Ok(columns.iter().any(|column| column == "date"))
        },
        apply: |conn| {
            conn.execute_batch(
                "
                CREATE TABLE meal_events_new (
                    id TEXT PRIMARY KEY,
                    category TEXT NOT NULL,
                    timestamp_ms INTEGER NOT NULL,
                    notes TEXT,
                    created_at_ms INTEGER NOT NULL,
                    updated_at_ms INTEGER NOT NULL
                );

                INSERT INTO meal_events_new
                    (id, category, timestamp_ms, notes, created_at_ms, updated_at_ms)
                SELECT id, category, timestamp_ms, notes, created_at_ms, updated_at_ms
                FROM meal_events;

                DROP TABLE meal_events;
                ALTER TABLE meal_events_new RENAME TO meal_events;

                CREATE INDEX IF NOT EXISTS idx_meal_events_timestamp
                    ON meal_events(timestamp_ms);
                ",
            )
        },
    },
];

/// Runs all pending migration steps.
///
/// Safe to call repeatedly; steps that are already applied are skipped.
pub fn run(conn: &mut Connection) -> Result<(), MigrationError> {
    for step in STEPS {
        let needed = (step.needed)(conn).map_err(|source| MigrationError {
            step: step.name,
            source,
        })?;
        if !needed {
            continue;
        }
        tracing::info!(step = step.name, "applying migration step");
        apply_step(conn, step).map_err(|source| MigrationError {
            step: step.name,
            source,
        })?;
    }

    // Secondary record; idempotence never depends on it.
    conn.pragma_update(None, "user_version", i64::try_from(STEPS.len()).unwrap_or(0))
        .map_err(|source| MigrationError {
            step: "record-user-version",
            source,
        })?;
    Ok(())
}

fn apply_step(conn: &mut Connection, step: &MigrationStep) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    (step.apply)(&tx)?;
    tx.commit()
}

fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
        [table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn table_columns(conn: &Connection, table: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?)")?;
    let rows = stmt.query_map([table], |row| row.get::<_, String>(0))?;
    let mut columns = Vec::new();
    for row in rows {
        columns.push(row?);
    }
    Ok(columns)
}
