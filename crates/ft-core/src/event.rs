//! Meal events: the single persisted fact this engine derives from.

use serde::{Deserialize, Serialize};

use crate::category::MealCategory;
use crate::types::EventId;

/// A single logged intake occurrence.
///
/// `timestamp_ms` (epoch milliseconds) is the only temporal anchor; no
/// calendar-date field is stored, so the local day an event belongs to is
/// always derived at query time via [`crate::local_date`]. Events are owned
/// by the store; the engine reads and derives, never retains copies beyond
/// a single computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealEvent {
    /// Unique identifier for this event.
    pub id: EventId,
    /// The intake category.
    pub category: MealCategory,
    /// When the intake occurred, in epoch milliseconds.
    pub timestamp_ms: i64,
    /// Optional free-form note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the record was created, in epoch milliseconds.
    pub created_at_ms: i64,
    /// When the record was last modified, in epoch milliseconds.
    pub updated_at_ms: i64,
}

/// Fields for a meal event about to be inserted.
///
/// The store assigns the ID and bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMealEvent {
    pub category: MealCategory,
    pub timestamp_ms: i64,
    pub notes: Option<String>,
}

/// A partial update to a meal event.
///
/// One `Option` per mutable field; the store applies only the fields that
/// are present and leaves the rest untouched. This replaces loose partial
/// objects with an explicit field-presence check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealEventPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<MealCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<i64>,
    /// `Some(None)` clears the note; `None` leaves it unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
}

impl MealEventPatch {
    /// Returns whether the patch changes anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.category.is_none() && self.timestamp_ms.is_none() && self.notes.is_none()
    }
}
