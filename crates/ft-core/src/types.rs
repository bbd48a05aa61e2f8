//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A day identifier that is not `YYYY-MM-DD`.
    #[error("invalid day id: {value}")]
    InvalidDayId { value: String },

    /// The fasting goal was outside the accepted range.
    #[error("fasting goal must be between {min} and {max} hours, got {value}")]
    GoalOutOfRange { value: i64, min: i64, max: i64 },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated meal-event identifier.
    ///
    /// Event IDs must be non-empty strings. They should be unique within the system,
    /// though uniqueness is enforced at the database level.
    EventId, "event ID"
);

/// A local calendar-day identifier in `YYYY-MM-DD` form.
///
/// Day IDs always refer to a day in the device's local timezone; see
/// [`crate::local_date`] for the timestamp conversions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayId(String);

impl DayId {
    /// Creates a day ID after validating the `YYYY-MM-DD` shape.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if Self::is_well_formed(&id) {
            Ok(Self(id))
        } else {
            Err(ValidationError::InvalidDayId { value: id })
        }
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the ID into a calendar date.
    pub fn to_naive_date(&self) -> chrono::NaiveDate {
        // Shape is validated on construction, so this cannot fail.
        chrono::NaiveDate::parse_from_str(&self.0, "%Y-%m-%d")
            .unwrap_or_else(|_| unreachable!("DayId is validated on construction"))
    }

    fn is_well_formed(id: &str) -> bool {
        chrono::NaiveDate::parse_from_str(id, "%Y-%m-%d").is_ok() && id.len() == 10
    }
}

impl From<chrono::NaiveDate> for DayId {
    fn from(date: chrono::NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }
}

impl TryFrom<String> for DayId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DayId> for String {
    fn from(id: DayId) -> Self {
        id.0
    }
}

impl std::str::FromStr for DayId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for DayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for DayId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_id_rejects_empty() {
        assert!(EventId::new("").is_err());
        assert!(EventId::new("valid-id").is_ok());
    }

    #[test]
    fn event_id_serde_roundtrip() {
        let id = EventId::new("test-123").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"test-123\"");
        let parsed: EventId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn event_id_serde_rejects_empty() {
        let result: Result<EventId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn day_id_accepts_calendar_dates() {
        assert!(DayId::new("2025-03-14").is_ok());
        assert!(DayId::new("2024-02-29").is_ok());
    }

    #[test]
    fn day_id_rejects_malformed_values() {
        assert!(DayId::new("").is_err());
        assert!(DayId::new("2025-3-14").is_err());
        assert!(DayId::new("2025-13-01").is_err());
        assert!(DayId::new("2025-02-30").is_err());
        assert!(DayId::new("not-a-date").is_err());
    }

    #[test]
    fn day_id_roundtrips_through_naive_date() {
        let id = DayId::new("2025-03-14").unwrap();
        let date = id.to_naive_date();
        assert_eq!(DayId::from(date), id);
    }

    #[test]
    fn day_id_ordering_matches_chronology() {
        let earlier = DayId::new("2025-03-14").unwrap();
        let later = DayId::new("2025-03-15").unwrap();
        assert!(earlier < later);
    }
}
