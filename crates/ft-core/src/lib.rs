//! Core domain logic for the intake-timing tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Gap calculation: elapsed time between adjacent intake events
//! - Fasting windows: overnight gaps between local days, plus live status
//! - Daily aggregation: per-day summaries and stats over an event store
//! - Pattern analysis: multi-day eating/fasting statistics

pub mod aggregate;
pub mod category;
pub mod duration;
pub mod event;
pub mod fasting;
pub mod gaps;
pub mod local_date;
pub mod pattern;
pub mod types;

pub use aggregate::{DailyAggregator, DailyStats, DailySummary, EventStore, StorageError};
pub use category::{FastingPolicy, MealCategory, UnknownCategory};
pub use duration::{format_duration, format_duration_long, parse_duration};
pub use event::{MealEvent, MealEventPatch, NewMealEvent};
pub use fasting::{FastingStatus, FastingWindow, calculate_fasting_window, current_fasting_status};
pub use gaps::{TimeGap, calculate_gaps};
pub use pattern::{PatternReport, analyze_patterns};
pub use types::{DayId, EventId, ValidationError};
