//! Core logic for counting allowed days between two dates.
//!
//! A day is allowed when its weekday is in a [`WeekdaySet`] and its date is not
//! matched by an [`ExclusionSet`]. This crate contains:
//! - Counting: the signed, half-open [`DayDifference`] walk
//! - Classification: per-day formatting and the optional [`ClassificationCache`]
//! - Batch counting: many ranges in parallel against one cache

pub mod batch;
mod classify;
mod date;
mod difference;
pub mod exclusion;
pub mod weekday;

pub use batch::count_ranges;
pub use classify::{ClassificationCache, DayClassification};
pub use date::{DateValue, calendar_days};
pub use difference::DayDifference;
pub use exclusion::{ExclusionPattern, ExclusionSet, PatternError};
pub use weekday::{WeekdayError, WeekdaySet};
