//! Allowed-day counting.
//!
//! # Algorithm Summary
//!
//! 1. Read both values in one frame and order them, remembering whether they
//!    were swapped
//! 2. Count calendar days in the half-open interval `[start, end)`
//! 3. With every weekday allowed and nothing excluded, that count is the answer
//! 4. Otherwise walk each day of `[start, end)` and subtract one for every day
//!    whose weekday is not allowed or whose date is excluded
//! 5. Negate if the values were swapped
//!
//! The end day is never evaluated, so excluding it has no effect. The start day
//! is always evaluated.

use chrono::NaiveDate;

use crate::classify::{ClassificationCache, DayClassification};
use crate::date::{DateValue, calendar_days};
use crate::exclusion::ExclusionSet;
use crate::weekday::WeekdaySet;

/// Counts allowed days between two date values.
///
/// ```
/// use chrono::NaiveDate;
/// use dd_core::{DayDifference, WeekdaySet};
///
/// let monday = NaiveDate::from_ymd_opt(2020, 1, 6).unwrap();
/// let next_monday = NaiveDate::from_ymd_opt(2020, 1, 13).unwrap();
///
/// let working_days = DayDifference::new(monday, next_monday)
///     .allowed_weekdays(WeekdaySet::WEEKDAYS)
///     .excluded_dates(["*-01-07"])
///     .difference();
///
/// assert_eq!(working_days, 4);
/// ```
#[derive(Debug, Clone)]
pub struct DayDifference<'c> {
    start: NaiveDate,
    end: NaiveDate,
    allowed: WeekdaySet,
    excluded: ExclusionSet,
    cache: Option<&'c ClassificationCache>,
}

impl<'c> DayDifference<'c> {
    /// Creates a counter allowing every weekday and excluding nothing.
    pub fn new(start: impl DateValue, end: impl DateValue) -> Self {
        let (start, end) = calendar_days(&start, &end);
        Self {
            start,
            end,
            allowed: WeekdaySet::ALL,
            excluded: ExclusionSet::new(),
            cache: None,
        }
    }

    /// Sets the weekdays that may be counted.
    #[must_use]
    pub fn allowed_weekdays(mut self, allowed: impl Into<WeekdaySet>) -> Self {
        self.allowed = allowed.into();
        self
    }

    /// Sets the excluded-date patterns.
    #[must_use]
    pub fn excluded_dates<I>(mut self, excluded: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.excluded = excluded.into_iter().collect();
        self
    }

    /// Memoizes day classifications in `cache`.
    #[must_use]
    pub fn with_cache(mut self, cache: &'c ClassificationCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Returns the signed number of allowed days in `[start, end)`.
    ///
    /// Positive when `start <= end`, negative otherwise.
    pub fn difference(&self) -> i64 {
        if self.start <= self.end {
            self.count_forward(self.start, self.end)
        } else {
            -self.count_forward(self.end, self.start)
        }
    }

    /// Counts allowed days in `[start, end)`, requiring `start <= end`.
    fn count_forward(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        let total_days = (end - start).num_days();

        if self.allowed.is_full_week() && self.excluded.is_empty() {
            tracing::debug!(total_days, "no filtering, skipping day walk");
            return total_days;
        }

        // Lock per lookup, not per walk
        let rejected = start
            .iter_days()
            .take_while(|day| *day < end)
            .filter(|&day| match self.cache {
                Some(cache) => !cache.with_classification(day, |day| self.is_counted(day)),
                None => !self.is_counted(&DayClassification::of(day)),
            })
            .count();
        let rejected = i64::try_from(rejected).unwrap_or(i64::MAX);

        tracing::debug!(total_days, rejected, "walked day range");
        total_days - rejected
    }

    fn is_counted(&self, day: &DayClassification) -> bool {
        self.allowed.contains(day.weekday) && !self.excluded.excludes(day)
    }
}
