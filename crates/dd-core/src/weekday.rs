//! Weekday allow-sets.
//!
//! Weekdays are numbered 0 = Sunday through 6 = Saturday. A [`WeekdaySet`] is a
//! seven-bit mask; integers outside that range are never members.

use std::fmt;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest valid weekday number (Saturday).
pub const SATURDAY: u8 = 6;

const FULL_WEEK_MASK: u8 = 0b111_1111;

/// Error returned by the strict weekday constructors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WeekdayError {
    /// The weekday number was outside 0..=6.
    #[error("weekday must be between 0 (Sunday) and 6 (Saturday), got {value}")]
    OutOfRange { value: i64 },
}

/// Returns the 0 = Sunday based weekday number of a date.
pub fn weekday_number<D: Datelike>(date: &D) -> u8 {
    // num_days_from_sunday is always in 0..=6
    u8::try_from(date.weekday().num_days_from_sunday()).unwrap_or(u8::MAX)
}

/// A set of allowed weekdays.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<i64>", into = "Vec<u8>")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// Every day of the week.
    pub const ALL: Self = Self(FULL_WEEK_MASK);

    /// No day at all.
    pub const EMPTY: Self = Self(0);

    /// Monday through Friday.
    pub const WEEKDAYS: Self = Self(0b011_1110);

    /// Builds a set from weekday numbers, ignoring values outside 0..=6.
    pub fn from_days<I>(days: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<i64>,
    {
        days.into_iter()
            .filter_map(|day| {
                let value: i64 = day.into();
                u8::try_from(value).ok()
            })
            .fold(Self::EMPTY, Self::with)
    }

    /// Builds a set from weekday numbers, rejecting values outside 0..=6.
    pub fn try_from_days<I>(days: I) -> Result<Self, WeekdayError>
    where
        I: IntoIterator,
        I::Item: Into<i64>,
    {
        days.into_iter().try_fold(Self::EMPTY, |set, day| {
            let value: i64 = day.into();
            match u8::try_from(value) {
                Ok(day) if day <= SATURDAY => Ok(set.with(day)),
                _ => Err(WeekdayError::OutOfRange { value }),
            }
        })
    }

    /// Returns a copy of the set with `day` added. Out-of-range days are ignored.
    #[must_use]
    pub const fn with(self, day: u8) -> Self {
        if day > SATURDAY {
            return self;
        }
        Self(self.0 | (1 << day))
    }

    /// Membership test by weekday number.
    pub const fn contains(self, day: u8) -> bool {
        day <= SATURDAY && (self.0 >> day) & 1 != 0
    }

    /// True when all seven weekdays are allowed.
    pub const fn is_full_week(self) -> bool {
        self.0 == FULL_WEEK_MASK
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of allowed weekdays.
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Allowed weekday numbers in ascending order.
    pub fn days(self) -> impl Iterator<Item = u8> {
        (0..=SATURDAY).filter(move |&day| self.contains(day))
    }
}

impl Default for WeekdaySet {
    fn default() -> Self {
        Self::ALL
    }
}

impl fmt::Debug for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.days()).finish()
    }
}

impl From<Vec<i64>> for WeekdaySet {
    fn from(days: Vec<i64>) -> Self {
        Self::from_days(days)
    }
}

impl From<WeekdaySet> for Vec<u8> {
    fn from(set: WeekdaySet) -> Self {
        set.days().collect()
    }
}

impl FromIterator<u8> for WeekdaySet {
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        Self::from_days(iter)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_default_is_full_week() {
        let set = WeekdaySet::default();
        assert!(set.is_full_week());
        assert_eq!(set.len(), 7);
    }

    #[test]
    fn test_from_days_ignores_out_of_range() {
        let set = WeekdaySet::from_days([1, 9, -1, 3]);
        assert_eq!(set.days().collect::<Vec<_>>(), vec![1, 3]);
        assert!(!set.contains(9));
    }

    #[test]
    fn test_duplicates_do_not_make_a_full_week() {
        let set = WeekdaySet::from_days([0, 0, 1, 2, 3, 4, 5]);
        assert_eq!(set.len(), 6);
        assert!(!set.is_full_week());
    }

    #[test]
    fn test_invalid_entries_do_not_make_a_full_week() {
        let set = WeekdaySet::from_days([0, 1, 2, 3, 4, 5, 7]);
        assert!(!set.is_full_week());
    }

    #[test]
    fn test_try_from_days_rejects_out_of_range() {
        let err = WeekdaySet::try_from_days([1, 7]).unwrap_err();
        assert_eq!(err, WeekdayError::OutOfRange { value: 7 });
        assert_eq!(
            err.to_string(),
            "weekday must be between 0 (Sunday) and 6 (Saturday), got 7"
        );
    }

    #[test]
    fn test_weekdays_constant() {
        assert_eq!(WeekdaySet::WEEKDAYS, WeekdaySet::from_days([1, 2, 3, 4, 5]));
        assert!(!WeekdaySet::WEEKDAYS.contains(0));
        assert!(WeekdaySet::WEEKDAYS.contains(5));
    }

    #[test]
    fn test_with_ignores_out_of_range() {
        let set = WeekdaySet::EMPTY.with(6);
        assert_eq!(set.days().collect::<Vec<_>>(), vec![6]);
        assert_eq!(set.with(42), set);
    }

    #[test]
    fn test_weekday_number_sunday_based() {
        // Jan 5, 2020 is a Sunday
        let sunday = NaiveDate::from_ymd_opt(2020, 1, 5).unwrap();
        assert_eq!(weekday_number(&sunday), 0);
        assert_eq!(weekday_number(&sunday.succ_opt().unwrap()), 1);
    }

    #[test]
    fn test_serde_as_list() {
        let set = WeekdaySet::from_days([5, 1, 3]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "[1,3,5]");

        let parsed: WeekdaySet = serde_json::from_str("[1, 3, 5, 12]").unwrap();
        assert_eq!(parsed, set);
    }
}
