//! Excluded-date patterns.
//!
//! Two literal forms are recognized:
//! - `YYYY-MM-DD` excludes one specific date (e.g. `2020-04-01`)
//! - `*-MM-DD` excludes that month/day in every year (e.g. `*-07-04`)
//!
//! Matching is done on the raw strings. Anything that is not one of the two
//! forms is kept in the set but can never match a day.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::DayClassification;

/// Prefix of the year-repeating form.
const REPEATING_PREFIX: &str = "*-";

/// Error for strings that are not a valid exclusion pattern.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid exclusion pattern {pattern:?}: expected YYYY-MM-DD or *-MM-DD")]
pub struct PatternError {
    pub pattern: String,
}

/// A parsed exclusion pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExclusionPattern {
    /// One specific calendar date.
    Exact(NaiveDate),
    /// A month/day that repeats every year.
    Repeating { month: u32, day: u32 },
}

impl FromStr for ExclusionPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PatternError {
            pattern: s.to_string(),
        };

        if let Some(month_day) = s.strip_prefix(REPEATING_PREFIX) {
            let (month, day) = month_day.split_once('-').ok_or_else(invalid)?;
            if month.len() != 2 || day.len() != 2 {
                return Err(invalid());
            }
            let month: u32 = month.parse().map_err(|_| invalid())?;
            let day: u32 = day.parse().map_err(|_| invalid())?;
            // 2000 is a leap year, so Feb 29 is accepted
            NaiveDate::from_ymd_opt(2000, month, day).ok_or_else(invalid)?;
            return Ok(Self::Repeating { month, day });
        }

        if s.len() != 10 {
            return Err(invalid());
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self::Exact)
            .map_err(|_| invalid())
    }
}

impl fmt::Display for ExclusionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Repeating { month, day } => write!(f, "{REPEATING_PREFIX}{month:02}-{day:02}"),
        }
    }
}

/// A set of excluded-date pattern strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionSet(HashSet<String>);

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a raw pattern. Returns false if it was already present.
    pub fn insert(&mut self, pattern: impl Into<String>) -> bool {
        self.0.insert(pattern.into())
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.0.contains(pattern)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// True if the day matches either its exact or its repeating form.
    pub fn excludes(&self, day: &DayClassification) -> bool {
        self.contains(&day.exact) || self.contains(&day.repeating)
    }

    /// Entries that are not a valid pattern, sorted. They never match.
    pub fn malformed(&self) -> Vec<PatternError> {
        let mut errors: Vec<PatternError> = self
            .iter()
            .filter_map(|raw| raw.parse::<ExclusionPattern>().err())
            .collect();
        errors.sort_by(|a, b| a.pattern.cmp(&b.pattern));
        errors
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for ExclusionSet {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> DayClassification {
        DayClassification::of(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_parse_exact() {
        let pattern: ExclusionPattern = "2020-01-07".parse().unwrap();
        assert_eq!(
            pattern,
            ExclusionPattern::Exact(NaiveDate::from_ymd_opt(2020, 1, 7).unwrap())
        );
        assert_eq!(pattern.to_string(), "2020-01-07");
    }

    #[test]
    fn test_parse_repeating() {
        let pattern: ExclusionPattern = "*-07-04".parse().unwrap();
        assert_eq!(pattern, ExclusionPattern::Repeating { month: 7, day: 4 });
        assert_eq!(pattern.to_string(), "*-07-04");
    }

    #[test]
    fn test_parse_repeating_leap_day() {
        assert!("*-02-29".parse::<ExclusionPattern>().is_ok());
        assert!("*-02-30".parse::<ExclusionPattern>().is_err());
    }

    #[test]
    fn test_parse_rejects_unpadded_and_garbage() {
        for raw in ["2020-1-7", "*-7-4", "07-04", "", "holiday", "2020-13-01", "*-00-10"] {
            let err = raw.parse::<ExclusionPattern>().unwrap_err();
            assert_eq!(err.pattern, raw, "expected {raw:?} to be rejected");
        }
    }

    #[test]
    fn test_excludes_matches_either_form() {
        let exact: ExclusionSet = ["2020-01-07"].into_iter().collect();
        let repeating: ExclusionSet = ["*-01-07"].into_iter().collect();

        assert!(exact.excludes(&day(2020, 1, 7)));
        assert!(!exact.excludes(&day(2021, 1, 7)));
        assert!(repeating.excludes(&day(2020, 1, 7)));
        assert!(repeating.excludes(&day(1999, 1, 7)));
        assert!(!repeating.excludes(&day(2020, 1, 8)));
    }

    #[test]
    fn test_malformed_entries_never_match() {
        let set: ExclusionSet = ["2020-1-7", "*-1-7", "2020-01-08"].into_iter().collect();

        assert!(!set.excludes(&day(2020, 1, 7)));
        assert!(set.excludes(&day(2020, 1, 8)));

        let malformed: Vec<String> = set.malformed().into_iter().map(|e| e.pattern).collect();
        assert_eq!(malformed, vec!["*-1-7".to_string(), "2020-1-7".to_string()]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let mut set = ExclusionSet::new();
        assert!(set.insert("*-12-25"));
        assert!(!set.insert("*-12-25"));
        assert_eq!(set.len(), 1);
    }
}
