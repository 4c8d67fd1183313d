//! Per-day classification and its memo table.
//!
//! Classifying a day means formatting it three ways: its weekday number, its
//! exact `YYYY-MM-DD` form and its repeating `*-MM-DD` form. The result depends
//! only on the day itself, never on allow-sets or exclusions, so a cache entry
//! can never go stale and is never evicted.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::weekday::weekday_number;

/// The formatted views of a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayClassification {
    /// Weekday number, 0 = Sunday through 6 = Saturday.
    pub weekday: u8,

    /// The `YYYY-MM-DD` form.
    pub exact: String,

    /// The `*-MM-DD` form.
    pub repeating: String,
}

impl DayClassification {
    /// Classifies a calendar day.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            weekday: weekday_number(&date),
            exact: date.format("%Y-%m-%d").to_string(),
            repeating: date.format("*-%m-%d").to_string(),
        }
    }
}

/// Memo table of day classifications, shareable across threads.
///
/// The cache is owned by the caller and attached to a counter by reference.
/// Entries live until [`clear`](Self::clear) or [`restore`](Self::restore).
#[derive(Debug, Default)]
pub struct ClassificationCache {
    entries: Mutex<HashMap<NaiveDate, DayClassification>>,
}

/// Exclusive access to the table for a single operation.
pub(crate) struct CacheGuard<'a>(MutexGuard<'a, HashMap<NaiveDate, DayClassification>>);

impl CacheGuard<'_> {
    /// Returns the classification of `date`, computing and storing it on a miss.
    pub(crate) fn classify(&mut self, date: NaiveDate) -> &DayClassification {
        self.0
            .entry(date)
            .or_insert_with(|| DayClassification::of(date))
    }
}

impl ClassificationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries are pure values, so a panic while holding the lock cannot leave
    /// a wrong one behind and a poisoned lock is safe to reuse.
    pub(crate) fn lock(&self) -> CacheGuard<'_> {
        CacheGuard(self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Returns the classification of `date`, computing and storing it on a miss.
    pub fn classify(&self, date: NaiveDate) -> DayClassification {
        self.with_classification(date, DayClassification::clone)
    }

    /// Applies `f` to the classification of `date`. The lock is held for this
    /// lookup and `f` only, so `f` must not touch the cache.
    pub(crate) fn with_classification<R>(
        &self,
        date: NaiveDate,
        f: impl FnOnce(&DayClassification) -> R,
    ) -> R {
        f(self.lock().classify(date))
    }

    /// Number of days currently memoized.
    pub fn len(&self) -> usize {
        self.lock().0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of every memoized entry.
    pub fn snapshot(&self) -> HashMap<NaiveDate, DayClassification> {
        self.lock().0.clone()
    }

    /// Replaces the whole table.
    ///
    /// Intended for tests that need a known starting state. Entries that do
    /// not match [`DayClassification::of`] will be served as-is.
    pub fn restore(&self, entries: HashMap<NaiveDate, DayClassification>) {
        *self.lock().0 = entries;
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.lock().0.clear();
    }
}
