//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime};
use clap::Args;
use dd_core::{DateValue, ExclusionSet, WeekdaySet};
use regex::Regex;

use crate::Config;

/// Pre-compiled regex for relative date parsing.
static RELATIVE_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s+(day|week)s?\s+(ago|from now)$").expect("relative date regex is valid")
});

/// Conservative bounds for relative date parsing (~1000 years in days).
const MAX_RELATIVE_DAYS: i64 = 1000 * 366;

/// A parsed date argument.
///
/// RFC 3339 timestamps keep their offset so two of them are compared as
/// instants. Every other form is a local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    Local(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
}

impl ParsedDate {
    fn midnight(date: NaiveDate) -> Self {
        Self::Local(date.and_time(chrono::NaiveTime::MIN))
    }
}

impl DateValue for ParsedDate {
    fn to_naive(&self) -> NaiveDateTime {
        match self {
            Self::Local(dt) => *dt,
            Self::Zoned(dt) => dt.naive_local(),
        }
    }

    fn utc_offset(&self) -> Option<FixedOffset> {
        match self {
            Self::Local(_) => None,
            Self::Zoned(dt) => Some(*dt.offset()),
        }
    }
}

/// Parse a date argument as a calendar date, an RFC 3339 timestamp, or a relative date.
///
/// Supports:
/// - Calendar date: "2020-01-06"
/// - RFC 3339: "2020-01-06T10:30:00-05:00"
/// - "today"
/// - Relative: "3 days ago", "2 weeks from now"
pub fn parse_date(s: &str, today: NaiveDate) -> anyhow::Result<ParsedDate> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(ParsedDate::midnight(date));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(ParsedDate::Zoned(dt));
    }

    if s.eq_ignore_ascii_case("today") {
        return Ok(ParsedDate::midnight(today));
    }

    let Some(caps) = RELATIVE_DATE_RE.captures(s) else {
        anyhow::bail!(
            "Invalid date: {s}. Use YYYY-MM-DD, RFC 3339 (e.g., 2020-01-06T10:30:00Z), 'today', or relative (e.g., '3 days ago')"
        );
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative date")?;

    let days_per_unit = match &caps[2] {
        "day" => 1,
        "week" => 7,
        unit => anyhow::bail!("Unknown date unit: {unit}"),
    };

    if n > MAX_RELATIVE_DAYS / days_per_unit {
        anyhow::bail!("Relative date value too large: {n} {}", &caps[2]);
    }

    let offset = Duration::days(n * days_per_unit);
    let date = if &caps[3] == "ago" {
        today - offset
    } else {
        today + offset
    };
    Ok(ParsedDate::midnight(date))
}

/// Allow-set and exclusion flags shared by counting commands.
#[derive(Debug, Default, Args)]
pub struct FilterArgs {
    /// Allowed weekdays, 0 = Sunday through 6 = Saturday (replaces the configured set).
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    pub weekdays: Option<Vec<i64>>,

    /// Excluded date pattern, YYYY-MM-DD or *-MM-DD (added to the configured set).
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,
}

/// Effective allow-set and exclusions after merging config and flags.
#[derive(Debug, Clone)]
pub struct Filters {
    pub allowed: WeekdaySet,
    pub excluded: ExclusionSet,
}

impl FilterArgs {
    /// Merges flags over config. Invalid input is logged and kept; it never matches.
    pub fn resolve(&self, config: &Config) -> Filters {
        let allowed = match &self.weekdays {
            Some(days) => {
                for day in days.iter().filter(|day| !(0..=6).contains(*day)) {
                    tracing::warn!(day, "ignoring weekday outside 0..=6");
                }
                WeekdaySet::from_days(days.iter().copied())
            }
            None => config.allowed_weekdays,
        };

        let mut excluded: ExclusionSet = config.excluded_dates.iter().cloned().collect();
        excluded.extend(self.exclude.iter().cloned());

        for err in excluded.malformed() {
            tracing::warn!(pattern = %err.pattern, "exclusion pattern will never match");
        }

        Filters { allowed, excluded }
    }
}
