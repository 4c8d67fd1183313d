//! Count command for a single date range.
//!
//! This module implements `daydiff count START END` with human-readable and
//! JSON output.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Args;
use dd_core::{DayDifference, calendar_days};
use serde::Serialize;

use super::util::{FilterArgs, Filters, parse_date};
use crate::Config;

#[derive(Debug, Args)]
pub struct CountArgs {
    /// First day of the range (counted).
    pub start: String,

    /// Day after the range (never counted).
    pub end: String,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Computed count for one range.
#[derive(Debug, Serialize)]
pub struct CountReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub allowed_weekdays: Vec<u8>,
    pub excluded_dates: Vec<String>,
    pub days: i64,
}

impl CountReport {
    fn new(start: NaiveDate, end: NaiveDate, filters: &Filters, days: i64) -> Self {
        let mut excluded_dates: Vec<String> = filters.excluded.iter().map(String::from).collect();
        excluded_dates.sort();
        Self {
            start,
            end,
            allowed_weekdays: filters.allowed.days().collect(),
            excluded_dates,
            days,
        }
    }
}

/// Formats a report for the terminal.
pub fn format_count(report: &CountReport) -> String {
    let unit = if report.days.abs() == 1 { "day" } else { "days" };
    format!(
        "{} allowed {unit} from {} to {}\n",
        report.days, report.start, report.end
    )
}

/// Formats a report as pretty-printed JSON.
pub fn format_count_json(report: &CountReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize count")
}

pub fn run<W: Write>(writer: &mut W, args: &CountArgs, config: &Config) -> Result<()> {
    let today = Local::now().date_naive();
    let start = parse_date(&args.start, today).context("invalid start date")?;
    let end = parse_date(&args.end, today).context("invalid end date")?;
    let filters = args.filters.resolve(config);

    let days = DayDifference::new(start, end)
        .allowed_weekdays(filters.allowed)
        .excluded_dates(filters.excluded.iter())
        .difference();
    let (start, end) = calendar_days(&start, &end);
    tracing::debug!(%start, %end, days, "counted range");

    let report = CountReport::new(start, end, &filters, days);
    if args.json {
        writeln!(writer, "{}", format_count_json(&report)?)?;
    } else {
        write!(writer, "{}", format_count(&report))?;
    }

    Ok(())
}
