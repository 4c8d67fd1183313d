//! Batch command for counting many ranges from a JSONL file.
//!
//! Each non-empty line holds one range: `{"start": "2020-01-06", "end": "2020-01-13"}`.
//! Dates accept the same forms as `daydiff count`.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Args;
use dd_core::{ClassificationCache, calendar_days, count_ranges};
use serde::{Deserialize, Serialize};

use super::util::{FilterArgs, ParsedDate, parse_date};
use crate::Config;

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// JSONL file with one `{"start": .., "end": ..}` object per line.
    pub file: PathBuf,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Deserialize)]
struct RangeLine {
    start: String,
    end: String,
}

/// Count for one input line.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RangeCount {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: i64,
}

/// Parses the JSONL input into ranges, reporting the offending line on failure.
pub fn parse_ranges(content: &str, today: NaiveDate) -> Result<Vec<(ParsedDate, ParsedDate)>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            let line_no = idx + 1;
            let range: RangeLine = serde_json::from_str(line)
                .with_context(|| format!("line {line_no}: expected {{\"start\": .., \"end\": ..}}"))?;
            let start = parse_date(&range.start, today)
                .with_context(|| format!("line {line_no}: invalid start date"))?;
            let end = parse_date(&range.end, today)
                .with_context(|| format!("line {line_no}: invalid end date"))?;
            Ok((start, end))
        })
        .collect()
}

/// Formats counts as one aligned line per range.
pub fn format_counts(counts: &[RangeCount]) -> String {
    counts
        .iter()
        .map(|c| format!("{}  {}  {:>6}\n", c.start, c.end, c.days))
        .collect()
}

pub fn run<W: Write>(writer: &mut W, args: &BatchArgs, config: &Config) -> Result<()> {
    let content = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let ranges = parse_ranges(&content, Local::now().date_naive())?;
    let filters = args.filters.resolve(config);

    let cache = config.memoize.then(ClassificationCache::new);
    let days = count_ranges(&ranges, filters.allowed, &filters.excluded, cache.as_ref());
    if let Some(cache) = &cache {
        tracing::debug!(cached_days = cache.len(), "batch classification cache");
    }

    let counts: Vec<RangeCount> = ranges
        .iter()
        .zip(days)
        .map(|((start, end), days)| {
            let (start, end) = calendar_days(start, end);
            RangeCount { start, end, days }
        })
        .collect();

    if args.json {
        let json = serde_json::to_string_pretty(&counts).context("failed to serialize counts")?;
        writeln!(writer, "{json}")?;
    } else {
        write!(writer, "{}", format_counts(&counts))?;
    }

    Ok(())
}
