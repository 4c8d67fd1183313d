//! Counting many ranges at once.

use rayon::prelude::*;

use crate::classify::ClassificationCache;
use crate::date::DateValue;
use crate::difference::DayDifference;
use crate::exclusion::ExclusionSet;
use crate::weekday::WeekdaySet;

/// Counts allowed days for every `(start, end)` pair in parallel.
///
/// All ranges share the same allow-set, exclusions and optional cache. The
/// returned counts are in input order.
pub fn count_ranges<D>(
    ranges: &[(D, D)],
    allowed: WeekdaySet,
    excluded: &ExclusionSet,
    cache: Option<&ClassificationCache>,
) -> Vec<i64>
where
    D: DateValue + Sync,
{
    tracing::debug!(ranges = ranges.len(), "counting ranges");

    ranges
        .par_iter()
        .map(|(start, end)| {
            let counter = DayDifference::new(start, end)
                .allowed_weekdays(allowed)
                .excluded_dates(excluded.iter());
            match cache {
                Some(cache) => counter.with_cache(cache).difference(),
                None => counter.difference(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_results_keep_input_order() {
        let ranges = vec![
            (date(2020, 1, 6), date(2020, 1, 13)),
            (date(2020, 1, 13), date(2020, 1, 6)),
            (date(2020, 1, 6), date(2020, 1, 6)),
            (date(2020, 1, 6), date(2020, 1, 8)),
        ];
        let excluded: ExclusionSet = ["*-01-07"].into_iter().collect();

        let counts = count_ranges(&ranges, WeekdaySet::WEEKDAYS, &excluded, None);

        assert_eq!(counts, vec![4, -4, 0, 1]);
    }

    #[test]
    fn test_shared_cache_matches_sequential() {
        let cache = ClassificationCache::new();
        let excluded: ExclusionSet = ["*-12-25", "*-01-01", "2021-07-05"].into_iter().collect();
        let ranges: Vec<_> = (0..48)
            .map(|i| {
                let start = date(2020, 1, 1) + chrono::Duration::days(i * 7);
                (start, start + chrono::Duration::days(400 - i * 3))
            })
            .collect();

        let parallel = count_ranges(&ranges, WeekdaySet::WEEKDAYS, &excluded, Some(&cache));
        let sequential: Vec<i64> = ranges
            .iter()
            .map(|(start, end)| {
                DayDifference::new(*start, *end)
                    .allowed_weekdays(WeekdaySet::WEEKDAYS)
                    .excluded_dates(excluded.iter())
                    .difference()
            })
            .collect();

        assert_eq!(parallel, sequential);
        assert!(!cache.is_empty());
    }
}
