//! Bucketing of daily series
//!
//! Three groupings are kept deliberately separate:
//!
//! - week of month: fixed day-of-month blocks 1~7, 8~14, 15~21, 22~28,
//!   29~31 used by month charts. These are not ISO weeks.
//! - ISO week: Monday to Sunday, keyed by ISO week-numbering year and week.
//! - month: calendar month.

use std::collections::BTreeMap;

use crate::error::{SalesError, SalesResult};
use crate::models::{Bucket, BucketOrder, CalendarDate, DailyAmount};

/// Accumulates members of one bucket
struct Accumulator {
    first: CalendarDate,
    last: CalendarDate,
    total: u64,
}

impl Accumulator {
    fn new(date: CalendarDate) -> Self {
        Self {
            first: date,
            last: date,
            total: 0,
        }
    }

    fn add(&mut self, entry: &DailyAmount) -> SalesResult<()> {
        self.first = self.first.min(entry.date);
        self.last = self.last.max(entry.date);
        self.total = self
            .total
            .checked_add(entry.amount)
            .ok_or_else(SalesError::amount_overflow)?;
        Ok(())
    }
}

fn emit<K: Ord>(buckets: BTreeMap<K, Bucket>, order: BucketOrder) -> Vec<Bucket> {
    let mut list: Vec<Bucket> = buckets.into_values().collect();
    if order == BucketOrder::MostRecentFirst {
        list.reverse();
    }
    list
}

/// Block index and day bounds of the week-of-month block containing `day`
fn week_of_month_block(day: u32) -> (u32, u32, u32) {
    let index = (day - 1) / 7;
    let start = index * 7 + 1;
    let end = (start + 6).min(31);
    (index, start, end)
}

/// Group a month's daily series into fixed day-of-month blocks
///
/// Day `d` lands in block `[7k+1, min(7k+7, 31)]` with `k = (d-1)/7`. The
/// grouping uses the day of month only, so the input is expected to be one
/// month's series. `start`/`end` of each bucket are the earliest and latest
/// member dates.
pub fn group_by_week_of_month(daily: &[DailyAmount], order: BucketOrder) -> SalesResult<Vec<Bucket>> {
    let mut blocks: BTreeMap<u32, (String, Accumulator)> = BTreeMap::new();

    for entry in daily {
        let (index, start, end) = week_of_month_block(entry.date.day());
        let (_, acc) = blocks
            .entry(index)
            .or_insert_with(|| (format!("{}~{}일", start, end), Accumulator::new(entry.date)));
        acc.add(entry)?;
    }

    let buckets = blocks
        .into_iter()
        .map(|(index, (label, acc))| {
            let bucket = Bucket {
                key: label.clone(),
                label,
                start: acc.first,
                end: acc.last,
                total_amount: acc.total,
            };
            (index, bucket)
        })
        .collect();

    Ok(emit(buckets, order))
}

/// Group a daily series into ISO weeks
///
/// Keys are `"{iso_year}-{iso_week}"`; labels are the week's Monday to
/// Sunday range.
pub fn group_by_iso_week(daily: &[DailyAmount], order: BucketOrder) -> SalesResult<Vec<Bucket>> {
    let mut weeks: BTreeMap<CalendarDate, Accumulator> = BTreeMap::new();

    for entry in daily {
        weeks
            .entry(entry.date.monday())
            .or_insert_with(|| Accumulator::new(entry.date))
            .add(entry)?;
    }

    let buckets = weeks
        .into_iter()
        .map(|(monday, acc)| {
            let (year, week) = monday.iso_week();
            let sunday = monday.sunday();
            let bucket = Bucket {
                key: format!("{}-{}", year, week),
                label: format!("{} ~ {}", monday, sunday),
                start: monday,
                end: sunday,
                total_amount: acc.total,
            };
            (monday, bucket)
        })
        .collect();

    Ok(emit(buckets, order))
}

/// Group a daily series into calendar months
///
/// Keys are `"YYYY-MM"`; labels are `"YYYY년 M월"`. `start`/`end` are the
/// earliest and latest member dates.
pub fn group_by_month(daily: &[DailyAmount], order: BucketOrder) -> SalesResult<Vec<Bucket>> {
    let mut months: BTreeMap<(i32, u32), Accumulator> = BTreeMap::new();

    for entry in daily {
        months
            .entry((entry.date.year(), entry.date.month()))
            .or_insert_with(|| Accumulator::new(entry.date))
            .add(entry)?;
    }

    let buckets = months
        .into_iter()
        .map(|((year, month), acc)| {
            let bucket = Bucket {
                key: format!("{:04}-{:02}", year, month),
                label: format!("{}년 {}월", year, month),
                start: acc.first,
                end: acc.last,
                total_amount: acc.total,
            };
            ((year, month), bucket)
        })
        .collect();

    Ok(emit(buckets, order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fill;
    use crate::models::{enumerate_dates, Period};

    fn d(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    fn ones(start: &str, end: &str) -> Vec<DailyAmount> {
        enumerate_dates(d(start), d(end))
            .unwrap()
            .into_iter()
            .map(|date| DailyAmount::new(date, 1))
            .collect()
    }

    #[test]
    fn test_week_of_month_blocks() {
        let buckets = group_by_week_of_month(&ones("2025-05-01", "2025-05-31"), BucketOrder::Chronological).unwrap();

        let keys: Vec<_> = buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["1~7일", "8~14일", "15~21일", "22~28일", "29~31일"]);

        let totals: Vec<_> = buckets.iter().map(|b| b.total_amount).collect();
        assert_eq!(totals, vec![7, 7, 7, 7, 3]);
    }

    #[test]
    fn test_week_of_month_boundaries() {
        let data = vec![
            DailyAmount::new(d("2025-05-31"), 10),
            DailyAmount::new(d("2025-05-01"), 5),
        ];
        let buckets = group_by_week_of_month(&data, BucketOrder::Chronological).unwrap();

        assert_eq!(buckets[0].key, "1~7일");
        assert_eq!(buckets[0].total_amount, 5);
        assert_eq!(buckets[1].key, "29~31일");
        assert_eq!(buckets[1].total_amount, 10);
    }

    #[test]
    fn test_week_of_month_short_month() {
        let buckets = group_by_week_of_month(&ones("2025-02-01", "2025-02-28"), BucketOrder::Chronological).unwrap();
        assert_eq!(buckets.len(), 4);
        assert_eq!(buckets[3].end, d("2025-02-28"));

        let leap = group_by_week_of_month(&ones("2024-02-01", "2024-02-29"), BucketOrder::Chronological).unwrap();
        assert_eq!(leap.len(), 5);
        assert_eq!(leap[4].key, "29~31일");
        assert_eq!(leap[4].total_amount, 1);
    }

    #[test]
    fn test_week_of_month_most_recent_first() {
        let buckets = group_by_week_of_month(&ones("2025-05-01", "2025-05-31"), BucketOrder::MostRecentFirst).unwrap();
        assert_eq!(buckets.first().map(|b| b.key.as_str()), Some("29~31일"));
        assert_eq!(buckets.last().map(|b| b.key.as_str()), Some("1~7일"));
    }

    #[test]
    fn test_iso_week_grouping() {
        let buckets = group_by_iso_week(&ones("2025-05-12", "2025-05-19"), BucketOrder::MostRecentFirst).unwrap();

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].key, "2025-21");
        assert_eq!(buckets[0].total_amount, 1);
        assert_eq!(buckets[1].key, "2025-20");
        assert_eq!(buckets[1].total_amount, 7);
        assert_eq!(buckets[1].label, "2025-05-12 ~ 2025-05-18");
    }

    #[test]
    fn test_iso_week_year_boundary() {
        let buckets = group_by_iso_week(&ones("2024-12-29", "2025-01-05"), BucketOrder::Chronological).unwrap();

        let keys: Vec<_> = buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["2024-52", "2025-1"]);
        assert_eq!(buckets[1].start, d("2024-12-30"));
        assert_eq!(buckets[1].total_amount, 7);
    }

    #[test]
    fn test_iso_week_orders_by_date_not_key_text() {
        // "2025-10" sorts before "2025-9" as text
        let buckets = group_by_iso_week(&ones("2025-02-24", "2025-03-09"), BucketOrder::Chronological).unwrap();
        let keys: Vec<_> = buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["2025-9", "2025-10"]);
    }

    #[test]
    fn test_month_grouping() {
        let buckets = group_by_month(&ones("2025-04-29", "2025-05-02"), BucketOrder::MostRecentFirst).unwrap();

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].key, "2025-05");
        assert_eq!(buckets[0].label, "2025년 5월");
        assert_eq!(buckets[0].total_amount, 2);
        assert_eq!(buckets[1].key, "2025-04");
        assert_eq!(buckets[1].start, d("2025-04-29"));
    }

    #[test]
    fn test_buckets_preserve_total() {
        let dates = Period::month(2025, 3).unwrap().dates().unwrap();
        let sparse = vec![
            DailyAmount::new(d("2025-03-03"), 120),
            DailyAmount::new(d("2025-03-17"), 80),
            DailyAmount::new(d("2025-03-31"), 40),
        ];
        let daily = fill(&dates, &sparse);

        for buckets in [
            group_by_week_of_month(&daily, BucketOrder::Chronological).unwrap(),
            group_by_iso_week(&daily, BucketOrder::Chronological).unwrap(),
            group_by_month(&daily, BucketOrder::Chronological).unwrap(),
        ] {
            assert_eq!(buckets.iter().map(|b| b.total_amount).sum::<u64>(), 240);
        }
    }

    #[test]
    fn test_bucket_total_overflow_is_an_error() {
        let data = vec![
            DailyAmount::new(d("2025-05-01"), u64::MAX),
            DailyAmount::new(d("2025-05-02"), 1),
        ];

        assert!(group_by_week_of_month(&data, BucketOrder::Chronological).is_err());
        assert!(group_by_month(&data, BucketOrder::Chronological).is_err());
        assert!(group_by_iso_week(&data, BucketOrder::Chronological).is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(group_by_week_of_month(&[], BucketOrder::Chronological).unwrap().is_empty());
        assert!(group_by_iso_week(&[], BucketOrder::Chronological).unwrap().is_empty());
        assert!(group_by_month(&[], BucketOrder::Chronological).unwrap().is_empty());
    }
}
