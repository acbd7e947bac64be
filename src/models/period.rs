//! Calendar period representation
//!
//! Supports three granularities: calendar months, ISO weeks (Monday to
//! Sunday) and single days. Every period resolves to a concrete, inclusive
//! date range.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::date::CalendarDate;
use crate::error::{SalesError, SalesResult};

/// Period granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Calendar month (default)
    #[default]
    Month,
    /// ISO week, Monday to Sunday
    Week,
    /// Single day
    Day,
}

impl Granularity {
    /// Short Korean name used on period selectors
    pub fn label(&self) -> &'static str {
        match self {
            Self::Month => "월",
            Self::Week => "주",
            Self::Day => "일",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month => write!(f, "month"),
            Self::Week => write!(f, "week"),
            Self::Day => write!(f, "day"),
        }
    }
}

impl FromStr for Granularity {
    type Err = SalesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "month" | "monthly" | "m" | "월" => Ok(Self::Month),
            "week" | "weekly" | "w" | "주" => Ok(Self::Week),
            "day" | "daily" | "d" | "일" => Ok(Self::Day),
            other => Err(SalesError::Parse(format!("Unknown granularity: {}", other))),
        }
    }
}

/// An inclusive date range with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: CalendarDate,
    end: CalendarDate,
}

impl DateRange {
    /// Create a range, rejecting one whose start is after its end
    pub fn new(start: CalendarDate, end: CalendarDate) -> SalesResult<Self> {
        if start > end {
            return Err(SalesError::invalid_range(start, end));
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one day
    pub fn single(date: CalendarDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> CalendarDate {
        self.start
    }

    pub fn end(&self) -> CalendarDate {
        self.end
    }

    /// Every date in the range, in order
    pub fn dates(&self) -> Vec<CalendarDate> {
        walk_days(self.start, self.end)
    }

    /// Number of days in the range
    pub fn day_count(&self) -> usize {
        ((self.end.as_naive() - self.start.as_naive()).num_days() + 1) as usize
    }

    /// Check if a date falls within this range
    pub fn contains(&self, date: CalendarDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Check if two ranges share at least one day
    pub fn intersects(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.start, self.end)
    }
}

/// Enumerate every date from `start` to `end` inclusive
pub fn enumerate_dates(start: CalendarDate, end: CalendarDate) -> SalesResult<Vec<CalendarDate>> {
    Ok(DateRange::new(start, end)?.dates())
}

fn walk_days(start: CalendarDate, end: CalendarDate) -> Vec<CalendarDate> {
    start
        .as_naive()
        .iter_days()
        .take_while(|d| *d <= end.as_naive())
        .map(CalendarDate::from_naive)
        .collect()
}

/// Last day-of-month for a year and month
pub fn days_in_month(year: i32, month: u32) -> SalesResult<u32> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1);

    match (first, next_first) {
        (Some(first), Some(next_first)) => Ok((next_first - first).num_days() as u32),
        _ => Err(SalesError::Validation(format!(
            "Invalid month: {:04}-{:02}",
            year, month
        ))),
    }
}

/// A user-selected calendar period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Period {
    /// Calendar month (e.g., "2025년 5월")
    Month { year: i32, month: u32 },

    /// ISO week, identified by its Monday (e.g., "2025-05-12 ~ 2025-05-18")
    Week { monday: CalendarDate },

    /// Single day
    Day { date: CalendarDate },
}

impl Period {
    /// Create a monthly period
    pub fn month(year: i32, month: u32) -> SalesResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(SalesError::Parse(format!("Invalid month: {}", month)));
        }
        Ok(Self::Month { year, month })
    }

    /// The ISO week containing `date`
    pub fn week_containing(date: CalendarDate) -> Self {
        Self::Week {
            monday: date.monday(),
        }
    }

    /// Create a weekly period from an ISO week-numbering year and week
    pub fn iso_week(year: i32, week: u32) -> SalesResult<Self> {
        NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
            .map(|monday| Self::Week {
                monday: CalendarDate::from_naive(monday),
            })
            .ok_or_else(|| SalesError::Parse(format!("Invalid ISO week: {}-W{:02}", year, week)))
    }

    /// Create a single-day period
    pub fn day(date: CalendarDate) -> Self {
        Self::Day { date }
    }

    /// The period of the given granularity containing `date`
    pub fn containing(granularity: Granularity, date: CalendarDate) -> Self {
        match granularity {
            Granularity::Month => Self::Month {
                year: date.year(),
                month: date.month(),
            },
            Granularity::Week => Self::week_containing(date),
            Granularity::Day => Self::Day { date },
        }
    }

    pub fn granularity(&self) -> Granularity {
        match self {
            Self::Month { .. } => Granularity::Month,
            Self::Week { .. } => Granularity::Week,
            Self::Day { .. } => Granularity::Day,
        }
    }

    /// Resolve this period to its concrete start and end dates
    pub fn range(&self) -> SalesResult<DateRange> {
        match self {
            Self::Month { year, month } => {
                let last = days_in_month(*year, *month)?;
                DateRange::new(
                    CalendarDate::from_ymd(*year, *month, 1)?,
                    CalendarDate::from_ymd(*year, *month, last)?,
                )
            }
            Self::Week { monday } => {
                // A Week built by hand may carry a non-Monday date
                DateRange::new(monday.monday(), monday.sunday())
            }
            Self::Day { date } => Ok(DateRange::single(*date)),
        }
    }

    /// First day of the period
    pub fn start_date(&self) -> SalesResult<CalendarDate> {
        Ok(self.range()?.start())
    }

    /// Every day in the period, in order
    pub fn dates(&self) -> SalesResult<Vec<CalendarDate>> {
        Ok(self.range()?.dates())
    }

    /// Check if a date falls within this period
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.range().map(|r| r.contains(date)).unwrap_or(false)
    }

    /// Get the next period
    pub fn next(&self) -> SalesResult<Self> {
        match self {
            Self::Month { year, month } => {
                if *month == 12 {
                    Self::month(*year + 1, 1)
                } else {
                    Self::month(*year, *month + 1)
                }
            }
            Self::Week { monday } => Ok(Self::Week {
                monday: monday.monday().add_days(7)?,
            }),
            Self::Day { date } => Ok(Self::Day {
                date: date.add_days(1)?,
            }),
        }
    }

    /// Get the previous period
    pub fn prev(&self) -> SalesResult<Self> {
        match self {
            Self::Month { year, month } => {
                if *month == 1 {
                    Self::month(*year - 1, 12)
                } else {
                    Self::month(*year, *month - 1)
                }
            }
            Self::Week { monday } => Ok(Self::Week {
                monday: monday.monday().add_days(-7)?,
            }),
            Self::Day { date } => Ok(Self::Day {
                date: date.add_days(-1)?,
            }),
        }
    }

    /// User-facing label, the inverse of [`Period::parse`]
    ///
    /// - Month: "2025년 5월"
    /// - Week: "2025-05-12 ~ 2025-05-18"
    /// - Day: "2025-05-12"
    pub fn label(&self) -> String {
        match self {
            Self::Month { year, month } => format!("{}년 {}월", year, month),
            Self::Week { monday } => format!("{} ~ {}", monday.monday(), monday.sunday()),
            Self::Day { date } => date.to_string(),
        }
    }

    /// Parse a period label for the given granularity
    ///
    /// Formats:
    /// - Month: "2025년 5월", "2025-05"
    /// - Week: "2025-05-12 ~ 2025-05-18", "2025-W20"
    /// - Day: "2025-05-12"
    ///
    /// Malformed text is always an error. Callers must ask the user to pick
    /// a period again rather than substituting the current one.
    pub fn parse(text: &str, granularity: Granularity) -> SalesResult<Self> {
        let s = text.trim();
        match granularity {
            Granularity::Month => parse_month(s),
            Granularity::Week => parse_week(s),
            Granularity::Day => Ok(Self::Day { date: s.parse()? }),
        }
    }
}

fn parse_number<T: FromStr>(s: &str, original: &str) -> SalesResult<T> {
    let s = s.trim();
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(SalesError::Parse(format!("Invalid period format: {}", original)));
    }
    s.parse()
        .map_err(|_| SalesError::Parse(format!("Invalid period format: {}", original)))
}

fn parse_month(s: &str) -> SalesResult<Period> {
    // Korean label: "2025년 5월"
    if let Some((year, rest)) = s.split_once('년') {
        let month = rest
            .trim()
            .strip_suffix('월')
            .ok_or_else(|| SalesError::Parse(format!("Invalid month label: {}", s)))?;
        let year: i32 = parse_number(year, s)?;
        let month: u32 = parse_number(month, s)?;
        if year.to_string().len() != 4 {
            return Err(SalesError::Parse(format!("Invalid month label: {}", s)));
        }
        return Period::month(year, month);
    }

    // Machine form: "2025-05"
    let parts: Vec<&str> = s.split('-').collect();
    if parts.len() == 2 && parts[0].len() == 4 && parts[1].len() == 2 {
        let year: i32 = parse_number(parts[0], s)?;
        let month: u32 = parse_number(parts[1], s)?;
        return Period::month(year, month);
    }

    Err(SalesError::Parse(format!("Invalid month label: {}", s)))
}

fn parse_week(s: &str) -> SalesResult<Period> {
    // Range label: "2025-05-12 ~ 2025-05-18"
    if let Some((start, end)) = s.split_once('~') {
        let start: CalendarDate = start.trim().parse()?;
        let end: CalendarDate = end.trim().parse()?;
        if start > end {
            return Err(SalesError::invalid_range(start, end));
        }
        if start != start.monday() || end != start.sunday() {
            return Err(SalesError::Parse(format!(
                "Week label must run from a Monday to the following Sunday: {}",
                s
            )));
        }
        return Ok(Period::Week { monday: start });
    }

    // ISO form: "2025-W20"
    if let Some((year, week)) = s.split_once("-W") {
        let year: i32 = parse_number(year, s)?;
        let week: u32 = parse_number(week, s)?;
        return Period::iso_week(year, week);
    }

    Err(SalesError::Parse(format!("Invalid week label: {}", s)))
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            Self::Week { monday } => {
                let (year, week) = monday.iso_week();
                write!(f, "{:04}-W{:02}", year, week)
            }
            Self::Day { date } => write!(f, "{}", date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_monthly_range() {
        let range = Period::month(2025, 1).unwrap().range().unwrap();
        assert_eq!(range.start(), d("2025-01-01"));
        assert_eq!(range.end(), d("2025-01-31"));

        let dec = Period::month(2024, 12).unwrap().range().unwrap();
        assert_eq!(dec.end(), d("2024-12-31"));
    }

    #[test]
    fn test_february_day_counts() {
        let leap = Period::month(2024, 2).unwrap().dates().unwrap();
        assert_eq!(leap.len(), 29);
        assert_eq!(leap.last().copied(), Some(d("2024-02-29")));

        let common = Period::month(2025, 2).unwrap().dates().unwrap();
        assert_eq!(common.len(), 28);
    }

    #[test]
    fn test_weekly_range() {
        let week = Period::week_containing(d("2025-05-15"));
        let range = week.range().unwrap();
        assert_eq!(range.start(), d("2025-05-12"));
        assert_eq!(range.end(), d("2025-05-18"));
        assert_eq!(range.day_count(), 7);
    }

    #[test]
    fn test_day_range() {
        let range = Period::day(d("2025-05-12")).range().unwrap();
        assert_eq!(range.start(), range.end());
    }

    #[test]
    fn test_enumerate_dates() {
        let dates = enumerate_dates(d("2025-04-29"), d("2025-05-02")).unwrap();
        assert_eq!(
            dates,
            vec![d("2025-04-29"), d("2025-04-30"), d("2025-05-01"), d("2025-05-02")]
        );

        let single = enumerate_dates(d("2025-05-02"), d("2025-05-02")).unwrap();
        assert_eq!(single.len(), 1);
    }

    #[test]
    fn test_enumerate_rejects_reversed_range() {
        let err = enumerate_dates(d("2025-05-03"), d("2025-05-02")).unwrap_err();
        assert!(matches!(err, SalesError::InvalidRange { .. }));
    }

    #[test]
    fn test_invalid_month() {
        assert!(Period::month(2025, 13).is_err());
        assert!(Period::Month { year: 2025, month: 0 }.range().is_err());
    }

    #[test]
    fn test_navigation() {
        let jan = Period::month(2025, 1).unwrap();
        assert_eq!(jan.next().unwrap(), Period::month(2025, 2).unwrap());
        assert_eq!(jan.prev().unwrap(), Period::month(2024, 12).unwrap());

        let week = Period::week_containing(d("2024-12-31"));
        assert_eq!(week.next().unwrap(), Period::week_containing(d("2025-01-06")));

        let day = Period::day(d("2025-02-28"));
        assert_eq!(day.next().unwrap(), Period::day(d("2025-03-01")));
    }

    #[test]
    fn test_parse_month_labels() {
        assert_eq!(
            Period::parse("2025년 5월", Granularity::Month).unwrap(),
            Period::month(2025, 5).unwrap()
        );
        assert_eq!(
            Period::parse("2025년5월", Granularity::Month).unwrap(),
            Period::month(2025, 5).unwrap()
        );
        assert_eq!(
            Period::parse("2025-05", Granularity::Month).unwrap(),
            Period::month(2025, 5).unwrap()
        );
    }

    #[test]
    fn test_parse_week_labels() {
        let expected = Period::week_containing(d("2025-05-12"));
        assert_eq!(
            Period::parse("2025-05-12 ~ 2025-05-18", Granularity::Week).unwrap(),
            expected
        );
        assert_eq!(Period::parse("2025-W20", Granularity::Week).unwrap(), expected);
    }

    #[test]
    fn test_parse_week_rejects_reversed_or_multi_week() {
        let reversed = Period::parse("2025-05-18 ~ 2025-05-12", Granularity::Week).unwrap_err();
        assert!(matches!(reversed, SalesError::InvalidRange { .. }));

        let wide = Period::parse("2025-05-12 ~ 2025-05-25", Granularity::Week).unwrap_err();
        assert!(wide.is_parse());
    }

    #[test]
    fn test_parse_week_rejects_partial_week() {
        for text in [
            "2025-05-13 ~ 2025-05-15",
            "2025-05-12 ~ 2025-05-17",
            "2025-05-13 ~ 2025-05-18",
            "2025-05-12 ~ 2025-05-12",
        ] {
            let err = Period::parse(text, Granularity::Week).unwrap_err();
            assert!(err.is_parse(), "expected parse error for {:?}", text);
        }

        let full = Period::parse("2025-05-12 ~ 2025-05-18", Granularity::Week).unwrap();
        assert_eq!(full, Period::week_containing(d("2025-05-14")));
    }

    #[test]
    fn test_parse_failures_never_default() {
        for text in ["", "기간을 선택하세요", "2025년 13월", "2025-5", "May 2025"] {
            let err = Period::parse(text, Granularity::Month).unwrap_err();
            assert!(err.is_parse(), "expected parse error for {:?}", text);
        }
        assert!(Period::parse("2025년 5월", Granularity::Week).is_err());
        assert!(Period::parse("2025-05-32", Granularity::Day).is_err());
    }

    #[test]
    fn test_label_round_trip() {
        let periods = [
            Period::month(2025, 5).unwrap(),
            Period::week_containing(d("2025-05-14")),
            Period::day(d("2025-05-14")),
        ];
        for period in periods {
            let parsed = Period::parse(&period.label(), period.granularity()).unwrap();
            assert_eq!(parsed, period);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Period::month(2025, 1).unwrap().to_string(), "2025-01");
        assert_eq!(Period::week_containing(d("2025-01-15")).to_string(), "2025-W03");
        assert_eq!(Period::day(d("2025-01-15")).to_string(), "2025-01-15");
    }

    #[test]
    fn test_granularity_from_str() {
        assert_eq!("week".parse::<Granularity>().unwrap(), Granularity::Week);
        assert_eq!("월".parse::<Granularity>().unwrap(), Granularity::Month);
        assert!("year".parse::<Granularity>().is_err());
    }

    #[test]
    fn test_serialization() {
        let period = Period::week_containing(d("2025-05-12"));
        let json = serde_json::to_string(&period).unwrap();
        let deserialized: Period = serde_json::from_str(&json).unwrap();
        assert_eq!(period, deserialized);
    }
}
