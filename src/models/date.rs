//! Calendar date value type
//!
//! A validated `YYYY-MM-DD` date. Text that does not match the exact format
//! (zero padded, real calendar day) never becomes a `CalendarDate`.

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{SalesError, SalesResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single calendar day
///
/// Ordering is chronological, which matches the lexicographic order of the
/// `YYYY-MM-DD` text form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Wrap an existing chrono date
    pub const fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a date from its parts
    pub fn from_ymd(year: i32, month: u32, day: u32) -> SalesResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                SalesError::Parse(format!(
                    "Not a calendar date: {:04}-{:02}-{:02}",
                    year, month, day
                ))
            })
    }

    /// Today's date in local time
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Get the underlying chrono date
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// ISO-8601 week-numbering year and week number
    pub fn iso_week(&self) -> (i32, u32) {
        let week = self.0.iso_week();
        (week.year(), week.week())
    }

    /// Monday of the ISO week containing this date
    pub fn monday(&self) -> Self {
        let offset = self.0.weekday().num_days_from_monday() as i64;
        Self(self.0 - Duration::days(offset))
    }

    /// Sunday of the ISO week containing this date
    pub fn sunday(&self) -> Self {
        let offset = 6 - self.0.weekday().num_days_from_monday() as i64;
        Self(self.0 + Duration::days(offset))
    }

    /// Shift by a signed number of days
    pub fn add_days(&self, days: i64) -> SalesResult<Self> {
        self.0
            .checked_add_signed(Duration::days(days))
            .map(Self)
            .ok_or_else(|| SalesError::Validation(format!("Date out of range: {} + {}d", self, days)))
    }

    /// The following day, if representable
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for CalendarDate {
    type Err = SalesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

        if !well_formed {
            return Err(SalesError::Parse(format!(
                "Expected a YYYY-MM-DD date, got '{}'",
                s
            )));
        }

        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Self)
            .map_err(|_| SalesError::Parse(format!("Not a calendar date: {}", s)))
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = SalesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}
