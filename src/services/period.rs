//! Period service
//!
//! Resolves the current period, builds the lists of selectable periods and
//! parses period text typed by the user.

use chrono::Months;

use crate::config::settings::Settings;
use crate::error::{SalesError, SalesResult};
use crate::models::{CalendarDate, Granularity, Period};

/// Service for period selection
pub struct PeriodService<'a> {
    settings: &'a Settings,
    today: CalendarDate,
}

impl<'a> PeriodService<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self::with_today(settings, CalendarDate::today())
    }

    /// Create a service anchored on a fixed day
    pub fn with_today(settings: &'a Settings, today: CalendarDate) -> Self {
        Self { settings, today }
    }

    pub fn today(&self) -> CalendarDate {
        self.today
    }

    /// The period of `granularity` containing today
    pub fn current_period(&self, granularity: Granularity) -> Period {
        Period::containing(granularity, self.today)
    }

    /// Parse period text, or use the current period when none was given
    pub fn parse_or_current(
        &self,
        text: Option<&str>,
        granularity: Option<Granularity>,
    ) -> SalesResult<Period> {
        let granularity = granularity.unwrap_or(self.settings.default_granularity);
        match text {
            Some(s) => self.parse(s, granularity),
            None => Ok(self.current_period(granularity)),
        }
    }

    /// Parse period text for a granularity
    ///
    /// Besides the label formats accepted by [`Period::parse`], the keywords
    /// `current`/`this`/`now`, `last`/`prev`/`previous` and `next` resolve
    /// relative to today. Anything else that fails to parse is an error;
    /// there is no fallback to the current period.
    pub fn parse(&self, text: &str, granularity: Granularity) -> SalesResult<Period> {
        let current = self.current_period(granularity);
        match text.trim().to_lowercase().as_str() {
            "current" | "this" | "now" => Ok(current),
            "last" | "prev" | "previous" => current.prev(),
            "next" => current.next(),
            _ => Period::parse(text, granularity),
        }
    }

    /// Last day offered by the period pickers
    ///
    /// The same day of month, `upcoming_months` months ahead (clamped to
    /// the month's last day).
    fn horizon(&self) -> SalesResult<CalendarDate> {
        self.today
            .as_naive()
            .checked_add_months(Months::new(self.settings.upcoming_months))
            .map(CalendarDate::from_naive)
            .ok_or_else(|| SalesError::Validation("Period horizon out of range".into()))
    }

    /// The current month and the following months, `upcoming_months` in all
    pub fn upcoming_months(&self) -> SalesResult<Vec<Period>> {
        let mut periods = Vec::with_capacity(self.settings.upcoming_months as usize);
        let mut current = self.current_period(Granularity::Month);

        for _ in 0..self.settings.upcoming_months {
            periods.push(current);
            current = current.next()?;
        }

        Ok(periods)
    }

    /// Every week from the current one until the horizon
    pub fn upcoming_weeks(&self) -> SalesResult<Vec<Period>> {
        let horizon = self.horizon()?;
        let mut periods = Vec::new();
        let mut current = self.current_period(Granularity::Week);

        while current.start_date()? <= horizon {
            periods.push(current);
            current = current.next()?;
        }

        Ok(periods)
    }

    /// Every day from today until the horizon
    pub fn upcoming_days(&self) -> SalesResult<Vec<Period>> {
        let horizon = self.horizon()?;
        Ok(crate::models::enumerate_dates(self.today, horizon)?
            .into_iter()
            .map(Period::day)
            .collect())
    }

    /// Selectable periods for a granularity
    pub fn upcoming(&self, granularity: Granularity) -> SalesResult<Vec<Period>> {
        match granularity {
            Granularity::Month => self.upcoming_months(),
            Granularity::Week => self.upcoming_weeks(),
            Granularity::Day => self.upcoming_days(),
        }
    }
}
