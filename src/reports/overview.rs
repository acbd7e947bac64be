//! Sales Overview
//!
//! Totals of target and actual sales over a date range, with the
//! achievement rate between them.

use serde::Serialize;

use crate::engine::{aggregate_total, fill, rate, AchievementBand};
use crate::error::SalesResult;
use crate::models::{DailyAmount, DateRange};

/// Which sides of a comparison had any stored data
///
/// A rate of 0 with no target stored is not the same thing as a rate of 0
/// against a real target; this keeps the two apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DataPresence {
    pub has_target: bool,
    pub has_actual: bool,
}

impl DataPresence {
    /// Presence of entries inside `range` for each series
    pub fn detect(range: &DateRange, targets: &[DailyAmount], records: &[DailyAmount]) -> Self {
        Self {
            has_target: targets.iter().any(|t| range.contains(t.date)),
            has_actual: records.iter().any(|r| range.contains(r.date)),
        }
    }

    /// Neither a target nor a record was found
    pub fn is_empty(&self) -> bool {
        !self.has_target && !self.has_actual
    }
}

/// Target vs. actual totals for one range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub range: DateRange,
    pub total_target: u64,
    pub total_actual: u64,
    /// Achievement percentage, one decimal
    pub rate: f64,
    pub data: DataPresence,
}

/// Zero-fill both series over `range`, sum each and compute the rate
pub fn compute_overview(
    range: &DateRange,
    targets: &[DailyAmount],
    records: &[DailyAmount],
) -> SalesResult<Overview> {
    let dates = range.dates();
    let total_target = aggregate_total(&fill(&dates, targets))?;
    let total_actual = aggregate_total(&fill(&dates, records))?;

    Ok(Overview {
        range: *range,
        total_target,
        total_actual,
        rate: rate(total_actual, total_target),
        data: DataPresence::detect(range, targets, records),
    })
}

impl Overview {
    pub fn band(&self) -> AchievementBand {
        AchievementBand::from_rate(self.rate)
    }

    /// Amount still needed to reach the target
    pub fn remaining(&self) -> u64 {
        self.total_target.saturating_sub(self.total_actual)
    }

    /// Format the overview for terminal display
    pub fn format_terminal(&self, title: &str, unit: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Sales Overview: {}\n", title));
        output.push_str(&format!("({})\n", self.range));
        output.push_str(&"=".repeat(50));
        output.push('\n');

        if self.data.is_empty() {
            output.push_str("No target or sales recorded for this period.\n");
            return output;
        }

        output.push_str(&format!("{:<12} {:>20}{}\n", "Target", self.total_target, unit));
        output.push_str(&format!("{:<12} {:>20}{}\n", "Actual", self.total_actual, unit));
        output.push_str(&format!("{:<12} {:>20}{}\n", "Remaining", self.remaining(), unit));
        output.push_str(&"-".repeat(50));
        output.push('\n');

        if self.data.has_target {
            output.push_str(&format!("{:<12} {:>19.1}% ({})\n", "Rate", self.rate, self.band()));
        } else {
            output.push_str(&format!("{:<12} {:>20}\n", "Rate", "no target set"));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::distribute;
    use crate::error::SalesError;
    use crate::models::CalendarDate;

    fn d(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_six_day_scenario() {
        let range = DateRange::new(d("2025-05-12"), d("2025-05-17")).unwrap();
        let targets = distribute(300_000, &range.dates()).unwrap();
        assert!(targets.iter().all(|t| t.amount == 50_000));

        let records = vec![
            DailyAmount::new(d("2025-05-12"), 10_000),
            DailyAmount::new(d("2025-05-14"), 20_000),
        ];

        let overview = compute_overview(&range, &targets, &records).unwrap();
        assert_eq!(overview.total_target, 300_000);
        assert_eq!(overview.total_actual, 30_000);
        assert_eq!(overview.rate, 10.0);
        assert_eq!(overview.band(), AchievementBand::Low);
        assert!(!overview.data.is_empty());
    }

    #[test]
    fn test_missing_both_series() {
        let range = DateRange::new(d("2025-05-01"), d("2025-05-31")).unwrap();
        let overview = compute_overview(&range, &[], &[]).unwrap();

        assert_eq!(overview.total_target, 0);
        assert_eq!(overview.total_actual, 0);
        assert_eq!(overview.rate, 0.0);
        assert!(overview.data.is_empty());
    }

    #[test]
    fn test_zero_target_is_not_missing_data() {
        let range = DateRange::new(d("2025-05-12"), d("2025-05-13")).unwrap();
        let targets = distribute(0, &range.dates()).unwrap();

        let overview = compute_overview(&range, &targets, &[]).unwrap();
        assert_eq!(overview.rate, 0.0);
        assert!(overview.data.has_target);
        assert!(!overview.data.has_actual);
        assert!(!overview.data.is_empty());
    }

    #[test]
    fn test_entries_outside_range_ignored() {
        let range = DateRange::new(d("2025-05-12"), d("2025-05-13")).unwrap();
        let records = vec![DailyAmount::new(d("2025-05-20"), 999)];

        let overview = compute_overview(&range, &[], &records).unwrap();
        assert_eq!(overview.total_actual, 0);
        assert!(!overview.data.has_actual);
    }

    #[test]
    fn test_total_overflow_is_an_error() {
        let range = DateRange::new(d("2025-05-12"), d("2025-05-13")).unwrap();
        let records = vec![
            DailyAmount::new(d("2025-05-12"), u64::MAX / 2 + 1),
            DailyAmount::new(d("2025-05-13"), u64::MAX / 2 + 1),
        ];

        let err = compute_overview(&range, &[], &records).unwrap_err();
        assert!(matches!(err, SalesError::Validation(_)));
    }

    #[test]
    fn test_format_terminal() {
        let range = DateRange::new(d("2025-05-12"), d("2025-05-13")).unwrap();
        let targets = distribute(200, &range.dates()).unwrap();
        let records = vec![DailyAmount::new(d("2025-05-12"), 150)];

        let text = compute_overview(&range, &targets, &records).unwrap().format_terminal("2025-05-12", "원");
        assert!(text.contains("Sales Overview: 2025-05-12"));
        assert!(text.contains("75.0%"));
        assert!(text.contains("low"));

        let empty = compute_overview(&range, &[], &[]).unwrap().format_terminal("x", "원");
        assert!(empty.contains("No target or sales recorded"));
    }
}
