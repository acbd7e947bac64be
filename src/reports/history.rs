//! Target history and yearly performance
//!
//! The target list shows each saved target next to what was actually sold
//! over its period. The yearly summary breaks a calendar year into months.

use serde::Serialize;

use super::overview::{compute_overview, Overview};
use crate::engine::{checked_sum, fill, group_by_month, rate, AchievementBand};
use crate::error::SalesResult;
use crate::models::{
    AggregateTarget, BucketOrder, DailyAmount, DateRange, Granularity, Period, TargetId,
};

/// One saved target and how it went
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetHistoryRow {
    pub target_id: TargetId,
    pub period: Period,
    pub label: String,
    pub total_target: u64,
    pub total_actual: u64,
    pub rate: f64,
}

impl TargetHistoryRow {
    pub fn new(target: &AggregateTarget, total_actual: u64) -> Self {
        Self {
            target_id: target.id,
            period: target.period,
            label: target.period.label(),
            total_target: target.total_amount,
            total_actual,
            rate: rate(total_actual, target.total_amount),
        }
    }

    pub fn band(&self) -> AchievementBand {
        AchievementBand::from_rate(self.rate)
    }
}

/// Saved targets of one granularity with their outcomes
#[derive(Debug, Clone, Serialize)]
pub struct TargetHistory {
    pub granularity: Granularity,
    pub order: BucketOrder,
    pub rows: Vec<TargetHistoryRow>,
}

impl TargetHistory {
    /// Build rows from targets and the record series covering them
    ///
    /// `records` may be sparse and span more than any one target; each row
    /// only sums records inside its own period.
    pub fn build(
        granularity: Granularity,
        order: BucketOrder,
        targets: &[AggregateTarget],
        records: &[DailyAmount],
    ) -> SalesResult<Self> {
        let mut rows = Vec::with_capacity(targets.len());
        for target in targets {
            let range = target.range()?;
            let actual = checked_sum(
                records
                    .iter()
                    .filter(|r| range.contains(r.date))
                    .map(|r| r.amount),
            )?;
            rows.push((target.start_date()?, TargetHistoryRow::new(target, actual)));
        }

        rows.sort_by_key(|(start, _)| *start);
        if order == BucketOrder::MostRecentFirst {
            rows.reverse();
        }

        Ok(Self {
            granularity,
            order,
            rows: rows.into_iter().map(|(_, row)| row).collect(),
        })
    }

    /// Format the history for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Target History ({})\n", self.granularity.label()));
        output.push_str(&"=".repeat(78));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No targets saved.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<14} {:<26} {:>12} {:>12} {:>8}\n",
            "ID", "Period", "Target", "Actual", "Rate"
        ));
        output.push_str(&"-".repeat(78));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<14} {:<26} {:>12} {:>12} {:>7.1}%\n",
                row.target_id.to_string(),
                row.label,
                row.total_target,
                row.total_actual,
                row.rate
            ));
        }

        output
    }
}

/// One month of a yearly summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthRow {
    /// `YYYY-MM`
    pub key: String,
    pub label: String,
    pub total_target: u64,
    pub total_actual: u64,
    pub rate: f64,
}

/// A calendar year split by month, plus the whole-year overview
#[derive(Debug, Clone, Serialize)]
pub struct YearSummary {
    pub year: i32,
    pub months: Vec<MonthRow>,
    pub overview: Overview,
}

impl YearSummary {
    /// Group zero-filled year series by month
    ///
    /// Months are listed January to December.
    pub fn compute(
        year: &DateRange,
        targets: &[DailyAmount],
        records: &[DailyAmount],
    ) -> SalesResult<Self> {
        let dates = year.dates();
        let target_months = group_by_month(&fill(&dates, targets), BucketOrder::Chronological)?;
        let actual_months = group_by_month(&fill(&dates, records), BucketOrder::Chronological)?;

        let months = target_months
            .into_iter()
            .zip(actual_months)
            .map(|(target, actual)| MonthRow {
                rate: rate(actual.total_amount, target.total_amount),
                key: target.key,
                label: target.label,
                total_target: target.total_amount,
                total_actual: actual.total_amount,
            })
            .collect();

        Ok(Self {
            year: year.start().year(),
            months,
            overview: compute_overview(year, targets, records)?,
        })
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}년 Performance\n", self.year));
        output.push_str(&"=".repeat(56));
        output.push('\n');
        output.push_str(&format!(
            "{:<14} {:>14} {:>14} {:>8}\n",
            "Month", "Target", "Actual", "Rate"
        ));
        output.push_str(&"-".repeat(56));
        output.push('\n');

        for month in &self.months {
            output.push_str(&format!(
                "{:<14} {:>14} {:>14} {:>7.1}%\n",
                month.label, month.total_target, month.total_actual, month.rate
            ));
        }

        output.push_str(&"-".repeat(56));
        output.push('\n');
        output.push_str(&format!(
            "{:<14} {:>14} {:>14} {:>7.1}%\n",
            "YEAR",
            self.overview.total_target,
            self.overview.total_actual,
            self.overview.rate
        ));

        output
    }
}
