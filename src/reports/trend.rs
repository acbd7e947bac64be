//! Target vs. actual trend series
//!
//! Aligned per-point target and actual values plus the achievement rate at
//! each point, ready for a chart. Points are days, or week-of-month blocks
//! for month charts.

use std::io::Write;

use csv::WriterBuilder;
use serde::Serialize;

use super::overview::DataPresence;
use crate::engine::{checked_sum, fill, group_by_week_of_month, rate};
use crate::error::{SalesError, SalesResult};
use crate::models::{BucketOrder, DailyAmount, DateRange};

/// Aligned chart series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    pub labels: Vec<String>,
    pub target_points: Vec<u64>,
    pub actual_points: Vec<u64>,
    /// `rate(actual[i], target[i])` per point
    pub rate_line: Vec<f64>,
    pub data: DataPresence,
    total_target: u64,
    total_actual: u64,
}

#[derive(Serialize)]
struct TrendRow<'a> {
    label: &'a str,
    target: u64,
    actual: u64,
    rate: f64,
}

/// Per-day trend over exactly `range`
///
/// Both series are zero-filled over every date of the range. Day-level
/// rates compare each day's actual to that day's distributed target.
pub fn compute_trend(
    range: &DateRange,
    targets: &[DailyAmount],
    records: &[DailyAmount],
) -> SalesResult<Trend> {
    let dates = range.dates();
    let target_daily = fill(&dates, targets);
    let actual_daily = fill(&dates, records);

    Trend::from_points(
        dates.iter().map(ToString::to_string).collect(),
        target_daily.iter().map(|d| d.amount).collect(),
        actual_daily.iter().map(|d| d.amount).collect(),
        DataPresence::detect(range, targets, records),
    )
}

/// Trend for one month grouped into day-of-month blocks (1~7일, 8~14일, ...)
pub fn compute_week_of_month_trend(
    month: &DateRange,
    targets: &[DailyAmount],
    records: &[DailyAmount],
) -> SalesResult<Trend> {
    let dates = month.dates();
    let target_buckets =
        group_by_week_of_month(&fill(&dates, targets), BucketOrder::Chronological)?;
    let actual_buckets =
        group_by_week_of_month(&fill(&dates, records), BucketOrder::Chronological)?;

    // Both sides are filled over the same dates, so buckets line up
    Trend::from_points(
        target_buckets.iter().map(|b| b.label.clone()).collect(),
        target_buckets.iter().map(|b| b.total_amount).collect(),
        actual_buckets.iter().map(|b| b.total_amount).collect(),
        DataPresence::detect(month, targets, records),
    )
}

impl Trend {
    fn from_points(
        labels: Vec<String>,
        target_points: Vec<u64>,
        actual_points: Vec<u64>,
        data: DataPresence,
    ) -> SalesResult<Self> {
        let rate_line = actual_points
            .iter()
            .zip(&target_points)
            .map(|(actual, target)| rate(*actual, *target))
            .collect();
        let total_target = checked_sum(target_points.iter().copied())?;
        let total_actual = checked_sum(actual_points.iter().copied())?;

        Ok(Self {
            labels,
            target_points,
            actual_points,
            rate_line,
            data,
            total_target,
            total_actual,
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn total_target(&self) -> u64 {
        self.total_target
    }

    pub fn total_actual(&self) -> u64 {
        self.total_actual
    }

    /// Format the trend for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{:<14} {:>14} {:>14} {:>8}\n",
            "Point", "Target", "Actual", "Rate"
        ));
        output.push_str(&"-".repeat(53));
        output.push('\n');

        for i in 0..self.len() {
            output.push_str(&format!(
                "{:<14} {:>14} {:>14} {:>7.1}%\n",
                self.labels[i], self.target_points[i], self.actual_points[i], self.rate_line[i]
            ));
        }

        output.push_str(&"-".repeat(53));
        output.push('\n');
        output.push_str(&format!(
            "{:<14} {:>14} {:>14} {:>7.1}%\n",
            "TOTAL",
            self.total_target(),
            self.total_actual(),
            rate(self.total_actual(), self.total_target())
        ));

        if self.data.is_empty() {
            output.push_str("\nNo target or sales recorded in this range.\n");
        }

        output
    }

    /// Export the series as CSV with a header row
    pub fn export_csv<W: Write>(&self, writer: W) -> SalesResult<()> {
        let mut csv = WriterBuilder::new().from_writer(writer);

        for i in 0..self.len() {
            csv.serialize(TrendRow {
                label: &self.labels[i],
                target: self.target_points[i],
                actual: self.actual_points[i],
                rate: self.rate_line[i],
            })?;
        }

        csv.flush()
            .map_err(|e| SalesError::Export(format!("Failed to flush CSV: {}", e)))
    }
}
